use super::*;

use crate::case_fold::{fold, lower, upper};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use proptest_derive::Arbitrary;
use std::collections::BTreeMap;

fn validate_map<V, C: ChildTable>(m: &PrefixMap<V, C>) {
    let t = &m.trie;
    assert_eq!(t.node(NodeId::ROOT).depth, 0, "root must be at depth 0");

    let mut with_value = 0usize;
    for index in 0..t.node_count() {
        let node = t.node(NodeId::new(index));
        if node.value.is_some() {
            with_value += 1;
        }
        for (c, child) in node.children.links() {
            assert!(
                child.index() > index,
                "child {} allocated before its parent {}",
                child.index(),
                index
            );
            assert_eq!(
                t.node(child).depth,
                node.depth + 1,
                "depth must grow by one per level"
            );
            if !m.case_sensitive() {
                assert_eq!(
                    node.children.child(fold(c)),
                    Some(child),
                    "slot {:?} must hold the node of its folded slot",
                    c
                );
                assert_eq!(
                    node.children.child(lower(c)),
                    node.children.child(upper(c)),
                    "case variants of {:?} must share one node",
                    c
                );
            }
        }
    }

    assert_eq!(with_value, m.len(), "values in the trie must match len");
    assert_eq!(m.index.len(), m.len(), "index entries must match len");
}

#[derive(Clone, Copy, Debug, Arbitrary)]
enum Backend {
    Dense,
    Sparse,
}

#[derive(Clone, Debug)]
enum Op {
    Put(String, u32),
    Remove(String),
    Query(String),
    Compact,
    Clear,
}

fn key_strategy(alphabet: &'static [char]) -> impl Strategy<Value = String> + Clone {
    // A tiny alphabet keeps prefixes overlapping.
    prop::collection::vec(prop::sample::select(alphabet), 0..=6)
        .prop_map(|chars| chars.into_iter().collect())
}

const ASCII_ALPHABET: &[char] = &['a', 'b', 'A', 'B', '-'];
// Includes letters whose lower-case forms share one upper-case form:
// final sigma, long s and the Kelvin sign.
const UNICODE_ALPHABET: &[char] = &[
    'a', 'A', 's', 'S', 'k', '\u{e9}', '\u{c9}', '\u{3c3}', '\u{3c2}', '\u{3a3}', '\u{17f}',
    '\u{212a}', '\u{1F600}',
];

fn ops_strategy(alphabet: &'static [char]) -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy(alphabet);
    let op = prop_oneof![
        40 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Put(k, v)),
        20 => key.clone().prop_map(Op::Remove),
        38 => key.clone().prop_map(Op::Query),
        1 => Just(Op::Compact),
        1 => Just(Op::Clear),
    ];
    prop::collection::vec(op, 0..=400)
}

fn canonical(case_sensitive: bool, key: &str) -> String {
    if case_sensitive {
        key.to_string()
    } else {
        key.chars().map(fold).collect()
    }
}

/// Values of every model prefix that `input` starts with, shortest first.
fn naive_matches(model: &BTreeMap<String, u32>, input: &str) -> Vec<u32> {
    let chars: Vec<char> = input.chars().collect();
    (0..=chars.len())
        .filter_map(|n| {
            let prefix: String = chars[..n].iter().collect();
            model.get(&prefix).copied()
        })
        .collect()
}

fn run_ops<C: ChildTable>(case_sensitive: bool, ops: &[Op]) -> std::result::Result<(), TestCaseError> {
    let mut m: PrefixMap<u32, C> = PrefixMap::new(case_sensitive);
    let mut model: BTreeMap<String, u32> = BTreeMap::new();

    for op in ops {
        match op {
            Op::Put(key, value) => {
                let old_m = m.put(key, *value).unwrap();
                let old_model = model.insert(canonical(case_sensitive, key), *value);
                prop_assert_eq!(old_m, old_model);
            }
            Op::Remove(key) => {
                let old_m = m.remove(key).unwrap();
                let old_model = model.remove(&canonical(case_sensitive, key));
                prop_assert_eq!(old_m, old_model);
            }
            Op::Query(input) => {
                let folded = canonical(case_sensitive, input);
                let expected = naive_matches(&model, &folded);

                prop_assert_eq!(m.get(input).copied(), model.get(&folded).copied());
                prop_assert_eq!(m.contains_prefix(input), model.contains_key(&folded));
                prop_assert_eq!(m.shortest_match(input).copied(), expected.first().copied());
                prop_assert_eq!(m.longest_match(input).copied(), expected.last().copied());
                let all: Vec<u32> = m.all_matches(input).copied().collect();
                prop_assert_eq!(all, expected);
            }
            Op::Compact => {
                m.compact();
            }
            Op::Clear => {
                m.clear();
                model.clear();
            }
        }

        prop_assert_eq!(m.len(), model.len());
    }

    validate_map(&m);
    let got: Vec<(String, u32)> = m.iter().map(|(k, v)| (k.to_string(), *v)).collect();
    let expected: Vec<(String, u32)> = model.into_iter().collect();
    prop_assert_eq!(got, expected);
    Ok(())
}

fn flip_case(key: &str, mask: &[bool]) -> String {
    key.chars()
        .zip(mask.iter().chain(std::iter::repeat(&false)))
        .map(|(c, flip)| if *flip { upper(c) } else { fold(c) })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_ascii(
        backend in any::<Backend>(),
        case_sensitive in any::<bool>(),
        ops in ops_strategy(ASCII_ALPHABET),
    ) {
        match backend {
            Backend::Dense => run_ops::<DenseChildren>(case_sensitive, &ops)?,
            Backend::Sparse => run_ops::<SparseChildren>(case_sensitive, &ops)?,
        }
    }

    #[test]
    fn prop_equivalence_unicode(
        case_sensitive in any::<bool>(),
        ops in ops_strategy(UNICODE_ALPHABET),
    ) {
        run_ops::<SparseChildren>(case_sensitive, &ops)?;
    }

    #[test]
    fn prop_case_fold_symmetry(
        prefixes in prop::collection::vec(key_strategy(ASCII_ALPHABET), 0..=20),
        probes in prop::collection::vec(key_strategy(ASCII_ALPHABET), 1..=20),
    ) {
        let mut m: AsciiPrefixMap<usize> = AsciiPrefixMap::new(false);
        for (i, prefix) in prefixes.iter().enumerate() {
            m.put(prefix, i).unwrap();
        }
        validate_map(&m);

        for probe in &probes {
            let up = probe.to_ascii_uppercase();
            let low = probe.to_ascii_lowercase();
            prop_assert_eq!(m.get(probe), m.get(&up));
            prop_assert_eq!(m.get(probe), m.get(&low));
            prop_assert_eq!(m.shortest_match(probe), m.shortest_match(&up));
            prop_assert_eq!(m.longest_match(probe), m.longest_match(&low));
        }
    }

    #[test]
    fn prop_unicode_case_fold_symmetry(
        prefixes in prop::collection::vec(key_strategy(UNICODE_ALPHABET), 0..=20),
        probes in prop::collection::vec(key_strategy(UNICODE_ALPHABET), 1..=20),
        mask in prop::collection::vec(any::<bool>(), 0..=6),
    ) {
        let mut m: StringPrefixMap<usize> = StringPrefixMap::new(false);
        for (i, prefix) in prefixes.iter().enumerate() {
            m.put(prefix, i).unwrap();
        }
        validate_map(&m);

        for probe in &probes {
            let folded: String = probe.chars().map(fold).collect();
            let up: String = probe.chars().map(upper).collect();
            let flipped = flip_case(probe, &mask);
            prop_assert_eq!(m.get(probe), m.get(&folded));
            prop_assert_eq!(m.get(probe), m.get(&up));
            prop_assert_eq!(m.get(probe), m.get(&flipped));
            prop_assert_eq!(m.longest_match(probe), m.longest_match(&up));
        }
    }

    #[test]
    fn prop_unicode_removal_symmetry(
        key in key_strategy(UNICODE_ALPHABET),
        other in key_strategy(UNICODE_ALPHABET),
        mask in prop::collection::vec(any::<bool>(), 0..=6),
    ) {
        let mut m: StringPrefixMap<u32> = StringPrefixMap::new(false);
        m.put(&key, 1).unwrap();
        m.put(&other, 2).unwrap();
        validate_map(&m);

        let variant = flip_case(&key, &mask);
        prop_assert!(m.remove(&variant).unwrap().is_some());
        validate_map(&m);
        let up: String = key.chars().map(upper).collect();
        prop_assert_eq!(m.get(&key), None);
        prop_assert_eq!(m.get(&up), None);
        prop_assert_eq!(m.get(&variant), None);
    }

    #[test]
    fn prop_removal_symmetry(
        backend in any::<Backend>(),
        key in key_strategy(ASCII_ALPHABET),
        mask in prop::collection::vec(any::<bool>(), 0..=6),
    ) {
        let variant = flip_case(&key, &mask);
        let (removed, get_key, get_upper, get_lower, len) = match backend {
            Backend::Dense => {
                let mut m: AsciiPrefixMap<u32> = AsciiPrefixMap::new(false);
                m.put(&key, 7).unwrap();
                let removed = m.remove(&variant).unwrap();
                (removed, m.get(&key).copied(), m.get(&key.to_ascii_uppercase()).copied(),
                 m.get(&key.to_ascii_lowercase()).copied(), m.len())
            }
            Backend::Sparse => {
                let mut m: StringPrefixMap<u32> = StringPrefixMap::new(false);
                m.put(&key, 7).unwrap();
                let removed = m.remove(&variant).unwrap();
                (removed, m.get(&key).copied(), m.get(&key.to_ascii_uppercase()).copied(),
                 m.get(&key.to_ascii_lowercase()).copied(), m.len())
            }
        };
        prop_assert_eq!(removed, Some(7));
        prop_assert_eq!(get_key, None);
        prop_assert_eq!(get_upper, None);
        prop_assert_eq!(get_lower, None);
        prop_assert_eq!(len, 0);
    }

    #[test]
    fn prop_shortest_not_longer_than_longest(
        case_sensitive in any::<bool>(),
        prefixes in prop::collection::vec(key_strategy(UNICODE_ALPHABET), 0..=20),
        input in key_strategy(UNICODE_ALPHABET),
    ) {
        // Each value is the length of its prefix.
        let mut m: StringPrefixMap<usize> = StringPrefixMap::new(case_sensitive);
        for prefix in &prefixes {
            m.put(prefix, prefix.chars().count()).unwrap();
        }

        match (m.shortest_match(&input), m.longest_match(&input)) {
            (Some(shortest), Some(longest)) => prop_assert!(shortest <= longest),
            (None, None) => {}
            (shortest, longest) => prop_assert!(false, "only one of {:?} / {:?} matched", shortest, longest),
        }

        let lengths: Vec<usize> = m.all_matches(&input).copied().collect();
        prop_assert!(lengths.windows(2).all(|w| w[0] < w[1]), "matches out of order: {:?}", lengths);
        prop_assert_eq!(lengths.first(), m.shortest_match(&input));
        prop_assert_eq!(lengths.last(), m.longest_match(&input));
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys = ["", "A", "ab", "AB-", "b", "Ab-a"];
    let probes = ["", "a", "AB", "ab-a-b", "b-", "x"];

    let mut baseline: Option<Vec<Vec<&str>>> = None;
    for_each_permutation(&keys, |perm| {
        let mut m: AsciiPrefixMap<&str> = AsciiPrefixMap::new(false);
        for k in &perm {
            m.put(k, *k).unwrap();
        }
        validate_map(&m);

        let mut seen: Vec<Vec<&str>> = Vec::new();
        for probe in probes {
            seen.push(m.all_matches(probe).copied().collect());
        }
        match &baseline {
            None => baseline = Some(seen),
            Some(expected) => assert_eq!(&seen, expected),
        }
    });

    let expected = baseline.unwrap();
    assert_eq!(expected[0], vec![""]);
    assert_eq!(expected[1], vec!["", "A"]);
    assert_eq!(expected[2], vec!["", "A", "ab"]);
    assert_eq!(expected[3], vec!["", "A", "ab", "AB-", "Ab-a"]);
    assert_eq!(expected[4], vec!["", "b"]);
    assert_eq!(expected[5], vec![""]);
}

#[test]
fn exhaustive_remove_order_small_set() {
    let keys = ["a", "b", "ab", "AB-", "ba"];

    let mut base: StringPrefixMap<usize> = StringPrefixMap::new(false);
    for (i, k) in keys.iter().enumerate() {
        base.put(k, i).unwrap();
    }

    for_each_permutation(&keys, |perm| {
        let mut m = base.clone();
        let mut remaining = keys.len();
        for k in perm {
            assert!(m.remove(&k.to_ascii_uppercase()).unwrap().is_some());
            remaining -= 1;
            assert_eq!(m.len(), remaining);
            validate_map(&m);
        }
        assert!(m.is_empty());
        assert_eq!(m.longest_match("ab-ba"), None);
        m.compact();
        assert_eq!(m.node_count(), 1);
    });
}
