//! Serde support: a map is written as its case sensitivity plus the canonical
//! prefix index, and read back by storing every entry again.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::node::ChildTable;
use crate::PrefixMap;

struct Prefixes<'a, V, C>(&'a PrefixMap<V, C>);

impl<V: Serialize, C: ChildTable> Serialize for Prefixes<'_, V, C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter())
    }
}

impl<V: Serialize, C: ChildTable> Serialize for PrefixMap<V, C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PrefixMap", 2)?;
        state.serialize_field("case_sensitive", &self.case_sensitive())?;
        state.serialize_field("prefixes", &Prefixes(self))?;
        state.end()
    }
}

#[derive(Deserialize)]
#[serde(rename = "PrefixMap")]
struct StoredPrefixMap<V> {
    case_sensitive: bool,
    prefixes: BTreeMap<String, V>,
}

impl<'de, V, C> Deserialize<'de> for PrefixMap<V, C>
where
    V: Deserialize<'de>,
    C: ChildTable,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let stored = StoredPrefixMap::<V>::deserialize(deserializer)?;
        PrefixMap::try_from_iter(stored.case_sensitive, stored.prefixes)
            .map_err(|err| D::Error::custom(Rejected(err)))
    }
}

struct Rejected(crate::PrefixMapError);

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stored prefix cannot be loaded: {}", self.0)
    }
}
