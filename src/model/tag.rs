//! Resource tags.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A single key/value tag attached to a parameter.
///
/// Ordering and equality cover both key and value, so two tags with the same
/// key and different values are distinct set members.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into() }
    }
}

/// Set of tags as declared on a resource.
pub type TagSet = BTreeSet<Tag>;

/// Builds a tag set from `(key, value)` pairs.
pub fn tag_set<K, V, I>(pairs: I) -> TagSet
where
    K: Into<String>,
    V: Into<String>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs.into_iter().map(|(k, v)| Tag::new(k, v)).collect()
}

/// Merges host system tags underneath the resource's own tags.
///
/// Resource tags win on key collision; the result holds one entry per key.
pub fn merge_system_tags(tags: &TagSet, system_tags: &BTreeMap<String, String>) -> TagSet {
    let mut by_key: BTreeMap<&str, &str> =
        system_tags.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    for tag in tags {
        by_key.insert(tag.key.as_str(), tag.value.as_str());
    }
    by_key.into_iter().map(|(k, v)| Tag::new(k, v)).collect()
}

/// Returns the first key that appears more than once, if any.
pub fn duplicate_key(tags: &TagSet) -> Option<&str> {
    let mut seen = BTreeSet::new();
    tags.iter().map(|t| t.key.as_str()).find(|key| !seen.insert(*key))
}
