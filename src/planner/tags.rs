//! Tag delta planning.

use std::collections::BTreeSet;

use crate::model::{Tag, TagSet};

/// Tag mutations that move previous tags toward desired tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDelta {
    pub to_add: TagSet,
    pub to_remove: BTreeSet<String>,
}

impl TagDelta {
    /// True when neither tag call is needed.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Computes the tag delta between desired and previous tags.
///
/// Additions compare whole `(key, value)` entries, removals compare keys
/// only. A key whose value changed therefore shows up in `to_add` with its new
/// value and never in `to_remove`: the write overwrites the old value in
/// place.
pub fn plan_tags(desired: &TagSet, previous: &TagSet) -> TagDelta {
    let to_add: TagSet = desired.difference(previous).cloned().collect();

    let desired_keys: BTreeSet<&str> = desired.iter().map(|t| t.key.as_str()).collect();
    let to_remove: BTreeSet<String> = previous
        .iter()
        .map(|t: &Tag| t.key.as_str())
        .filter(|key| !desired_keys.contains(key))
        .map(str::to_string)
        .collect();

    TagDelta { to_add, to_remove }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tag_set;

    fn keys(keys: &[&str]) -> BTreeSet<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_minimal_delta() {
        let delta =
            plan_tags(&tag_set([("A", "1"), ("B", "2")]), &tag_set([("A", "1"), ("C", "3")]));

        assert_eq!(delta.to_add, tag_set([("B", "2")]));
        assert_eq!(delta.to_remove, keys(&["C"]));
    }

    #[test]
    fn test_value_change_adds_without_removing() {
        let delta = plan_tags(&tag_set([("A", "2")]), &tag_set([("A", "1")]));

        assert_eq!(delta.to_add, tag_set([("A", "2")]));
        assert!(delta.to_remove.is_empty());
    }

    #[test]
    fn test_identical_sets_are_empty() {
        let tags = tag_set([("env", "prod"), ("team", "core")]);
        assert!(plan_tags(&tags, &tags).is_empty());
        assert!(plan_tags(&TagSet::new(), &TagSet::new()).is_empty());
    }

    #[test]
    fn test_clearing_all_tags() {
        let delta = plan_tags(&TagSet::new(), &tag_set([("env", "prod"), ("team", "core")]));
        assert!(delta.to_add.is_empty());
        assert_eq!(delta.to_remove, keys(&["env", "team"]));
    }

    #[test]
    fn test_adding_to_empty() {
        let delta = plan_tags(&tag_set([("env", "prod")]), &TagSet::new());
        assert_eq!(delta.to_add, tag_set([("env", "prod")]));
        assert!(delta.to_remove.is_empty());
    }
}
