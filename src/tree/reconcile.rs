//! Identity-preserving reconciliation of an ordered collection.
//!
//! `merge_by_key` matches newly discovered items against the previous
//! collection by key only. Position plays no part in matching, so reordering on
//! disk never causes an existing entry to be reused for a different key.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug)]
pub struct Merge<T> {
    /// Every surviving entry, in discovery order
    pub entries: Vec<T>,
    /// Entries carried over from the previous collection
    pub retained: Vec<T>,
    /// Entries built for keys that were not present before
    pub created: Vec<T>,
    /// Previous entries whose key was not discovered again, in previous order
    pub removed: Vec<T>,
}

/// Merge `discovered` into `previous` by key.
///
/// `upsert` receives the matching previous entry (or `None`) together with the
/// discovered data and returns the entry to keep. For a previous entry it
/// should return that same entry, optionally after refreshing it.
pub fn merge_by_key<K, T, D, P, N, F>(previous: P, discovered: N, mut upsert: F) -> Merge<T>
where
    K: Eq + Hash,
    T: Copy,
    P: IntoIterator<Item = (K, T)>,
    N: IntoIterator<Item = (K, D)>,
    F: FnMut(Option<T>, D) -> T,
{
    let mut old: Vec<Option<T>> = Vec::new();
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut removed = Vec::new();

    for (key, entry) in previous {
        if index.contains_key(&key) {
            // duplicate key in the previous collection, keep the first
            removed.push(entry);
            continue;
        }
        index.insert(key, old.len());
        old.push(Some(entry));
    }

    let mut entries = Vec::new();
    let mut retained = Vec::new();
    let mut created = Vec::new();

    for (key, data) in discovered {
        let existing = index.remove(&key).and_then(|i| old[i].take());
        let entry = match existing {
            Some(found) => {
                let entry = upsert(Some(found), data);
                retained.push(entry);
                entry
            }
            None => {
                let entry = upsert(None, data);
                created.push(entry);
                entry
            }
        };
        entries.push(entry);
    }

    removed.extend(old.into_iter().flatten());

    Merge {
        entries,
        retained,
        created,
        removed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(previous: &[(&'static str, u32)], discovered: &[&'static str]) -> Merge<u32> {
        let mut next_id = 100;
        merge_by_key(
            previous.iter().copied(),
            discovered.iter().map(|k| (*k, ())),
            |existing, ()| {
                existing.unwrap_or_else(|| {
                    next_id += 1;
                    next_id
                })
            },
        )
    }

    #[test]
    fn test_unchanged_collection_keeps_every_entry() {
        let merge = run(&[("a", 1), ("b", 2)], &["a", "b"]);
        assert_eq!(merge.entries, vec![1, 2]);
        assert_eq!(merge.retained, vec![1, 2]);
        assert!(merge.created.is_empty());
        assert!(merge.removed.is_empty());
    }

    #[test]
    fn test_partitions_added_and_removed() {
        let merge = run(&[("a", 1), ("b", 2), ("c", 3)], &["c", "d", "a"]);
        assert_eq!(merge.entries, vec![3, 101, 1]);
        assert_eq!(merge.retained, vec![3, 1]);
        assert_eq!(merge.created, vec![101]);
        assert_eq!(merge.removed, vec![2]);
    }

    #[test]
    fn test_reordering_matches_by_key_not_position() {
        let merge = run(&[("a", 1), ("b", 2), ("c", 3)], &["c", "b", "a"]);
        assert_eq!(merge.entries, vec![3, 2, 1]);
        assert!(merge.created.is_empty());
    }

    #[test]
    fn test_empty_discovery_removes_everything() {
        let merge = run(&[("a", 1), ("b", 2)], &[]);
        assert!(merge.entries.is_empty());
        assert_eq!(merge.removed, vec![1, 2]);
    }

    #[test]
    fn test_upsert_sees_previous_entry() {
        let mut refreshed = Vec::new();
        let merge = merge_by_key([("a", 1u32)], [("a", "fresh")], |existing, data| {
            refreshed.push((existing, data));
            existing.unwrap_or(0)
        });
        assert_eq!(merge.entries, vec![1]);
        assert_eq!(refreshed, vec![(Some(1), "fresh")]);
    }
}
