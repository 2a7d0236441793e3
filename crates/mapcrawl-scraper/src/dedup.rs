//! Cross-pass deduplication of harvested listings.

use std::collections::HashSet;

use mapcrawl_core::{dedup_key, NO_NAME};

/// Remembers every composite key admitted during one crawl and hands out
/// gap-free serials starting at 1.
///
/// The store only grows; there is no removal.
#[derive(Debug)]
pub struct DedupStore {
    seen: HashSet<String>,
    next_serial: u64,
}

impl Default for DedupStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DedupStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
            next_serial: 1,
        }
    }

    /// Attempts to admit a listing identified by `name` and `address`.
    ///
    /// Returns the assigned serial on admission. Returns `None` when the name
    /// is the [`NO_NAME`] placeholder or the `name_address` key was already
    /// admitted.
    pub fn try_admit(&mut self, name: &str, address: &str) -> Option<u64> {
        if name == NO_NAME {
            return None;
        }
        if !self.seen.insert(dedup_key(name, address)) {
            return None;
        }
        let serial = self.next_serial;
        self.next_serial += 1;
        Some(serial)
    }

    /// Number of keys admitted so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Serial the next admitted listing will receive.
    #[must_use]
    pub fn next_serial(&self) -> u64 {
        self.next_serial
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_admission_gets_serial_one() {
        let mut store = DedupStore::new();
        assert_eq!(store.try_admit("Fast Freight", "King Fahd Rd"), Some(1));
        assert_eq!(store.next_serial(), 2);
    }

    #[test]
    fn repeated_key_is_rejected_without_consuming_a_serial() {
        let mut store = DedupStore::new();
        assert_eq!(store.try_admit("A", "1 Main St"), Some(1));
        assert_eq!(store.try_admit("A", "1 Main St"), None);
        assert_eq!(store.try_admit("B", "2 Main St"), Some(2));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn placeholder_name_is_never_admitted() {
        let mut store = DedupStore::new();
        assert_eq!(store.try_admit(NO_NAME, "1 Main St"), None);
        assert_eq!(store.try_admit(NO_NAME, "2 Main St"), None);
        assert!(store.is_empty());
        assert_eq!(store.next_serial(), 1);
    }

    #[test]
    fn same_name_at_different_address_is_distinct() {
        let mut store = DedupStore::new();
        assert_eq!(store.try_admit("Branch", "North"), Some(1));
        assert_eq!(store.try_admit("Branch", "South"), Some(2));
    }

    #[test]
    fn identical_name_and_address_collapse_to_one_entity() {
        let mut store = DedupStore::new();
        assert_eq!(store.try_admit("Twin Co", "Tower 1"), Some(1));
        assert_eq!(store.try_admit("Twin Co", "Tower 1"), None);
    }

    #[test]
    fn serials_track_admitted_key_count() {
        let mut store = DedupStore::new();
        let attempts = [
            ("A", "x"),
            ("B", "y"),
            ("A", "x"),
            (NO_NAME, "z"),
            ("C", "z"),
            ("B", "y"),
        ];
        let serials: Vec<u64> = attempts
            .iter()
            .filter_map(|(name, address)| store.try_admit(name, address))
            .collect();
        assert_eq!(serials, vec![1, 2, 3]);
        assert_eq!(store.next_serial() - 1, store.len() as u64);
    }
}
