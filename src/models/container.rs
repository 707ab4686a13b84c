//! Key-sorted record collection
//!
//! `Container` is the one list type behind every level of the hierarchy:
//! operations in a statement, statements in an account, accounts in a wallet.
//! Two invariants live here and nowhere else:
//!
//! - the item list is always sorted ascending by [`Record::sort_key`];
//!   insertion is an ordered insert, never an append-then-sort, and equal
//!   keys keep insertion order (a new item lands after existing equals)
//! - `synced` is true iff the in-memory list matches the persisted copy;
//!   every mutation clears it, and only storage sets it back

use crate::models::{Record, RecordId};

#[derive(Debug, Clone)]
pub struct Container<T: Record> {
    items: Vec<T>,
    synced: bool,
}

impl<T: Record> Container<T> {
    /// Create an empty container, considered in sync with its (absent) file
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            synced: true,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn find(&self, id: RecordId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn position_of(&self, id: RecordId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// True iff the in-memory list matches the persisted copy
    pub fn is_synced(&self) -> bool {
        self.synced
    }

    pub fn mark_synced(&mut self) {
        self.synced = true;
    }

    pub fn mark_unsynced(&mut self) {
        self.synced = false;
    }

    /// Ordered insert; returns the index the item landed at
    pub fn insert(&mut self, item: T) -> usize {
        let key = item.sort_key();
        let at = self
            .items
            .partition_point(|existing| existing.sort_key() <= key);
        self.items.insert(at, item);
        self.synced = false;
        at
    }

    /// Remove every item whose id is in `ids`, in list order
    ///
    /// Ids with no match are ignored; the sync flag only drops if something
    /// was actually removed.
    pub fn remove_ids(&mut self, ids: &[RecordId]) -> Vec<T> {
        if ids.is_empty() {
            return Vec::new();
        }
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.items.len());
        for item in self.items.drain(..) {
            if ids.contains(&item.id()) {
                removed.push(item);
            } else {
                kept.push(item);
            }
        }
        self.items = kept;
        if !removed.is_empty() {
            self.synced = false;
        }
        removed
    }

    pub fn remove_id(&mut self, id: RecordId) -> Option<T> {
        self.remove_ids(&[id]).into_iter().next()
    }

    /// Apply raw field values to the record with this id
    ///
    /// Returns true if any field actually changed; on change the item is
    /// re-positioned (its key may have moved) and the container goes
    /// unsynced. Unparseable values are dropped field-by-field, the way
    /// [`Record::set_field`] specifies.
    pub fn update(&mut self, id: RecordId, values: &[String]) -> bool {
        let Some(index) = self.position_of(id) else {
            return false;
        };
        let mut edited = false;
        {
            let item = &mut self.items[index];
            for (field_index, raw) in values.iter().enumerate() {
                if item.set_field(field_index, raw) {
                    edited = true;
                }
            }
        }
        if edited {
            self.reposition(id);
            self.synced = false;
        }
        edited
    }

    /// Move one item back to its sorted position after a key edit
    ///
    /// If the item still fits where it sits, it stays put (so a non-key edit
    /// never reorders equal keys). Returns the item's final index.
    pub fn reposition(&mut self, id: RecordId) -> Option<usize> {
        let index = self.position_of(id)?;
        let key = self.items[index].sort_key();
        let fits_left = index == 0 || self.items[index - 1].sort_key() <= key;
        let fits_right = index + 1 == self.items.len() || key <= self.items[index + 1].sort_key();
        if fits_left && fits_right {
            return Some(index);
        }
        let item = self.items.remove(index);
        let at = self
            .items
            .partition_point(|existing| existing.sort_key() <= key);
        self.items.insert(at, item);
        Some(at)
    }

    /// Mutable access to two distinct items at once
    ///
    /// Used when moving records between two siblings in place. Returns None
    /// if the indices coincide or either is out of range.
    pub fn pair_mut(&mut self, i: usize, j: usize) -> Option<(&mut T, &mut T)> {
        if i == j || i >= self.items.len() || j >= self.items.len() {
            return None;
        }
        if i < j {
            let (head, tail) = self.items.split_at_mut(j);
            Some((&mut head[i], &mut tail[0]))
        } else {
            let (head, tail) = self.items.split_at_mut(i);
            Some((&mut tail[0], &mut head[j]))
        }
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Drop all items and mark unsynced (discard before a reload)
    pub fn reset(&mut self) {
        self.items.clear();
        self.synced = false;
    }

    /// In-place iteration for storage bookkeeping; callers must not touch
    /// sort keys through this
    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Regenerate every item's id in place (recursively via `with_new_id`)
    pub(crate) fn refresh_ids(&mut self) {
        for item in &mut self.items {
            *item = item.with_new_id();
        }
    }
}

impl<T: Record> Default for Container<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Operation};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn op(d: &str, description: &str, cents: i64) -> Operation {
        Operation::new(
            date(d),
            "card".into(),
            "shop".into(),
            "misc".into(),
            description.into(),
            Money::from_cents(cents),
        )
    }

    fn dates_of(container: &Container<Operation>) -> Vec<String> {
        container
            .iter()
            .map(|o| o.date.format("%Y-%m-%d").to_string())
            .collect()
    }

    #[test]
    fn test_ordered_insert() {
        let mut c = Container::new();
        c.insert(op("2024-03-01", "third", 1));
        c.insert(op("2024-01-01", "first", 2));
        c.insert(op("2024-02-01", "second", 3));
        assert_eq!(
            dates_of(&c),
            vec!["2024-01-01", "2024-02-01", "2024-03-01"]
        );
    }

    #[test]
    fn test_insert_keeps_list_sorted() {
        let shuffled = [
            "2024-06-05",
            "2024-01-11",
            "2024-09-30",
            "2024-01-11",
            "2024-12-01",
            "2024-03-20",
            "2024-03-19",
            "2024-11-02",
            "2024-01-01",
            "2024-07-14",
        ];
        let mut c = Container::new();
        for (i, d) in shuffled.iter().enumerate() {
            c.insert(op(d, &format!("op{}", i), i as i64));
            let keys: Vec<_> = c.iter().map(|o| o.sort_key()).collect();
            assert!(keys.windows(2).all(|w| w[0] <= w[1]));
        }
        assert_eq!(c.len(), shuffled.len());
    }

    #[test]
    fn test_equal_keys_keep_insertion_order() {
        let mut c = Container::new();
        c.insert(op("2024-05-01", "earlier", 1));
        c.insert(op("2024-05-01", "later", 2));
        let descriptions: Vec<_> = c.iter().map(|o| o.description.clone()).collect();
        assert_eq!(descriptions, vec!["earlier", "later"]);
    }

    #[test]
    fn test_insert_clears_sync() {
        let mut c = Container::new();
        assert!(c.is_synced());
        c.insert(op("2024-01-01", "a", 1));
        assert!(!c.is_synced());
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let mut c = Container::new();
        c.insert(op("2024-01-01", "a", 1));
        c.mark_synced();
        let removed = c.remove_ids(&[RecordId::new()]);
        assert!(removed.is_empty());
        assert_eq!(c.len(), 1);
        assert!(c.is_synced());
    }

    #[test]
    fn test_remove_ids_in_list_order() {
        let mut c = Container::new();
        c.insert(op("2024-03-01", "c", 1));
        c.insert(op("2024-01-01", "a", 2));
        c.insert(op("2024-02-01", "b", 3));
        let ids = vec![c.items()[2].id(), c.items()[0].id()];
        let removed = c.remove_ids(&ids);
        assert_eq!(removed.len(), 2);
        assert_eq!(removed[0].description, "a");
        assert_eq!(removed[1].description, "c");
        assert_eq!(dates_of(&c), vec!["2024-02-01"]);
    }

    #[test]
    fn test_update_moves_item_on_key_change() {
        let mut c = Container::new();
        c.insert(op("2024-01-01", "a", 1));
        c.insert(op("2024-02-01", "b", 2));
        let id = c.items()[0].id();
        let mut values: Vec<String> = (0..6)
            .map(|i| c.items()[0].field(i).unwrap().1)
            .collect();
        values[0] = "2024-03-15".into();
        assert!(c.update(id, &values));
        assert_eq!(dates_of(&c), vec!["2024-02-01", "2024-03-15"]);
    }

    #[test]
    fn test_update_without_change_keeps_sync() {
        let mut c = Container::new();
        c.insert(op("2024-01-01", "a", 1));
        c.mark_synced();
        let id = c.items()[0].id();
        let values: Vec<String> = (0..6)
            .map(|i| c.items()[0].field(i).unwrap().1)
            .collect();
        assert!(!c.update(id, &values));
        assert!(c.is_synced());
    }

    #[test]
    fn test_reposition_keeps_place_among_equal_keys() {
        let mut c = Container::new();
        c.insert(op("2024-05-01", "first", 1));
        c.insert(op("2024-05-01", "second", 2));
        let id = c.items()[0].id();
        assert_eq!(c.reposition(id), Some(0));
        let descriptions: Vec<_> = c.iter().map(|o| o.description.clone()).collect();
        assert_eq!(descriptions, vec!["first", "second"]);
    }

    #[test]
    fn test_pair_mut() {
        let mut c = Container::new();
        c.insert(op("2024-01-01", "a", 1));
        c.insert(op("2024-02-01", "b", 2));
        c.insert(op("2024-03-01", "c", 3));

        let (x, y) = c.pair_mut(0, 2).unwrap();
        assert_eq!(x.description, "a");
        assert_eq!(y.description, "c");

        let (x, y) = c.pair_mut(2, 0).unwrap();
        assert_eq!(x.description, "c");
        assert_eq!(y.description, "a");

        assert!(c.pair_mut(1, 1).is_none());
        assert!(c.pair_mut(0, 3).is_none());
    }

    #[test]
    fn test_reset_marks_unsynced() {
        let mut c = Container::new();
        c.insert(op("2024-01-01", "a", 1));
        c.mark_synced();
        c.reset();
        assert!(c.is_empty());
        assert!(!c.is_synced());
    }
}
