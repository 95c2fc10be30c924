//! Ordering, dedup and capacity rules for the history list.
//!
//! Shared by the engine (authoritative list) and the presentation cache so both apply
//! exactly the same policy.

use crate::models::HistoryEntry;

/// Put `entry` at the front, dropping any entry with the same text and trimming the tail
/// down to `max_items`.
pub fn insert_front(list: &mut Vec<HistoryEntry>, entry: HistoryEntry, max_items: usize) {
    list.retain(|existing| existing.text != entry.text);
    list.insert(0, entry);
    list.truncate(max_items.max(1));
}

/// Remove the entry with `id`. Returns whether anything was removed.
pub fn remove_by_id(list: &mut Vec<HistoryEntry>, id: &str) -> bool {
    let before = list.len();
    list.retain(|entry| entry.id != id);
    list.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(list: &[HistoryEntry]) -> Vec<&str> {
        list.iter().map(|e| e.text.as_str()).collect()
    }

    #[test]
    fn test_insert_front_orders_newest_first() {
        let mut list = vec![];
        insert_front(&mut list, HistoryEntry::new("a"), 10);
        insert_front(&mut list, HistoryEntry::new("b"), 10);

        assert_eq!(texts(&list), vec!["b", "a"]);
    }

    #[test]
    fn test_insert_front_moves_duplicate() {
        let mut list = vec![];
        insert_front(&mut list, HistoryEntry::new("alpha"), 10);
        insert_front(&mut list, HistoryEntry::new("beta"), 10);
        let again = HistoryEntry::new("alpha");
        let again_id = again.id.clone();
        insert_front(&mut list, again, 10);

        assert_eq!(texts(&list), vec!["alpha", "beta"]);
        assert_eq!(list[0].id, again_id);
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let mut list = vec![];
        insert_front(&mut list, HistoryEntry::new("Hello"), 10);
        insert_front(&mut list, HistoryEntry::new("hello"), 10);
        insert_front(&mut list, HistoryEntry::new("hello "), 10);

        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_truncates_tail() {
        let mut list = vec![];
        for text in ["a", "b", "c"] {
            insert_front(&mut list, HistoryEntry::new(text), 2);
        }

        assert_eq!(texts(&list), vec!["c", "b"]);
    }

    #[test]
    fn test_zero_capacity_keeps_newest() {
        let mut list = vec![HistoryEntry::new("old")];
        insert_front(&mut list, HistoryEntry::new("new"), 0);

        assert_eq!(texts(&list), vec!["new"]);
    }

    #[test]
    fn test_remove_by_id() {
        let mut list = vec![HistoryEntry::new("a"), HistoryEntry::new("b")];
        let id = list[1].id.clone();

        assert!(remove_by_id(&mut list, &id));
        assert_eq!(texts(&list), vec!["a"]);
        assert!(!remove_by_id(&mut list, &id));
        assert_eq!(list.len(), 1);
    }
}
