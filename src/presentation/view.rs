use super::search::apply_search;
use super::timestamps::format_time_ago;
use crate::engine::HistoryEvent;
use crate::engine::policy::insert_front;
use crate::models::HistoryEntry;

/// Read-only cached copy of the history list, kept in sync through engine events
#[derive(Debug, Clone, Default)]
pub struct HistoryView {
    entries: Vec<HistoryEntry>,
    max_items: usize,
}

impl HistoryView {
    pub fn new(entries: Vec<HistoryEntry>, max_items: usize) -> Self {
        Self { entries, max_items }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply a notification from the engine
    pub fn apply(&mut self, event: HistoryEvent) {
        match event {
            HistoryEvent::ClipboardChanged(entry) => {
                insert_front(&mut self.entries, entry, self.max_items)
            }
            HistoryEvent::HistoryUpdated(entries) => self.replace(entries),
        }
    }

    /// Replace the cache with a list returned by an engine call
    pub fn replace(&mut self, entries: Vec<HistoryEntry>) {
        self.entries = entries;
    }

    pub fn set_max_items(&mut self, max_items: usize) {
        self.max_items = max_items;
    }

    /// Entries matching `query`, in list order
    pub fn filtered(&self, query: &str) -> Vec<&HistoryEntry> {
        apply_search(&self.entries, query)
    }
}

/// "1 item" / "N items"
pub fn item_count_label(count: usize) -> String {
    format!("{} item{}", count, if count == 1 { "" } else { "s" })
}

/// Secondary line shown under an entry: "5m ago · 42 chars"
pub fn entry_meta(entry: &HistoryEntry) -> String {
    format!("{} · {} chars", format_time_ago(&entry.timestamp), entry.char_count())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(view: &HistoryView) -> Vec<&str> {
        view.entries().iter().map(|e| e.text.as_str()).collect()
    }

    #[test]
    fn test_clipboard_changed_prepends() {
        let mut view = HistoryView::new(vec![HistoryEntry::new("old")], 50);

        view.apply(HistoryEvent::ClipboardChanged(HistoryEntry::new("new")));

        assert_eq!(texts(&view), vec!["new", "old"]);
    }

    #[test]
    fn test_clipboard_changed_dedups_and_caps() {
        let mut view = HistoryView::new(vec![HistoryEntry::new("b"), HistoryEntry::new("a")], 2);

        view.apply(HistoryEvent::ClipboardChanged(HistoryEntry::new("a")));
        assert_eq!(texts(&view), vec!["a", "b"]);

        view.apply(HistoryEvent::ClipboardChanged(HistoryEntry::new("c")));
        assert_eq!(texts(&view), vec!["c", "a"]);
    }

    #[test]
    fn test_history_updated_replaces() {
        let mut view = HistoryView::new(vec![HistoryEntry::new("a")], 50);

        view.apply(HistoryEvent::HistoryUpdated(vec![]));

        assert!(view.is_empty());
    }

    #[test]
    fn test_filtered_does_not_mutate() {
        let view = HistoryView::new(vec![HistoryEntry::new("apple"), HistoryEntry::new("pear")], 50);

        assert_eq!(view.filtered("APP").len(), 1);
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn test_item_count_label() {
        assert_eq!(item_count_label(0), "0 items");
        assert_eq!(item_count_label(1), "1 item");
        assert_eq!(item_count_label(2), "2 items");
    }

    #[test]
    fn test_entry_meta() {
        let entry = HistoryEntry::new("twelve chars");
        assert_eq!(entry_meta(&entry), "Just now · 12 chars");
    }
}
