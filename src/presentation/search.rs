use crate::models::HistoryEntry;

/// Normalize user input the way the list filter expects it (trimmed, lower-cased)
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Case-insensitive substring search over entry text.
///
/// An empty (or whitespace-only) query matches everything. Order is preserved.
pub fn apply_search<'a>(entries: &'a [HistoryEntry], query: &str) -> Vec<&'a HistoryEntry> {
    let query = normalize_query(query);
    if query.is_empty() {
        return entries.iter().collect();
    }

    entries.iter().filter(|entry| entry.text.to_lowercase().contains(&query)).collect()
}
