//! Presentation-side helpers shared by the TUI and the CLI.
//!
//! Nothing here writes to the store: [`HistoryView`] is a read-only cache kept in sync by
//! engine events, and search runs over that cache.

pub mod search;
pub mod timestamps;
pub mod view;

pub use search::{apply_search, normalize_query};
pub use timestamps::{format_time_ago, format_time_ago_at};
pub use view::{HistoryView, entry_meta, item_count_label};
