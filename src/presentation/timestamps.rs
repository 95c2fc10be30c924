use chrono::{DateTime, Datelike, Utc};

/// Format an entry age relative to now:
/// - "Just now" under a minute, then "5m ago", "3h ago"
/// - "Yesterday" for one day, "4d ago" up to a week
/// - Absolute beyond that: "Jan 15", or "Dec 3, 2024" in another year
pub fn format_time_ago(timestamp: &DateTime<Utc>) -> String {
    format_time_ago_at(timestamp, &Utc::now())
}

pub fn format_time_ago_at(timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(*timestamp).num_seconds();
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if seconds < 60 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else if days == 1 {
        "Yesterday".to_string()
    } else if days < 7 {
        format!("{}d ago", days)
    } else {
        format_absolute(timestamp, now)
    }
}

fn format_absolute(timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    if timestamp.year() == now.year() {
        timestamp.format("%b %-d").to_string()
    } else {
        timestamp.format("%b %-d, %Y").to_string()
    }
}
