use chrono::{DateTime, Utc};

/// Compact age label for a post: "now" under a minute, then minutes,
/// then hours, then the plain date. Timestamps from the future (clock
/// skew between client and server) read as "now".
pub fn relative_time(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(created_at).num_seconds();
    if diff < 60 {
        "now".to_string()
    } else if diff < 3600 {
        format!("{}m", diff / 60)
    } else if diff < 86400 {
        format!("{}h", diff / 3600)
    } else {
        created_at.format("%b %d, %Y").to_string()
    }
}
