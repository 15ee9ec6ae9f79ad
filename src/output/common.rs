//! Common utilities for output formatters

use chrono::{DateTime, Utc};

/// Render a timestamp relative to now ("5 minutes ago")
pub fn time_ago(time: Option<&DateTime<Utc>>) -> String {
    match time {
        Some(t) => time_ago_from(t, Utc::now()),
        None => String::new(),
    }
}

fn time_ago_from(time: &DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(*time);
    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("1 {} ago", unit)
        } else {
            format!("{} {}s ago", n, unit)
        }
    };

    if elapsed.num_seconds() < 60 {
        "just now".to_string()
    } else if elapsed.num_minutes() < 60 {
        plural(elapsed.num_minutes(), "minute")
    } else if elapsed.num_hours() < 24 {
        plural(elapsed.num_hours(), "hour")
    } else if elapsed.num_days() < 30 {
        plural(elapsed.num_days(), "day")
    } else if elapsed.num_days() < 365 {
        plural(elapsed.num_days() / 30, "month")
    } else {
        plural(elapsed.num_days() / 365, "year")
    }
}

/// RFC3339 rendering, empty for unknown timestamps
pub fn rfc3339(time: Option<&DateTime<Utc>>) -> String {
    time.map(|t| t.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
        .unwrap_or_default()
}

/// Truncate to `max_chars` characters, appending "..." when cut
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let cut: String = s.chars().take(max_chars).collect();
        format!("{}...", cut)
    } else {
        s.to_string()
    }
}

/// Placeholder for empty context values
pub fn or_not_set(value: &str) -> &str {
    if value.is_empty() {
        "<not set>"
    } else {
        value
    }
}
