/// Formatting helpers for the dashboard and CLI output

use chrono::{DateTime, Local, TimeZone, Utc};
use std::time::Duration;

use super::constants::CLOCK_FORMAT;

/// Value as shown in the tooltip, e.g. `$123.45`
pub fn format_price(value: f64) -> String {
    format!("${:.2}", value)
}

/// Wall-clock time in the local timezone
pub fn format_clock(t: DateTime<Utc>) -> String {
    format_clock_in(t, &Local)
}

pub fn format_clock_in<Tz: TimeZone>(t: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    t.with_timezone(tz).format(CLOCK_FORMAT).to_string()
}

/// Format duration as human-readable string
pub fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

/// Time elapsed since `t`, e.g. `3s ago`
pub fn format_age(t: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = now.signed_duration_since(t).num_seconds().max(0) as u64;
    format!("{} ago", format_duration(secs))
}

/// Parse a human duration such as `1s`, `500ms` or `2m`
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let duration = humantime::parse_duration(s.trim()).map_err(|e| e.to_string())?;
    if duration.is_zero() {
        return Err("duration must be greater than zero".to_string());
    }
    Ok(duration)
}

/// Truncate string with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
