//! Helper functions and utilities
//! 
//! This module contains common helper functions used throughout the application.

use std::sync::OnceLock;

use chrono::{DateTime, Utc, Duration};
use regex::Regex;

/// Format a timestamp for display
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Format a timestamp for user display (relative time)
pub fn format_relative_time(timestamp: DateTime<Utc>) -> String {
    let now = Utc::now();
    let diff = now.signed_duration_since(timestamp);
    
    if diff < Duration::minutes(1) {
        "just now".to_string()
    } else if diff < Duration::hours(1) {
        format!("{} minutes ago", diff.num_minutes())
    } else if diff < Duration::days(1) {
        format!("{} hours ago", diff.num_hours())
    } else if diff < Duration::weeks(1) {
        format!("{} days ago", diff.num_days())
    } else {
        format_timestamp(timestamp)
    }
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Escape text for Telegram HTML parse mode
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex"))
}

/// Trim a caption and collapse every run of whitespace, newlines included,
/// into a single space.
pub fn sanitize_caption(text: &str) -> String {
    whitespace_run().replace_all(text.trim(), " ").into_owned()
}

/// Length of a caption as the user perceives it
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Parse a user reference from a command argument.
///
/// Accepts a numeric ID or a `tg://user?id=` link. Usernames need a
/// database lookup and yield `None` here.
pub fn parse_user_id(text: &str) -> Option<i64> {
    let text = text.trim();
    if text.starts_with('@') {
        None
    } else if let Some(id_str) = text.strip_prefix("tg://user?id=") {
        id_str.parse::<i64>().ok()
    } else {
        text.parse::<i64>().ok()
    }
}

/// Strip a leading `@` from a username argument
pub fn normalize_username(text: &str) -> String {
    text.trim().trim_start_matches('@').to_string()
}

/// Human readable name for a user: `@username` when known, otherwise the first name
pub fn display_name(username: Option<&str>, first_name: Option<&str>) -> String {
    match (username, first_name) {
        (Some(username), _) if !username.is_empty() => format!("@{}", username),
        (_, Some(first_name)) if !first_name.is_empty() => first_name.to_string(),
        _ => "unknown".to_string(),
    }
}

/// Convert bytes to human readable format
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;
    
    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }
    
    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
