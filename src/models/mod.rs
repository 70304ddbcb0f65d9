//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod user;
pub mod ban;
pub mod log_entry;
pub mod stats;

// Re-export commonly used models
pub use user::{BotUser, UserProfile};
pub use ban::{Ban, DEFAULT_BAN_REASON};
pub use log_entry::{LogEntry, actions};
pub use stats::BotStats;
