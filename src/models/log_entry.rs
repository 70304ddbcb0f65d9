//! Audit log model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Action names written to the `logs` collection
pub mod actions {
    pub const BANNER_CREATED: &str = "banner_created";
    pub const BAN_USER: &str = "ban_user";
    pub const UNBAN_USER: &str = "unban_user";
}

/// Immutable audit record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub user_id: i64,
    pub action: String,
    pub details: Option<String>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    pub fn new(user_id: i64, action: impl Into<String>, details: Option<String>) -> Self {
        Self {
            user_id,
            action: action.into(),
            details,
            timestamp: Utc::now(),
        }
    }
}
