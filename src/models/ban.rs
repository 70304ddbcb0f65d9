//! Ban model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

pub const DEFAULT_BAN_REASON: &str = "Admin ban";

/// An entry in the `bans` collection; its presence is the only ban signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ban {
    pub user_id: i64,
    pub admin_id: i64,
    pub reason: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub banned_at: DateTime<Utc>,
}

impl Ban {
    pub fn new(user_id: i64, admin_id: i64, reason: Option<String>) -> Self {
        let reason = reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_BAN_REASON.to_string());

        Self {
            user_id,
            admin_id,
            reason,
            banned_at: Utc::now(),
        }
    }
}
