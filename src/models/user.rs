//! User model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// A Telegram user as stored in the `users` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotUser {
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    #[serde(default)]
    pub banners_generated: u64,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub last_active: DateTime<Utc>,
}

/// Identity fields taken from an incoming update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

impl UserProfile {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            username: None,
            first_name: None,
        }
    }

    pub fn from_telegram(user: &teloxide::types::User) -> Self {
        Self {
            user_id: user.id.0 as i64,
            username: user.username.clone(),
            first_name: Some(user.first_name.clone()),
        }
    }

    pub fn display_name(&self) -> String {
        crate::utils::helpers::display_name(self.username.as_deref(), self.first_name.as_deref())
    }
}

impl BotUser {
    /// Fresh record for a user seen for the first time
    pub fn new(profile: &UserProfile, now: DateTime<Utc>) -> Self {
        Self {
            user_id: profile.user_id,
            username: profile.username.clone(),
            first_name: profile.first_name.clone(),
            banners_generated: 0,
            created_at: now,
            last_active: now,
        }
    }

    pub fn display_name(&self) -> String {
        crate::utils::helpers::display_name(self.username.as_deref(), self.first_name.as_deref())
    }
}
