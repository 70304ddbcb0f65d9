//! Storage abstraction used by services and the access filter

use async_trait::async_trait;

use crate::models::{Ban, BotStats, BotUser, LogEntry, UserProfile};
use crate::utils::errors::Result;

/// Everything the bot needs from persistence.
///
/// `DatabaseService` implements this on top of MongoDB and `MemoryStore`
/// keeps the same contract in process memory.
#[async_trait]
pub trait BannerStore: Send + Sync {
    /// Upsert a user, refreshing names and `last_active`, and return the stored record
    async fn get_or_create_user(&self, profile: &UserProfile) -> Result<BotUser>;

    async fn get_user(&self, user_id: i64) -> Result<Option<BotUser>>;

    /// Case-insensitive lookup, with or without the leading `@`
    async fn find_user_by_username(&self, username: &str) -> Result<Option<BotUser>>;

    /// Atomically add one to the user's banner counter and return the new value
    async fn increment_banner_count(&self, user_id: i64) -> Result<u64>;

    async fn is_banned(&self, user_id: i64) -> Result<bool>;

    /// Create or replace the ban entry for `user_id`
    async fn ban(&self, user_id: i64, admin_id: i64, reason: Option<String>) -> Result<Ban>;

    /// Remove the ban entry; `false` when the user was not banned
    async fn unban(&self, user_id: i64) -> Result<bool>;

    async fn append_log(&self, entry: LogEntry) -> Result<()>;

    /// Newest entries first
    async fn list_recent_logs(&self, limit: usize) -> Result<Vec<LogEntry>>;

    async fn user_count(&self) -> Result<u64>;

    async fn ban_count(&self) -> Result<u64>;

    /// Users ordered by banners generated, highest first
    async fn top_users(&self, limit: usize) -> Result<Vec<BotUser>>;

    async fn stats(&self) -> Result<BotStats>;

    async fn ping(&self) -> Result<()>;
}
