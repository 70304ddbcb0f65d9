//! In-process implementation of [`BannerStore`]
//!
//! Used by tests and for running the bot locally without MongoDB. Data is
//! lost when the process exits.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use crate::database::store::BannerStore;
use crate::models::{Ban, BotStats, BotUser, LogEntry, UserProfile};
use crate::utils::errors::{BannerBotError, Result};

#[derive(Debug, Default)]
struct Collections {
    users: HashMap<i64, BotUser>,
    bans: HashMap<i64, Ban>,
    logs: Vec<LogEntry>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation fail as if the database were unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(BannerBotError::StorageUnavailable("memory store switched off".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BannerStore for MemoryStore {
    async fn get_or_create_user(&self, profile: &UserProfile) -> Result<BotUser> {
        self.check_available()?;
        let now = Utc::now();
        let mut inner = self.inner.write().await;

        let user = inner
            .users
            .entry(profile.user_id)
            .or_insert_with(|| BotUser::new(profile, now));
        user.username = profile.username.clone();
        user.first_name = profile.first_name.clone();
        user.last_active = now;

        Ok(user.clone())
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<BotUser>> {
        self.check_available()?;
        Ok(self.inner.read().await.users.get(&user_id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<BotUser>> {
        self.check_available()?;
        let wanted = username.trim().trim_start_matches('@');
        if wanted.is_empty() {
            return Ok(None);
        }

        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|u| u.username.as_deref().is_some_and(|name| name.eq_ignore_ascii_case(wanted)))
            .cloned())
    }

    async fn increment_banner_count(&self, user_id: i64) -> Result<u64> {
        self.check_available()?;
        let now = Utc::now();
        let mut inner = self.inner.write().await;

        let user = inner
            .users
            .entry(user_id)
            .or_insert_with(|| BotUser::new(&UserProfile::new(user_id), now));
        user.banners_generated += 1;
        user.last_active = now;

        Ok(user.banners_generated)
    }

    async fn is_banned(&self, user_id: i64) -> Result<bool> {
        self.check_available()?;
        Ok(self.inner.read().await.bans.contains_key(&user_id))
    }

    async fn ban(&self, user_id: i64, admin_id: i64, reason: Option<String>) -> Result<Ban> {
        self.check_available()?;
        let ban = Ban::new(user_id, admin_id, reason);
        self.inner.write().await.bans.insert(user_id, ban.clone());
        Ok(ban)
    }

    async fn unban(&self, user_id: i64) -> Result<bool> {
        self.check_available()?;
        Ok(self.inner.write().await.bans.remove(&user_id).is_some())
    }

    async fn append_log(&self, entry: LogEntry) -> Result<()> {
        self.check_available()?;
        self.inner.write().await.logs.push(entry);
        Ok(())
    }

    async fn list_recent_logs(&self, limit: usize) -> Result<Vec<LogEntry>> {
        self.check_available()?;
        let inner = self.inner.read().await;
        Ok(inner.logs.iter().rev().take(limit).cloned().collect())
    }

    async fn user_count(&self) -> Result<u64> {
        self.check_available()?;
        Ok(self.inner.read().await.users.len() as u64)
    }

    async fn ban_count(&self) -> Result<u64> {
        self.check_available()?;
        Ok(self.inner.read().await.bans.len() as u64)
    }

    async fn top_users(&self, limit: usize) -> Result<Vec<BotUser>> {
        self.check_available()?;
        let inner = self.inner.read().await;
        let mut users: Vec<BotUser> = inner.users.values().cloned().collect();
        users.sort_by(|a, b| {
            b.banners_generated
                .cmp(&a.banners_generated)
                .then(a.user_id.cmp(&b.user_id))
        });
        users.truncate(limit);
        Ok(users)
    }

    async fn stats(&self) -> Result<BotStats> {
        self.check_available()?;
        let since = Utc::now() - Duration::hours(24);
        let inner = self.inner.read().await;

        Ok(BotStats {
            total_users: inner.users.len() as u64,
            total_banners: inner.users.values().map(|u| u.banners_generated).sum(),
            active_24h: inner.users.values().filter(|u| u.last_active >= since).count() as u64,
            banned_users: inner.bans.len() as u64,
        })
    }

    async fn ping(&self) -> Result<()> {
        self.check_available()
    }
}
