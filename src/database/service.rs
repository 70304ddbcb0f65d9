//! Database service layer
//! 
//! This module provides a high-level interface to database operations

use std::time::Instant;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use mongodb::Database;

use crate::database::connection;
use crate::database::repositories::{BanRepository, LogRepository, UserRepository};
use crate::database::store::BannerStore;
use crate::models::{Ban, BotStats, BotUser, LogEntry, UserProfile};
use crate::utils::errors::Result;
use crate::utils::logging::log_database_operation;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    database: Database,
    pub users: UserRepository,
    pub bans: BanRepository,
    pub logs: LogRepository,
}

impl DatabaseService {
    pub fn new(database: Database) -> Self {
        Self {
            users: UserRepository::new(&database),
            bans: BanRepository::new(&database),
            logs: LogRepository::new(&database),
            database,
        }
    }
}

#[async_trait]
impl BannerStore for DatabaseService {
    async fn get_or_create_user(&self, profile: &UserProfile) -> Result<BotUser> {
        let started = Instant::now();
        let result = self.users.upsert(profile).await;
        log_database_operation("upsert", connection::USERS_COLLECTION, started.elapsed().as_millis() as u64, result.is_ok());
        result
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<BotUser>> {
        self.users.find_by_user_id(user_id).await
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<BotUser>> {
        self.users.find_by_username(username).await
    }

    async fn increment_banner_count(&self, user_id: i64) -> Result<u64> {
        let started = Instant::now();
        let result = self.users.increment_banner_count(user_id).await;
        log_database_operation("increment", connection::USERS_COLLECTION, started.elapsed().as_millis() as u64, result.is_ok());
        result
    }

    async fn is_banned(&self, user_id: i64) -> Result<bool> {
        self.bans.is_banned(user_id).await
    }

    async fn ban(&self, user_id: i64, admin_id: i64, reason: Option<String>) -> Result<Ban> {
        let ban = Ban::new(user_id, admin_id, reason);
        self.bans.upsert(&ban).await?;
        Ok(ban)
    }

    async fn unban(&self, user_id: i64) -> Result<bool> {
        self.bans.delete(user_id).await
    }

    async fn append_log(&self, entry: LogEntry) -> Result<()> {
        let started = Instant::now();
        let result = self.logs.insert(&entry).await;
        log_database_operation("insert", connection::LOGS_COLLECTION, started.elapsed().as_millis() as u64, result.is_ok());
        result
    }

    async fn list_recent_logs(&self, limit: usize) -> Result<Vec<LogEntry>> {
        self.logs.recent(limit).await
    }

    async fn user_count(&self) -> Result<u64> {
        self.users.count().await
    }

    async fn ban_count(&self) -> Result<u64> {
        self.bans.count().await
    }

    async fn top_users(&self, limit: usize) -> Result<Vec<BotUser>> {
        self.users.top(limit).await
    }

    async fn stats(&self) -> Result<BotStats> {
        let (total_users, total_banners, active_24h, banned_users) = futures::try_join!(
            self.users.count(),
            self.users.total_banners(),
            self.users.count_active_since(Utc::now() - Duration::hours(24)),
            self.bans.count(),
        )?;

        Ok(BotStats {
            total_users,
            total_banners,
            active_24h,
            banned_users,
        })
    }

    async fn ping(&self) -> Result<()> {
        connection::health_check(&self.database).await
    }
}
