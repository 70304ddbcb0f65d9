//! User service implementation
//! 
//! Registration on first contact, personal statistics and admin lookups.

use std::sync::Arc;

use tracing::{debug, info};

use crate::database::BannerStore;
use crate::models::{BotStats, BotUser, UserProfile};
use crate::utils::errors::Result;
use crate::utils::helpers::{normalize_username, parse_user_id};

/// A user's own numbers next to the global totals
#[derive(Debug, Clone)]
pub struct UserStatsView {
    pub user: BotUser,
    pub global: BotStats,
}

/// User service for managing user operations
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn BannerStore>,
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(store: Arc<dyn BannerStore>) -> Self {
        Self { store }
    }

    /// Register a new user or refresh an existing one
    pub async fn register(&self, profile: &UserProfile) -> Result<BotUser> {
        let user = self.store.get_or_create_user(profile).await?;
        if user.created_at == user.last_active {
            info!(user_id = user.user_id, "New user registered");
        } else {
            debug!(user_id = user.user_id, "Known user refreshed");
        }
        Ok(user)
    }

    /// Stats shown by `/stats`
    pub async fn stats_for(&self, profile: &UserProfile) -> Result<UserStatsView> {
        let user = match self.store.get_user(profile.user_id).await? {
            Some(user) => user,
            None => self.store.get_or_create_user(profile).await?,
        };
        let global = self.store.stats().await?;
        Ok(UserStatsView { user, global })
    }

    /// Look a user up by numeric ID or `@username`
    pub async fn search(&self, query: &str) -> Result<Option<BotUser>> {
        match parse_user_id(query) {
            Some(user_id) => self.store.get_user(user_id).await,
            None => self.store.find_user_by_username(&normalize_username(query)).await,
        }
    }

    pub async fn top(&self, limit: usize) -> Result<Vec<BotUser>> {
        self.store.top_users(limit).await
    }
}
