//! Services module
//!
//! This module contains business logic services

pub mod banner;
pub mod moderation;
pub mod user;
pub mod wallpaper;

// Re-export commonly used services
pub use banner::{Banner, BannerService};
pub use moderation::ModerationService;
pub use user::{UserService, UserStatsView};
pub use wallpaper::WallpaperService;

use std::sync::Arc;

use crate::config::settings::Settings;
use crate::database::BannerStore;
use crate::engine::Compositor;
use crate::middleware::{AccessFilter, BannerRateLimiter};
use crate::state::FlowStorage;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub store: Arc<dyn BannerStore>,
    pub access: AccessFilter,
    pub user_service: UserService,
    pub moderation_service: ModerationService,
    pub banner_service: BannerService,
    pub wallpaper_service: WallpaperService,
    pub rate_limiter: BannerRateLimiter,
    pub flows: FlowStorage,
    pub settings: Arc<Settings>,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: Settings, store: Arc<dyn BannerStore>, compositor: Arc<Compositor>) -> Result<Self> {
        let access = AccessFilter::new(store.clone(), &settings.bot.admin_ids);
        let rate_limiter = BannerRateLimiter::new(settings.rate_limit.banners_per_hour);
        let wallpaper_service = WallpaperService::new(&settings.wallpaper)?;

        let user_service = UserService::new(store.clone());
        let moderation_service = ModerationService::new(store.clone(), access.clone());
        let banner_service = BannerService::new(
            compositor,
            store.clone(),
            rate_limiter.clone(),
            wallpaper_service.clone(),
            access.clone(),
            settings.rate_limit.admin_exempt,
        );

        Ok(Self {
            store,
            access,
            user_service,
            moderation_service,
            banner_service,
            wallpaper_service,
            rate_limiter,
            flows: FlowStorage::default(),
            settings: Arc::new(settings),
        })
    }

    /// Health check for all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let database_healthy = self.store.ping().await.is_ok();

        ServiceHealthStatus {
            database_healthy,
            wallpaper_enabled: self.wallpaper_service.is_enabled(),
            active_flows: self.flows.active_count().await,
        }
    }

    /// Drop expired flow state and replenished rate-limit entries
    pub async fn cleanup(&self) -> usize {
        self.rate_limiter.cleanup();
        self.flows.cleanup_expired().await
    }
}

/// Health status for all services
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub database_healthy: bool,
    pub wallpaper_enabled: bool,
    pub active_flows: usize,
}

impl ServiceHealthStatus {
    /// Check if all critical services are healthy
    pub fn is_healthy(&self) -> bool {
        self.database_healthy
    }

    /// Get list of unhealthy services
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.database_healthy {
            issues.push("Database ping failed".to_string());
        }

        issues
    }
}
