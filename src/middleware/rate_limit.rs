//! Rate limiting middleware
//! 
//! Per-user quota on banner generation, backed by a keyed GCRA limiter.

use std::num::NonZeroU32;
use std::sync::Arc;

use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use tracing::{debug, warn};

use crate::utils::errors::{BannerBotError, Result};

/// Limits how many banners one user can generate per hour
#[derive(Clone)]
pub struct BannerRateLimiter {
    limiter: Arc<DefaultKeyedRateLimiter<i64>>,
    per_hour: u32,
}

impl BannerRateLimiter {
    pub fn new(banners_per_hour: u32) -> Self {
        let per_hour = NonZeroU32::new(banners_per_hour).unwrap_or(NonZeroU32::MIN);
        Self {
            limiter: Arc::new(RateLimiter::keyed(Quota::per_hour(per_hour))),
            per_hour: per_hour.get(),
        }
    }

    pub fn per_hour(&self) -> u32 {
        self.per_hour
    }

    /// Consume one unit of the user's quota
    pub fn check(&self, user_id: i64) -> Result<()> {
        match self.limiter.check_key(&user_id) {
            Ok(()) => {
                debug!(user_id = user_id, "Rate limit check passed");
                Ok(())
            }
            Err(_) => {
                warn!(user_id = user_id, limit = self.per_hour, "Banner rate limit exceeded");
                Err(BannerBotError::RateLimitExceeded)
            }
        }
    }

    /// Forget users whose quota has fully replenished
    pub fn cleanup(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }
}
