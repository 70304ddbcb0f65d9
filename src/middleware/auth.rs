//! Access control
//! 
//! Every update passes through [`AccessFilter`] before reaching a handler:
//! banned users are stopped here and admin capability is decided here.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::database::BannerStore;
use crate::models::UserProfile;
use crate::utils::errors::{BannerBotError, Result};
use crate::utils::logging::log_access_denied;

/// Outcome of the ban check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny,
}

/// Ban and admin checks backed by the store and the configured admin list
#[derive(Clone)]
pub struct AccessFilter {
    store: Arc<dyn BannerStore>,
    admin_ids: Arc<HashSet<i64>>,
}

impl AccessFilter {
    /// Create a new AccessFilter instance
    pub fn new(store: Arc<dyn BannerStore>, admin_ids: &[i64]) -> Self {
        Self {
            store,
            admin_ids: Arc::new(admin_ids.iter().copied().collect()),
        }
    }

    /// Check if user is an admin
    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admin_ids.contains(&user_id)
    }

    /// `PermissionDenied` unless the user is an admin
    pub fn require_admin(&self, user_id: i64) -> Result<()> {
        if self.is_admin(user_id) {
            debug!(user_id = user_id, "Admin authentication successful");
            Ok(())
        } else {
            warn!(user_id = user_id, "Unauthorized admin access attempt");
            Err(BannerBotError::PermissionDenied("Admin privileges required".to_string()))
        }
    }

    /// Ban check. A failed lookup is returned as an error and the caller
    /// must treat it as a denial.
    pub async fn check(&self, user_id: i64) -> Result<AccessDecision> {
        match self.store.is_banned(user_id).await {
            Ok(true) => {
                log_access_denied(user_id, "banned");
                Ok(AccessDecision::Deny)
            }
            Ok(false) => Ok(AccessDecision::Allow),
            Err(e) => {
                error!(user_id = user_id, error = %e, "Ban lookup failed, rejecting update");
                Err(e)
            }
        }
    }

    /// Ban check followed by a best-effort refresh of the user record
    pub async fn admit(&self, profile: &UserProfile) -> Result<AccessDecision> {
        let decision = self.check(profile.user_id).await?;

        if decision == AccessDecision::Allow {
            if let Err(e) = self.store.get_or_create_user(profile).await {
                warn!(user_id = profile.user_id, error = %e, "Failed to refresh user record");
            }
        }
        Ok(decision)
    }
}
