//! Admin actions: bans, audit log and dashboard numbers

use std::sync::Arc;

use crate::database::BannerStore;
use crate::middleware::AccessFilter;
use crate::models::{actions, Ban, BotStats, LogEntry};
use crate::utils::errors::{BannerBotError, Result};
use crate::utils::logging::log_admin_action;

pub const DEFAULT_LOG_LIMIT: usize = 20;
pub const MAX_LOG_LIMIT: usize = 50;

#[derive(Clone)]
pub struct ModerationService {
    store: Arc<dyn BannerStore>,
    access: AccessFilter,
}

impl ModerationService {
    pub fn new(store: Arc<dyn BannerStore>, access: AccessFilter) -> Self {
        Self { store, access }
    }

    /// Ban `target` on behalf of `admin_id` and record it in the audit log
    pub async fn ban(&self, admin_id: i64, target: i64, reason: Option<String>) -> Result<Ban> {
        self.access.require_admin(admin_id)?;
        if self.access.is_admin(target) {
            return Err(BannerBotError::InvalidInput("Admins cannot be banned.".to_string()));
        }

        let ban = self.store.ban(target, admin_id, reason).await?;
        log_admin_action(admin_id, actions::BAN_USER, Some(target), Some(&ban.reason));

        let details = format!("target={} reason={}", target, ban.reason);
        self.store
            .append_log(LogEntry::new(admin_id, actions::BAN_USER, Some(details)))
            .await?;
        Ok(ban)
    }

    /// Lift a ban; `false` when the user was not banned
    pub async fn unban(&self, admin_id: i64, target: i64) -> Result<bool> {
        self.access.require_admin(admin_id)?;

        let removed = self.store.unban(target).await?;
        log_admin_action(admin_id, actions::UNBAN_USER, Some(target), None);

        if removed {
            self.store
                .append_log(LogEntry::new(admin_id, actions::UNBAN_USER, Some(format!("target={}", target))))
                .await?;
        }
        Ok(removed)
    }

    /// Recent audit entries, newest first
    pub async fn recent_logs(&self, admin_id: i64, limit: Option<usize>) -> Result<Vec<LogEntry>> {
        self.access.require_admin(admin_id)?;
        self.store.list_recent_logs(clamp_log_limit(limit)).await
    }

    pub async fn dashboard(&self, admin_id: i64) -> Result<BotStats> {
        self.access.require_admin(admin_id)?;
        self.store.stats().await
    }
}

/// Default when absent, never zero and never above the maximum
pub fn clamp_log_limit(limit: Option<usize>) -> usize {
    limit.unwrap_or(DEFAULT_LOG_LIMIT).clamp(1, MAX_LOG_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use assert_matches::assert_matches;

    fn service() -> (Arc<MemoryStore>, ModerationService) {
        let store = Arc::new(MemoryStore::new());
        let access = AccessFilter::new(store.clone(), &[1]);
        (store.clone(), ModerationService::new(store, access))
    }

    #[test]
    fn test_clamp_log_limit() {
        assert_eq!(clamp_log_limit(None), DEFAULT_LOG_LIMIT);
        assert_eq!(clamp_log_limit(Some(0)), 1);
        assert_eq!(clamp_log_limit(Some(500)), MAX_LOG_LIMIT);
        assert_eq!(clamp_log_limit(Some(5)), 5);
    }

    #[tokio::test]
    async fn test_ban_writes_entry_and_log() {
        let (store, moderation) = service();
        let ban = moderation.ban(1, 99, None).await.unwrap();

        assert_eq!(ban.reason, "Admin ban");
        assert!(store.is_banned(99).await.unwrap());
        let logs = store.list_recent_logs(10).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].action, actions::BAN_USER);
        assert_eq!(logs[0].user_id, 1);
    }

    #[tokio::test]
    async fn test_non_admin_cannot_ban() {
        let (store, moderation) = service();
        assert_matches!(moderation.ban(2, 99, None).await, Err(BannerBotError::PermissionDenied(_)));
        assert!(!store.is_banned(99).await.unwrap());
    }

    #[tokio::test]
    async fn test_admin_cannot_be_banned() {
        let (_, moderation) = service();
        assert_matches!(moderation.ban(1, 1, None).await, Err(BannerBotError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_unban_reports_missing_ban() {
        let (store, moderation) = service();
        assert!(!moderation.unban(1, 99).await.unwrap());
        moderation.ban(1, 99, Some("spam".into())).await.unwrap();
        assert!(moderation.unban(1, 99).await.unwrap());
        assert!(!store.is_banned(99).await.unwrap());
        assert_eq!(store.list_recent_logs(10).await.unwrap()[0].action, actions::UNBAN_USER);
    }
}
