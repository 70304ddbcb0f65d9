//! Aggregate statistics shown on dashboards

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotStats {
    pub total_users: u64,
    pub total_banners: u64,
    pub active_24h: u64,
    pub banned_users: u64,
}
