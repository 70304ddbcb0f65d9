//! In-memory storage of per-user flow state
//!
//! Entries idle for longer than the configured TTL read back as
//! [`BannerFlow::Idle`] and are removed by [`FlowStorage::cleanup_expired`].

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use super::flow::{BannerFlow, FlowEvent};
use crate::utils::errors::Result;

#[derive(Debug, Clone, Copy)]
struct FlowEntry {
    flow: BannerFlow,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct FlowStorage {
    flows: Arc<RwLock<HashMap<i64, FlowEntry>>>,
    ttl: Duration,
}

impl Default for FlowStorage {
    fn default() -> Self {
        Self::new(Duration::minutes(30))
    }
}

impl FlowStorage {
    pub fn new(ttl: Duration) -> Self {
        Self {
            flows: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    fn live(&self, entry: &FlowEntry, now: DateTime<Utc>) -> bool {
        now - entry.updated_at < self.ttl
    }

    pub async fn get(&self, user_id: i64) -> BannerFlow {
        let now = Utc::now();
        let flows = self.flows.read().await;
        flows
            .get(&user_id)
            .filter(|entry| self.live(entry, now))
            .map(|entry| entry.flow)
            .unwrap_or_default()
    }

    /// Apply `event` to the user's flow atomically and return the new state.
    /// On an invalid transition the stored state is left untouched.
    pub async fn apply(&self, user_id: i64, event: FlowEvent) -> Result<BannerFlow> {
        let now = Utc::now();
        let mut flows = self.flows.write().await;

        let current = flows
            .get(&user_id)
            .filter(|entry| self.live(entry, now))
            .map(|entry| entry.flow)
            .unwrap_or_default();

        let next = current.apply(event)?;
        debug!(user_id = user_id, from = current.name(), to = next.name(), "Flow transition");

        if next.is_idle() {
            flows.remove(&user_id);
        } else {
            flows.insert(user_id, FlowEntry { flow: next, updated_at: now });
        }
        Ok(next)
    }

    /// Drop the user's flow; returns the state that was active
    pub async fn reset(&self, user_id: i64) -> BannerFlow {
        let now = Utc::now();
        let mut flows = self.flows.write().await;
        flows
            .remove(&user_id)
            .filter(|entry| self.live(entry, now))
            .map(|entry| entry.flow)
            .unwrap_or_default()
    }

    pub async fn active_count(&self) -> usize {
        let now = Utc::now();
        self.flows.read().await.values().filter(|e| self.live(e, now)).count()
    }

    /// Remove expired entries, returning how many were dropped
    pub async fn cleanup_expired(&self) -> usize {
        let now = Utc::now();
        let mut flows = self.flows.write().await;
        let before = flows.len();
        flows.retain(|_, entry| now - entry.updated_at < self.ttl);
        before - flows.len()
    }
}
