//! Audit log repository implementation

use bson::doc;
use futures::TryStreamExt;
use mongodb::{Collection, Database};
use tracing::instrument;

use crate::database::connection::LOGS_COLLECTION;
use crate::models::log_entry::LogEntry;
use crate::utils::errors::Result;

#[derive(Clone, Debug)]
pub struct LogRepository {
    collection: Collection<LogEntry>,
}

impl LogRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(LOGS_COLLECTION),
        }
    }

    #[instrument(skip(self, entry), fields(user_id = entry.user_id, action = %entry.action))]
    pub async fn insert(&self, entry: &LogEntry) -> Result<()> {
        self.collection.insert_one(entry).await?;
        Ok(())
    }

    /// Most recent entries, newest first
    pub async fn recent(&self, limit: usize) -> Result<Vec<LogEntry>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "timestamp": -1 })
            .limit(limit as i64)
            .await?;

        Ok(cursor.try_collect().await?)
    }
}
