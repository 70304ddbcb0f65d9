//! Ban repository implementation

use bson::doc;
use mongodb::{Collection, Database};
use tracing::instrument;

use crate::database::connection::BANS_COLLECTION;
use crate::models::ban::Ban;
use crate::utils::errors::Result;

#[derive(Clone, Debug)]
pub struct BanRepository {
    collection: Collection<Ban>,
}

impl BanRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(BANS_COLLECTION),
        }
    }

    #[instrument(skip(self))]
    pub async fn is_banned(&self, user_id: i64) -> Result<bool> {
        let found = self.collection.find_one(doc! { "user_id": user_id }).await?;
        Ok(found.is_some())
    }

    /// Store the ban, replacing an earlier one for the same user
    #[instrument(skip(self, ban), fields(user_id = ban.user_id))]
    pub async fn upsert(&self, ban: &Ban) -> Result<()> {
        self.collection
            .replace_one(doc! { "user_id": ban.user_id }, ban)
            .upsert(true)
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: i64) -> Result<bool> {
        let result = self.collection.delete_one(doc! { "user_id": user_id }).await?;
        Ok(result.deleted_count > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }
}
