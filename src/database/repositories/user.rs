//! User repository implementation

use bson::{doc, Bson, Document};
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use tracing::instrument;

use crate::database::connection::USERS_COLLECTION;
use crate::models::user::{BotUser, UserProfile};
use crate::utils::errors::{BannerBotError, Result};

#[derive(Clone, Debug)]
pub struct UserRepository {
    collection: Collection<BotUser>,
}

impl UserRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(USERS_COLLECTION),
        }
    }

    /// Insert the user on first sight, otherwise refresh names and `last_active`
    #[instrument(skip(self))]
    pub async fn upsert(&self, profile: &UserProfile) -> Result<BotUser> {
        let now = bson::DateTime::from_chrono(Utc::now());

        let user = self
            .collection
            .find_one_and_update(
                doc! { "user_id": profile.user_id },
                doc! {
                    "$set": {
                        "username": profile.username.clone(),
                        "first_name": profile.first_name.clone(),
                        "last_active": now,
                    },
                    "$setOnInsert": {
                        "banners_generated": 0_i64,
                        "created_at": now,
                    },
                },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?;

        user.ok_or_else(|| {
            BannerBotError::StorageUnavailable(format!("Upsert returned no document for user {}", profile.user_id))
        })
    }

    /// Find user by Telegram ID
    #[instrument(skip(self))]
    pub async fn find_by_user_id(&self, user_id: i64) -> Result<Option<BotUser>> {
        Ok(self.collection.find_one(doc! { "user_id": user_id }).await?)
    }

    /// Find user by username, ignoring case
    #[instrument(skip(self))]
    pub async fn find_by_username(&self, username: &str) -> Result<Option<BotUser>> {
        let username = username.trim().trim_start_matches('@');
        if username.is_empty() {
            return Ok(None);
        }

        let pattern = bson::Regex {
            pattern: format!("^{}$", regex::escape(username)),
            options: "i".to_string(),
        };
        Ok(self.collection.find_one(doc! { "username": pattern }).await?)
    }

    /// Increment the banner counter, creating the record if it is missing
    #[instrument(skip(self))]
    pub async fn increment_banner_count(&self, user_id: i64) -> Result<u64> {
        let now = bson::DateTime::from_chrono(Utc::now());

        let user = self
            .collection
            .find_one_and_update(
                doc! { "user_id": user_id },
                doc! {
                    "$inc": { "banners_generated": 1_i64 },
                    "$set": { "last_active": now },
                    "$setOnInsert": { "created_at": now },
                },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?;

        user.map(|u| u.banners_generated).ok_or_else(|| {
            BannerBotError::StorageUnavailable(format!("Increment returned no document for user {}", user_id))
        })
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }

    /// Count users seen since the given moment
    pub async fn count_active_since(&self, since: DateTime<Utc>) -> Result<u64> {
        let filter = doc! { "last_active": { "$gte": bson::DateTime::from_chrono(since) } };
        Ok(self.collection.count_documents(filter).await?)
    }

    /// Sum of all banner counters
    pub async fn total_banners(&self) -> Result<u64> {
        let pipeline = vec![doc! {
            "$group": { "_id": Bson::Null, "total": { "$sum": "$banners_generated" } }
        }];

        let mut cursor = self.collection.aggregate(pipeline).await?;
        match cursor.try_next().await? {
            Some(row) => Ok(sum_field(&row, "total")),
            None => Ok(0),
        }
    }

    #[instrument(skip(self))]
    pub async fn top(&self, limit: usize) -> Result<Vec<BotUser>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "banners_generated": -1, "user_id": 1 })
            .limit(limit as i64)
            .await?;

        Ok(cursor.try_collect().await?)
    }
}

/// `$sum` yields an int32, int64 or double depending on the inputs
fn sum_field(row: &Document, key: &str) -> u64 {
    match row.get(key) {
        Some(Bson::Int32(n)) => (*n).max(0) as u64,
        Some(Bson::Int64(n)) => (*n).max(0) as u64,
        Some(Bson::Double(n)) if *n > 0.0 => *n as u64,
        _ => 0,
    }
}
