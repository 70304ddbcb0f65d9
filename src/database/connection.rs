//! Database connection management

use std::time::Duration;

use bson::doc;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Database, IndexModel};
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::utils::errors::{BannerBotError, Result};

pub const USERS_COLLECTION: &str = "users";
pub const BANS_COLLECTION: &str = "bans";
pub const LOGS_COLLECTION: &str = "logs";

/// Connect to MongoDB, verify the server answers and make sure indexes exist
pub async fn connect(config: &DatabaseConfig) -> Result<Database> {
    let timeout = Duration::from_secs(config.connect_timeout_seconds);

    let mut options = ClientOptions::parse(config.url.as_str()).await?;
    options.app_name = Some(crate::NAME.to_string());
    options.connect_timeout = Some(timeout);
    options.server_selection_timeout = Some(timeout);
    options.max_pool_size = Some(config.max_pool_size);

    let client = Client::with_options(options)?;
    let database = client.database(&config.name);

    health_check(&database).await.map_err(|e| {
        BannerBotError::StorageUnavailable(format!("MongoDB did not answer ping: {}", e))
    })?;
    info!(database = %config.name, "Connected to MongoDB");

    ensure_indexes(&database).await;
    Ok(database)
}

/// Create the indexes the bot relies on. Failures are logged, not fatal.
pub async fn ensure_indexes(database: &Database) {
    let unique = || IndexOptions::builder().unique(true).build();

    let indexes = [
        (USERS_COLLECTION, IndexModel::builder().keys(doc! { "user_id": 1 }).options(unique()).build()),
        (USERS_COLLECTION, IndexModel::builder().keys(doc! { "last_active": -1 }).build()),
        (USERS_COLLECTION, IndexModel::builder().keys(doc! { "banners_generated": -1 }).build()),
        (BANS_COLLECTION, IndexModel::builder().keys(doc! { "user_id": 1 }).options(unique()).build()),
        (LOGS_COLLECTION, IndexModel::builder().keys(doc! { "timestamp": -1 }).build()),
    ];

    for (collection, index) in indexes {
        if let Err(e) = database
            .collection::<bson::Document>(collection)
            .create_index(index)
            .await
        {
            warn!(collection = collection, error = %e, "Failed to create index");
        }
    }
}

/// Check database health
pub async fn health_check(database: &Database) -> Result<()> {
    database.run_command(doc! { "ping": 1 }).await?;
    Ok(())
}
