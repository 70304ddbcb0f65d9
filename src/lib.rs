//! BannerBot Telegram Bot
//!
//! A Telegram bot that renders short captions onto a fixed set of background
//! templates, with MongoDB persistence, admin moderation and a keep-alive
//! HTTP server.

#![allow(non_snake_case)]

pub mod config;
pub mod database;
pub mod engine;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod server;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{BannerBotError, Result};

// Re-export main components for easy access
pub use database::{BannerStore, DatabaseService, MemoryStore};
pub use engine::Compositor;
pub use services::ServiceFactory;
pub use state::{BannerFlow, FlowStorage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
