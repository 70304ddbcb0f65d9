//! Database module
//!
//! This module handles database connections and operations

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod service;
pub mod store;

// Re-export commonly used database components
pub use connection::connect;
pub use memory::MemoryStore;
pub use repositories::{UserRepository, BanRepository, LogRepository};
pub use service::DatabaseService;
pub use store::BannerStore;
