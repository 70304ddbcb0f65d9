//! Database repositories module
//! 
//! This module contains all repository implementations for data access

pub mod user;
pub mod ban;
pub mod log;

// Re-export repositories
pub use user::UserRepository;
pub use ban::BanRepository;
pub use log::LogRepository;
