//! Middleware module
//! 
//! This module contains the checks every update goes through before a handler runs

pub mod auth;
pub mod rate_limit;

// Re-export commonly used middleware
pub use auth::{AccessDecision, AccessFilter};
pub use rate_limit::BannerRateLimiter;
