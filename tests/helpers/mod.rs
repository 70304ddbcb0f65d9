//! Test helpers module
//!
//! This module provides utilities and helpers for testing the BannerBot application.
//! It includes a mock Telegram API server, update builders and test context setup.

#![allow(dead_code)]

pub mod telegram_mock;
pub mod test_context;
pub mod test_data;

pub use telegram_mock::*;
pub use test_context::*;
pub use test_data::*;
