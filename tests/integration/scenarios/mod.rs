//! End-to-end user scenarios

pub mod admin_test;
pub mod ban_test;
pub mod banner_flow_test;
pub mod telegram_plumbing_test;
