//! State management module
//! 
//! This module tracks where each user is in the banner creation flow

pub mod flow;
pub mod storage;

// Re-export commonly used state components
pub use flow::{Background, BannerFlow, FlowEvent};
pub use storage::FlowStorage;
