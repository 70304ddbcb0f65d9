//! Error handling for BannerBot
//!
//! This module defines the main error type used throughout the application
//! and maps every failure onto a message that is safe to show to users.

use thiserror::Error;

/// Main error type for BannerBot application
#[derive(Error, Debug)]
pub enum BannerBotError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid template: {template_id}")]
    InvalidTemplate { template_id: i64 },

    #[error("Input too long: {length} characters (max {max})")]
    InputTooLong { length: usize, max: usize },

    #[error("Render error: {0}")]
    Render(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for BannerBot operations
pub type Result<T> = std::result::Result<T, BannerBotError>;

impl From<config::ConfigError> for BannerBotError {
    fn from(error: config::ConfigError) -> Self {
        BannerBotError::Config(error.to_string())
    }
}

impl BannerBotError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BannerBotError::Config(_) => ErrorSeverity::Critical,
            BannerBotError::Database(_) => ErrorSeverity::Error,
            BannerBotError::StorageUnavailable(_) => ErrorSeverity::Error,
            BannerBotError::PermissionDenied(_) => ErrorSeverity::Warning,
            BannerBotError::RateLimitExceeded => ErrorSeverity::Warning,
            BannerBotError::InvalidInput(_) => ErrorSeverity::Info,
            BannerBotError::InvalidTemplate { .. } => ErrorSeverity::Info,
            BannerBotError::InputTooLong { .. } => ErrorSeverity::Info,
            BannerBotError::InvalidStateTransition { .. } => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// The user sent something we can't work with and may simply retry
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            BannerBotError::InvalidInput(_) | BannerBotError::InputTooLong { .. } | BannerBotError::InvalidTemplate { .. }
        )
    }

    /// Whether the persistence layer could not serve the request
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, BannerBotError::Database(_) | BannerBotError::StorageUnavailable(_))
    }

    /// Text shown to the user when a request fails.
    ///
    /// Never includes the underlying error description.
    pub fn user_message(&self) -> String {
        match self {
            BannerBotError::Database(_) | BannerBotError::StorageUnavailable(_) => {
                "⚠️ Service temporarily unavailable, please try again later.".to_string()
            }
            BannerBotError::PermissionDenied(_) => "🔒 Admin only".to_string(),
            BannerBotError::InvalidTemplate { template_id } => {
                format!("❌ Template {} does not exist. Pick one of the buttons below.", template_id)
            }
            BannerBotError::InputTooLong { length, max } => {
                format!("❌ Text is too long ({} characters). Keep it under {} characters and send it again.", length, max)
            }
            BannerBotError::InvalidInput(reason) => format!("❌ {}", reason),
            BannerBotError::RateLimitExceeded => {
                "⏳ You are creating banners too fast. Please wait a while and try again.".to_string()
            }
            BannerBotError::InvalidStateTransition { .. } => {
                "Use /new_banner to start creating a banner.".to_string()
            }
            _ => "❌ Something went wrong while processing your request. Please try again.".to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
