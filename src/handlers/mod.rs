//! Bot handlers module
//!
//! This module contains all Telegram bot handlers organized by type:
//! - Command handlers for bot commands
//! - Callback handlers for inline keyboard interactions
//! - Message handlers for caption text
//!
//! The access gate runs before any of them.

pub mod access;
pub mod callbacks;
pub mod commands;
pub mod keyboards;
pub mod messages;

pub use access::{access_gate, BANNED_NOTICE};
pub use callbacks::handle_callback_query;
pub use commands::{handle_command, Command};
pub use messages::handle_message;

use teloxide::prelude::*;
use tracing::{debug, error, warn};

use crate::utils::errors::{BannerBotError, ErrorSeverity};

/// Reply with the user-safe text for `error` and log it by severity
pub async fn report_error(bot: &Bot, chat_id: ChatId, user_id: Option<i64>, error: &BannerBotError) {
    match error.severity() {
        ErrorSeverity::Info => debug!(user_id = ?user_id, error = %error, "Request rejected"),
        ErrorSeverity::Warning => warn!(user_id = ?user_id, error = %error, "Request refused"),
        ErrorSeverity::Error | ErrorSeverity::Critical => {
            error!(user_id = ?user_id, error = %error, "Request failed")
        }
    }

    if let Err(e) = bot.send_message(chat_id, error.user_message()).await {
        warn!(chat_id = chat_id.0, error = %e, "Failed to deliver error reply");
    }
}
