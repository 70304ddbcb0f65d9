//! Command handlers module
//!
//! This module contains handlers for all bot commands like /start, /help, etc.

pub mod admin;
pub mod banner;
pub mod start;
pub mod stats;

use teloxide::{prelude::*, types::Message, utils::command::BotCommands, Bot};
use tracing::debug;

use crate::models::UserProfile;
use crate::services::ServiceFactory;
use crate::utils::errors::{BannerBotError, Result};

/// All available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "snake_case", description = "BannerBot commands:")]
pub enum Command {
    #[command(description = "Start the bot and show the main menu")]
    Start,
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Create a new banner")]
    NewBanner,
    #[command(description = "Cancel the current banner")]
    Cancel,
    #[command(description = "Show your banner statistics")]
    Stats,
    #[command(description = "Admin dashboard (admin only)")]
    Admin,
    #[command(description = "Ban a user: /ban_user <id> [reason] (admin only)")]
    BanUser(String),
    #[command(description = "Unban a user: /unban_user <id> (admin only)")]
    UnbanUser(String),
    #[command(description = "Show recent log entries: /logs [n] (admin only)")]
    Logs(String),
    #[command(description = "Find a user by ID or @username (admin only)")]
    SearchUser(String),
    #[command(description = "Show the most active users (admin only)")]
    Top,
}

impl Command {
    /// Commands that manage the banner flow themselves
    fn keeps_flow(&self) -> bool {
        matches!(self, Command::NewBanner | Command::Cancel)
    }
}

/// Sender of a message as a profile, or an error for channel posts
pub(crate) fn sender(msg: &Message) -> Result<UserProfile> {
    msg.from
        .as_ref()
        .map(UserProfile::from_telegram)
        .ok_or_else(|| BannerBotError::InvalidInput("No user in message".to_string()))
}

/// Main command dispatcher
pub async fn handle_command(bot: Bot, msg: Message, cmd: Command, services: ServiceFactory) -> Result<()> {
    let profile = sender(&msg)?;

    if !cmd.keeps_flow() {
        let previous = services.flows.reset(profile.user_id).await;
        if !previous.is_idle() {
            debug!(user_id = profile.user_id, flow = previous.name(), "Flow reset by command");
        }
    }

    match cmd {
        Command::Start => start::handle_start(bot, msg, services).await,
        Command::Help => start::handle_help(bot, msg.chat.id, profile.user_id, services).await,
        Command::NewBanner => banner::handle_new_banner(bot, msg.chat.id, profile.user_id, services).await,
        Command::Cancel => banner::handle_cancel(bot, msg.chat.id, profile.user_id, services).await,
        Command::Stats => stats::handle_stats(bot, msg.chat.id, &profile, services).await,
        Command::Admin => admin::handle_admin_panel(bot, msg.chat.id, profile.user_id, services).await,
        Command::BanUser(args) => admin::handle_ban(bot, msg, &args, services).await,
        Command::UnbanUser(args) => admin::handle_unban(bot, msg, &args, services).await,
        Command::Logs(args) => admin::handle_logs(bot, msg.chat.id, profile.user_id, &args, services).await,
        Command::SearchUser(args) => admin::handle_search(bot, msg, &args, services).await,
        Command::Top => admin::handle_top(bot, msg.chat.id, profile.user_id, services).await,
    }
}
