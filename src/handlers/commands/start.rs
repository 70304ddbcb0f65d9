//! Start and help command handlers
//!
//! Handles the /start command and the help text shared with the menu button

use teloxide::{
    prelude::*,
    types::{InputFile, Message, ParseMode},
    Bot,
};
use tracing::{debug, info, warn};

use crate::handlers::commands::sender;
use crate::handlers::keyboards;
use crate::models::UserProfile;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use crate::utils::helpers::{escape_html, format_bytes};
use crate::utils::logging::log_user_action;

/// Handle /start: register the user and show the main menu
pub async fn handle_start(bot: Bot, msg: Message, services: ServiceFactory) -> Result<()> {
    let profile = sender(&msg)?;
    let chat_id = msg.chat.id;

    let user = services.user_service.register(&profile).await?;
    log_user_action(user.user_id, "start", None);

    let text = welcome_text(&user.display_name(), services.banner_service.compositor().max_text_length());

    if services.settings.wallpaper.on_start && services.wallpaper_service.is_enabled() {
        match services.wallpaper_service.fetch_random().await {
            Ok(bytes) => {
                debug!(user_id = user.user_id, size = %format_bytes(bytes.len() as u64), "Sending welcome wallpaper");
                bot.send_photo(chat_id, InputFile::memory(bytes).file_name("welcome.jpg"))
                    .caption(text)
                    .parse_mode(ParseMode::Html)
                    .reply_markup(keyboards::main_menu())
                    .await?;
                return Ok(());
            }
            Err(e) => warn!(user_id = user.user_id, error = %e, "Welcome wallpaper unavailable"),
        }
    }

    bot.send_message(chat_id, text)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboards::main_menu())
        .await?;

    info!(user_id = user.user_id, "Welcome sent");
    Ok(())
}

/// Handle /help and the help button
pub async fn handle_help(bot: Bot, chat_id: ChatId, user_id: i64, services: ServiceFactory) -> Result<()> {
    let is_admin = services.access.is_admin(user_id);
    let text = help_text(services.banner_service.compositor().max_text_length(), is_admin);

    bot.send_message(chat_id, text)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboards::back_home())
        .await?;
    Ok(())
}

/// Main menu without the wallpaper, used by the back button
pub async fn handle_home(bot: Bot, chat_id: ChatId, profile: &UserProfile, services: ServiceFactory) -> Result<()> {
    let text = welcome_text(&profile.display_name(), services.banner_service.compositor().max_text_length());
    bot.send_message(chat_id, text)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboards::main_menu())
        .await?;
    Ok(())
}

pub fn welcome_text(name: &str, max_text_length: usize) -> String {
    format!(
        "👋 Hi, {}!\n\n\
         I turn a short text into a 1080×1920 banner ready for stories.\n\
         Pick a background, send up to {} characters and get your image.\n\n\
         Tap <b>🎨 Create banner</b> or send /new_banner to begin.",
        escape_html(name),
        max_text_length
    )
}

pub fn help_text(max_text_length: usize, is_admin: bool) -> String {
    let mut text = format!(
        "<b>How it works</b>\n\
         1. /new_banner and pick one of the templates or a random wallpaper\n\
         2. Send the caption, up to {} characters\n\
         3. Receive the banner\n\n\
         <b>Commands</b>\n\
         /new_banner - create a banner\n\
         /cancel - stop the current banner\n\
         /stats - your statistics\n\
         /help - this message",
        max_text_length
    );

    if is_admin {
        text.push_str(
            "\n\n<b>Admin</b>\n\
             /admin - dashboard\n\
             /ban_user &lt;id&gt; [reason]\n\
             /unban_user &lt;id&gt;\n\
             /logs [n]\n\
             /search_user &lt;id|@username&gt;\n\
             /top",
        );
    }
    text
}
