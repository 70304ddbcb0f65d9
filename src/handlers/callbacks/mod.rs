//! Callback query handlers module
//!
//! This module contains handlers for all inline keyboard button callbacks

use teloxide::{prelude::*, types::CallbackQuery, Bot};
use tracing::{debug, warn};

use crate::engine::TemplateId;
use crate::handlers::commands::{admin, banner, start, stats};
use crate::handlers::keyboards::{parse_callback_data, ADMIN_PREFIX, BANNER_PREFIX, MENU_PREFIX};
use crate::models::UserProfile;
use crate::services::ServiceFactory;
use crate::state::Background;
use crate::utils::errors::Result;

/// Chat the answer to a button press goes to; the user's private chat when
/// the original message is no longer accessible.
pub fn callback_chat_id(query: &CallbackQuery) -> ChatId {
    query
        .message
        .as_ref()
        .map(|m| m.chat().id)
        .unwrap_or(ChatId(query.from.id.0 as i64))
}

/// Main callback query dispatcher
pub async fn handle_callback_query(bot: Bot, query: CallbackQuery, services: ServiceFactory) -> Result<()> {
    let profile = UserProfile::from_telegram(&query.from);
    let user_id = profile.user_id;
    let chat_id = callback_chat_id(&query);

    // Stop the loading spinner before doing any work
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, user_id = user_id, "Failed to answer callback query");
    }

    let Some(data) = query.data.as_deref() else {
        return Ok(());
    };
    let Some((prefix, action, arg)) = parse_callback_data(data) else {
        warn!(user_id = user_id, data = %data, "Malformed callback data");
        return Ok(());
    };
    debug!(user_id = user_id, prefix = prefix, action = action, "Routing callback");

    match (prefix, action) {
        (MENU_PREFIX, "create") => banner::handle_new_banner(bot, chat_id, user_id, services).await,
        (MENU_PREFIX, "stats") => stats::handle_stats(bot, chat_id, &profile, services).await,
        (MENU_PREFIX, "help") => start::handle_help(bot, chat_id, user_id, services).await,
        (MENU_PREFIX, "home") => start::handle_home(bot, chat_id, &profile, services).await,

        (BANNER_PREFIX, "template") => {
            let id = TemplateId::parse(arg.unwrap_or_default())?;
            banner::handle_background_choice(bot, chat_id, user_id, Background::Template(id), services).await
        }
        (BANNER_PREFIX, "random") => {
            banner::handle_background_choice(bot, chat_id, user_id, Background::Wallpaper, services).await
        }
        (BANNER_PREFIX, "cancel") => banner::handle_cancel(bot, chat_id, user_id, services).await,

        (ADMIN_PREFIX, "logs") => admin::handle_logs(bot, chat_id, user_id, "", services).await,
        (ADMIN_PREFIX, "top") => admin::handle_top(bot, chat_id, user_id, services).await,
        (ADMIN_PREFIX, "refresh") => admin::handle_admin_panel(bot, chat_id, user_id, services).await,

        _ => {
            warn!(user_id = user_id, data = %data, "Unknown callback action");
            Ok(())
        }
    }
}
