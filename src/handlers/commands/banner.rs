//! Banner flow commands and the steps shared with the menu buttons

use teloxide::{prelude::*, Bot};
use tracing::debug;

use crate::handlers::keyboards;
use crate::services::ServiceFactory;
use crate::state::{Background, FlowEvent};
use crate::utils::errors::Result;

/// Handle /new_banner and the create button: show the template picker
pub async fn handle_new_banner(bot: Bot, chat_id: ChatId, user_id: i64, services: ServiceFactory) -> Result<()> {
    services.flows.apply(user_id, FlowEvent::Start).await?;
    debug!(user_id = user_id, "Banner flow started");

    bot.send_message(chat_id, "🖼 Choose a background for your banner:")
        .reply_markup(keyboards::template_picker(services.wallpaper_service.is_enabled()))
        .await?;
    Ok(())
}

/// A template or wallpaper button was pressed
pub async fn handle_background_choice(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    background: Background,
    services: ServiceFactory,
) -> Result<()> {
    services.flows.apply(user_id, FlowEvent::Choose(background)).await?;
    debug!(user_id = user_id, background = %background, "Background chosen");

    let max = services.banner_service.compositor().max_text_length();
    bot.send_message(
        chat_id,
        format!("✍️ You picked {}. Now send the text for the banner (up to {} characters).", background, max),
    )
    .await?;
    Ok(())
}

/// Handle /cancel and the cancel button
pub async fn handle_cancel(bot: Bot, chat_id: ChatId, user_id: i64, services: ServiceFactory) -> Result<()> {
    let previous = services.flows.reset(user_id).await;

    let text = if previous.is_idle() {
        "Nothing to cancel."
    } else {
        debug!(user_id = user_id, flow = previous.name(), "Flow cancelled");
        "✖️ Banner cancelled."
    };
    bot.send_message(chat_id, text).await?;
    Ok(())
}
