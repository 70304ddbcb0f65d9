//! Message handlers module
//!
//! Plain text messages are captions when the user's flow is waiting for one

use teloxide::{
    prelude::*,
    types::{InputFile, Message},
    Bot,
};
use tracing::debug;

use crate::handlers::commands::sender;
use crate::services::ServiceFactory;
use crate::state::{BannerFlow, FlowEvent};
use crate::utils::errors::Result;
use crate::utils::logging::log_user_action;

/// Handle incoming text messages
pub async fn handle_message(bot: Bot, msg: Message, services: ServiceFactory) -> Result<()> {
    let profile = sender(&msg)?;
    let user_id = profile.user_id;
    let chat_id = msg.chat.id;

    match services.flows.get(user_id).await {
        BannerFlow::AwaitingText { background } => {
            let text = msg.text().unwrap_or_default();
            services.flows.apply(user_id, FlowEvent::SubmitText).await?;
            debug!(user_id = user_id, background = %background, "Caption received");

            match services.banner_service.create_banner(user_id, background, text).await {
                Ok(banner) => {
                    let mut caption = match banner.total_for_user {
                        Some(total) => format!("✅ Banner #{} is ready!", total),
                        None => "✅ Your banner is ready!".to_string(),
                    };
                    if banner.used_fallback {
                        caption.push_str("\nThe random wallpaper was unavailable, so template 1 was used.");
                    }

                    let sent = bot
                        .send_photo(chat_id, InputFile::memory(banner.jpeg).file_name("banner.jpg"))
                        .caption(caption)
                        .await;
                    if let Err(e) = services.flows.apply(user_id, FlowEvent::Rendered).await {
                        // A /cancel from another chat may have cleared the flow already
                        debug!(user_id = user_id, error = %e, "Flow changed while rendering");
                    }
                    sent?;

                    log_user_action(user_id, "banner_sent", Some(&background.to_string()));
                    Ok(())
                }
                Err(e) if e.is_input_error() => {
                    // Keep the chosen background so the user can resend the text
                    services.flows.apply(user_id, FlowEvent::InputRejected).await?;
                    Err(e)
                }
                Err(e) => {
                    services.flows.apply(user_id, FlowEvent::Cancel).await?;
                    Err(e)
                }
            }
        }
        BannerFlow::AwaitingTemplateChoice => {
            bot.send_message(chat_id, "👆 Pick a background with the buttons above first.").await?;
            Ok(())
        }
        BannerFlow::Rendering { .. } => {
            bot.send_message(chat_id, "⏳ Your banner is still being rendered.").await?;
            Ok(())
        }
        BannerFlow::Idle => {
            bot.send_message(chat_id, "Send /new_banner to create a banner.").await?;
            Ok(())
        }
    }
}
