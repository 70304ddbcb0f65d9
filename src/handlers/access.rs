//! Access gate placed in front of every handler branch

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{Update, UpdateKind};
use tracing::{debug, warn};

use crate::middleware::AccessDecision;
use crate::models::UserProfile;
use crate::services::ServiceFactory;

pub const BANNED_NOTICE: &str = "You are banned from this bot.";

/// `true` lets the update through to the handlers.
///
/// Banned users get [`BANNED_NOTICE`]; when the ban lookup itself fails the
/// update is dropped and the user is asked to retry later.
pub async fn access_gate(bot: Bot, update: Update, services: Arc<ServiceFactory>) -> bool {
    let Some(user) = update.from() else {
        debug!(update_id = update.id.0, "Update without sender passed through");
        return true;
    };
    let profile = UserProfile::from_telegram(user);

    match services.access.admit(&profile).await {
        Ok(AccessDecision::Allow) => true,
        Ok(AccessDecision::Deny) => {
            notify(&bot, &update, BANNED_NOTICE).await;
            false
        }
        Err(e) => {
            notify(&bot, &update, &e.user_message()).await;
            false
        }
    }
}

/// Tell the sender why the update was rejected: an alert for button presses,
/// a message otherwise.
async fn notify(bot: &Bot, update: &Update, text: &str) {
    let result = match &update.kind {
        UpdateKind::CallbackQuery(query) => bot
            .answer_callback_query(query.id.clone())
            .text(text)
            .show_alert(true)
            .await
            .map(|_| ()),
        UpdateKind::Message(message) => bot.send_message(message.chat.id, text).await.map(|_| ()),
        _ => Ok(()),
    };

    if let Err(e) = result {
        warn!(error = %e, "Failed to deliver access notice");
    }
}
