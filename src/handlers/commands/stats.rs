//! /stats command handler

use teloxide::{prelude::*, types::ParseMode, Bot};

use crate::models::UserProfile;
use crate::services::{ServiceFactory, UserStatsView};
use crate::utils::errors::Result;
use crate::utils::helpers::format_timestamp;

pub async fn handle_stats(bot: Bot, chat_id: ChatId, profile: &UserProfile, services: ServiceFactory) -> Result<()> {
    let view = services.user_service.stats_for(profile).await?;

    bot.send_message(chat_id, format_stats(&view))
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

pub fn format_stats(view: &UserStatsView) -> String {
    format!(
        "📊 <b>Your statistics</b>\n\
         Banners created: {}\n\
         With us since: {}\n\n\
         🌍 <b>Everyone</b>\n\
         Users: {}\n\
         Banners: {}",
        view.user.banners_generated,
        format_timestamp(view.user.created_at),
        view.global.total_users,
        view.global.total_banners,
    )
}
