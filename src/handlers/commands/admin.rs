//! Admin command handlers
//!
//! Every handler here checks the sender against the configured admin set
//! before parsing arguments, so non-admins always get the same refusal.

use teloxide::{
    prelude::*,
    types::{Message, ParseMode},
    Bot,
};
use tracing::info;

use crate::handlers::commands::sender;
use crate::handlers::keyboards;
use crate::models::{BotStats, BotUser, LogEntry};
use crate::services::ServiceFactory;
use crate::utils::errors::{BannerBotError, Result};
use crate::utils::helpers::{escape_html, format_relative_time, format_timestamp, parse_user_id, truncate_text};

pub const TOP_LIMIT: usize = 10;
const DETAILS_PREVIEW_CHARS: usize = 60;

/// Handle /admin and the refresh button
pub async fn handle_admin_panel(bot: Bot, chat_id: ChatId, admin_id: i64, services: ServiceFactory) -> Result<()> {
    let stats = services.moderation_service.dashboard(admin_id).await?;

    bot.send_message(chat_id, format_dashboard(&stats))
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboards::admin_panel())
        .await?;

    info!(admin_id = admin_id, "Admin dashboard shown");
    Ok(())
}

/// Handle /ban_user <id> [reason]
pub async fn handle_ban(bot: Bot, msg: Message, args: &str, services: ServiceFactory) -> Result<()> {
    let admin_id = sender(&msg)?.user_id;
    services.access.require_admin(admin_id)?;

    let (target, reason) = parse_ban_args(args)?;
    let ban = services.moderation_service.ban(admin_id, target, reason).await?;

    bot.send_message(
        msg.chat.id,
        format!("⛔️ User {} banned.\nReason: {}", ban.user_id, escape_html(&ban.reason)),
    )
    .parse_mode(ParseMode::Html)
    .await?;
    Ok(())
}

/// Handle /unban_user <id>
pub async fn handle_unban(bot: Bot, msg: Message, args: &str, services: ServiceFactory) -> Result<()> {
    let admin_id = sender(&msg)?.user_id;
    services.access.require_admin(admin_id)?;

    let target = parse_target(args, "Usage: /unban_user <user_id>")?;
    let text = if services.moderation_service.unban(admin_id, target).await? {
        format!("✅ User {} unbanned.", target)
    } else {
        format!("User {} was not banned.", target)
    };

    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

/// Handle /logs [n]
pub async fn handle_logs(bot: Bot, chat_id: ChatId, admin_id: i64, args: &str, services: ServiceFactory) -> Result<()> {
    services.access.require_admin(admin_id)?;

    let limit = parse_log_limit(args)?;
    let entries = services.moderation_service.recent_logs(admin_id, limit).await?;

    bot.send_message(chat_id, format_logs(&entries))
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

/// Handle /search_user <id|@username>
pub async fn handle_search(bot: Bot, msg: Message, args: &str, services: ServiceFactory) -> Result<()> {
    let admin_id = sender(&msg)?.user_id;
    services.access.require_admin(admin_id)?;

    let query = args.trim();
    if query.is_empty() {
        return Err(BannerBotError::InvalidInput("Usage: /search_user <user_id|@username>".to_string()));
    }

    let text = match services.user_service.search(query).await? {
        Some(user) => {
            let banned = services.store.is_banned(user.user_id).await?;
            format_user_card(&user, banned)
        }
        None => format!("No user found for {}.", escape_html(query)),
    };

    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

/// Handle /top and the top users button
pub async fn handle_top(bot: Bot, chat_id: ChatId, admin_id: i64, services: ServiceFactory) -> Result<()> {
    services.access.require_admin(admin_id)?;

    let users = services.user_service.top(TOP_LIMIT).await?;
    bot.send_message(chat_id, format_top(&users))
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

/// `<id> [reason...]`; the reason may contain spaces
pub fn parse_ban_args(args: &str) -> Result<(i64, Option<String>)> {
    let args = args.trim();
    let (id, reason) = match args.split_once(char::is_whitespace) {
        Some((id, reason)) => (id, Some(reason.trim().to_string()).filter(|r| !r.is_empty())),
        None => (args, None),
    };

    let target = parse_target(id, "Usage: /ban_user <user_id> [reason]")?;
    Ok((target, reason))
}

fn parse_target(arg: &str, usage: &str) -> Result<i64> {
    parse_user_id(arg).ok_or_else(|| BannerBotError::InvalidInput(usage.to_string()))
}

/// Empty means the default limit
pub fn parse_log_limit(args: &str) -> Result<Option<usize>> {
    let args = args.trim();
    if args.is_empty() {
        return Ok(None);
    }
    args.parse::<usize>()
        .map(Some)
        .map_err(|_| BannerBotError::InvalidInput("Usage: /logs [number of entries]".to_string()))
}

pub fn format_dashboard(stats: &BotStats) -> String {
    format!(
        "🛠 <b>Admin dashboard</b>\n\
         Total users: {}\n\
         Total banners: {}\n\
         Active in 24h: {}\n\
         Banned users: {}\n\n\
         /ban_user &lt;id&gt; [reason]\n\
         /unban_user &lt;id&gt;\n\
         /logs [n]\n\
         /search_user &lt;id|@username&gt;\n\
         /top",
        stats.total_users, stats.total_banners, stats.active_24h, stats.banned_users
    )
}

pub fn format_logs(entries: &[LogEntry]) -> String {
    if entries.is_empty() {
        return "📜 No log entries yet.".to_string();
    }

    let mut text = format!("📜 <b>Last {} log entries</b>\n", entries.len());
    for entry in entries {
        let details = entry
            .details
            .as_deref()
            .map(|d| format!(" {}", escape_html(&truncate_text(d, DETAILS_PREVIEW_CHARS))))
            .unwrap_or_default();
        text.push_str(&format!(
            "\n<code>{}</code> {} <b>{}</b>{}",
            format_timestamp(entry.timestamp),
            entry.user_id,
            escape_html(&entry.action),
            details
        ));
    }
    text
}

pub fn format_user_card(user: &BotUser, banned: bool) -> String {
    format!(
        "👤 <b>{}</b>\n\
         ID: <code>{}</code>\n\
         Banners: {}\n\
         First seen: {}\n\
         Last active: {}\n\
         Status: {}",
        escape_html(&user.display_name()),
        user.user_id,
        user.banners_generated,
        format_timestamp(user.created_at),
        format_relative_time(user.last_active),
        if banned { "⛔️ banned" } else { "active" }
    )
}

pub fn format_top(users: &[BotUser]) -> String {
    if users.is_empty() {
        return "🏆 No banners created yet.".to_string();
    }

    let mut text = "🏆 <b>Top users</b>\n".to_string();
    for (rank, user) in users.iter().enumerate() {
        text.push_str(&format!(
            "\n{}. {} (<code>{}</code>): {}",
            rank + 1,
            escape_html(&user.display_name()),
            user.user_id,
            user.banners_generated
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserProfile;
    use assert_matches::assert_matches;
    use chrono::Utc;

    #[test]
    fn test_parse_ban_args() {
        assert_eq!(parse_ban_args("99").unwrap(), (99, None));
        assert_eq!(
            parse_ban_args(" 99  spamming links ").unwrap(),
            (99, Some("spamming links".to_string()))
        );
        assert_eq!(parse_ban_args("tg://user?id=5 flood").unwrap(), (5, Some("flood".to_string())));
        assert_matches!(parse_ban_args(""), Err(BannerBotError::InvalidInput(_)));
        assert_matches!(parse_ban_args("abc reason"), Err(BannerBotError::InvalidInput(_)));
        assert_matches!(parse_ban_args("@someone"), Err(BannerBotError::InvalidInput(_)));
    }

    #[test]
    fn test_parse_log_limit() {
        assert_eq!(parse_log_limit("").unwrap(), None);
        assert_eq!(parse_log_limit(" 5 ").unwrap(), Some(5));
        assert_matches!(parse_log_limit("five"), Err(BannerBotError::InvalidInput(_)));
    }

    #[test]
    fn test_format_logs() {
        assert!(format_logs(&[]).contains("No log entries"));

        let entries = vec![LogEntry::new(42, "banner_created", Some("template=2 len=14".to_string()))];
        let text = format_logs(&entries);
        assert!(text.contains("banner_created"));
        assert!(text.contains("template=2 len=14"));
        assert!(text.contains("42"));
    }

    #[test]
    fn test_format_top_ranks_users() {
        let mut first = BotUser::new(&UserProfile::new(1), Utc::now());
        first.username = Some("alice".to_string());
        first.banners_generated = 9;
        let second = BotUser::new(&UserProfile::new(2), Utc::now());

        let text = format_top(&[first, second]);
        assert!(text.contains("1. @alice"));
        assert!(text.contains("2. unknown"));
    }

    #[test]
    fn test_dashboard_lists_counts() {
        let stats = BotStats {
            total_users: 5,
            total_banners: 17,
            active_24h: 2,
            banned_users: 1,
        };
        let text = format_dashboard(&stats);
        assert!(text.contains("Total banners: 17"));
        assert!(text.contains("Banned users: 1"));
    }
}
