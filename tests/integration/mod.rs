//! Integration tests module
//!
//! This module contains all integration tests for the BannerBot Telegram bot,
//! organized by test scenarios.

pub mod scenarios;

use std::sync::Arc;

use BannerBot::handlers::{access_gate, handle_callback_query, handle_command, handle_message, report_error, Command};
use BannerBot::utils::errors::Result;
use teloxide::utils::command::BotCommands;

use crate::helpers::{create_callback_update, create_message_update, create_test_callback_query, create_test_message, TestContext};

/// Run a text message or command through the gate and the matching handler,
/// replying with the error text on failure like the dispatcher wrappers do.
pub async fn send_text(ctx: &TestContext, user_id: i64, text: &str) -> Option<Result<()>> {
    let update = create_message_update(user_id, text);
    if !access_gate(ctx.bot.clone(), update, Arc::clone(&ctx.services)).await {
        return None;
    }

    let msg = create_test_message(user_id, text);
    let chat_id = msg.chat.id;
    let result = match Command::parse(text, "BannerBot") {
        Ok(cmd) => handle_command(ctx.bot.clone(), msg, cmd, ctx.services()).await,
        Err(_) => handle_message(ctx.bot.clone(), msg, ctx.services()).await,
    };

    if let Err(e) = &result {
        report_error(&ctx.bot, chat_id, Some(user_id), e).await;
    }
    Some(result)
}

/// Same as [`send_text`] for a button press
pub async fn press_button(ctx: &TestContext, user_id: i64, data: &str) -> Option<Result<()>> {
    let update = create_callback_update(user_id, data);
    if !access_gate(ctx.bot.clone(), update, Arc::clone(&ctx.services)).await {
        return None;
    }

    let query = create_test_callback_query(user_id, data);
    let result = handle_callback_query(ctx.bot.clone(), query, ctx.services()).await;
    if let Err(e) = &result {
        report_error(&ctx.bot, teloxide::types::ChatId(user_id), Some(user_id), e).await;
    }
    Some(result)
}
