//! Admin dashboard, logs and lookups

use assert_matches::assert_matches;
use BannerBot::BannerBotError;

use crate::helpers::{TestContext, ADMIN_ID};
use crate::integration::{press_button, send_text};

#[tokio::test]
async fn test_dashboard_counts() {
    let Some(ctx) = TestContext::new().await else { return };

    send_text(&ctx, 10, "/start").await.unwrap().unwrap();
    send_text(&ctx, 11, "/start").await.unwrap().unwrap();
    send_text(&ctx, ADMIN_ID, "/ban_user 11").await.unwrap().unwrap();
    ctx.telegram_mock.reset().await;

    send_text(&ctx, ADMIN_ID, "/admin").await.unwrap().unwrap();
    let dashboard = ctx.telegram_mock.sent_messages().await.pop().unwrap();
    assert!(dashboard.contains("Total users: 3"));
    assert!(dashboard.contains("Banned users: 1"));
    assert!(dashboard.contains("/ban_user"));
}

#[tokio::test]
async fn test_malformed_ban_shows_usage() {
    let Some(ctx) = TestContext::new().await else { return };

    let result = send_text(&ctx, ADMIN_ID, "/ban_user someone").await.unwrap();
    assert_matches!(result, Err(BannerBotError::InvalidInput(_)));
    assert!(ctx
        .telegram_mock
        .sent_messages()
        .await
        .iter()
        .any(|m| m.contains("Usage: /ban_user")));
}

#[tokio::test]
async fn test_admins_cannot_be_banned() {
    let Some(ctx) = TestContext::new().await else { return };

    let result = send_text(&ctx, ADMIN_ID, &format!("/ban_user {}", ADMIN_ID)).await.unwrap();
    assert_matches!(result, Err(BannerBotError::InvalidInput(_)));
}

#[tokio::test]
async fn test_search_and_logs() {
    let Some(ctx) = TestContext::new().await else { return };

    send_text(&ctx, 20, "/start").await.unwrap().unwrap();
    send_text(&ctx, ADMIN_ID, "/ban_user 20 flood").await.unwrap().unwrap();
    ctx.telegram_mock.reset().await;

    send_text(&ctx, ADMIN_ID, "/search_user 20").await.unwrap().unwrap();
    send_text(&ctx, ADMIN_ID, "/logs 5").await.unwrap().unwrap();
    send_text(&ctx, ADMIN_ID, "/search_user 12345678").await.unwrap().unwrap();

    let replies = ctx.telegram_mock.sent_messages().await;
    assert_eq!(replies.len(), 3);
    assert!(replies[0].contains("<code>20</code>"));
    assert!(replies[0].contains("banned"));
    assert!(replies[1].contains("ban_user"));
    assert!(replies[1].contains("reason=flood"));
    assert!(replies[2].contains("No user found"));
}

#[tokio::test]
async fn test_admin_buttons_refuse_non_admins() {
    let Some(ctx) = TestContext::new().await else { return };

    let result = press_button(&ctx, 30, "admin:logs").await.unwrap();
    assert_matches!(result, Err(BannerBotError::PermissionDenied(_)));

    press_button(&ctx, ADMIN_ID, "admin:top").await.unwrap().unwrap();
}
