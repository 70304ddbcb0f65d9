//! Admin bans a user; the user is shut out of every handler

use assert_matches::assert_matches;
use BannerBot::database::BannerStore;
use BannerBot::handlers::BANNED_NOTICE;
use BannerBot::BannerBotError;

use crate::helpers::{TestContext, ADMIN_ID};
use crate::integration::{press_button, send_text};

#[tokio::test]
async fn test_banned_user_gets_notice_and_no_banner() {
    let Some(ctx) = TestContext::new().await else { return };
    let target = 99;

    // The user starts a banner before the ban lands
    send_text(&ctx, target, "/new_banner").await.unwrap().unwrap();
    press_button(&ctx, target, "banner:template:1").await.unwrap().unwrap();

    send_text(&ctx, ADMIN_ID, "/ban_user 99 spamming").await.unwrap().unwrap();
    assert!(ctx.store.is_banned(target).await.unwrap());

    let logs = ctx.store.list_recent_logs(10).await.unwrap();
    assert_eq!(logs[0].user_id, ADMIN_ID);
    assert_eq!(logs[0].action, "ban_user");
    assert_eq!(logs[0].details.as_deref(), Some("target=99 reason=spamming"));

    ctx.telegram_mock.reset().await;

    // Gate stops the caption before any handler runs
    assert!(send_text(&ctx, target, "Happy Birthday").await.is_none());

    let replies = ctx.telegram_mock.sent_messages().await;
    assert_eq!(replies, vec![BANNED_NOTICE.to_string()]);
    assert_eq!(ctx.telegram_mock.sent_photo_count().await, 0);

    let user = ctx.store.get_user(target).await.unwrap().unwrap();
    assert_eq!(user.banners_generated, 0);
    assert_eq!(ctx.store.list_recent_logs(10).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_banned_user_button_press_gets_alert() {
    let Some(ctx) = TestContext::new().await else { return };
    let target = 98;

    send_text(&ctx, ADMIN_ID, "/ban_user 98").await.unwrap().unwrap();
    ctx.telegram_mock.reset().await;

    assert!(press_button(&ctx, target, "menu:create").await.is_none());
    assert_eq!(
        ctx.telegram_mock.callback_answers().await,
        vec![Some(BANNED_NOTICE.to_string())]
    );
    assert!(ctx.telegram_mock.sent_messages().await.is_empty());
}

#[tokio::test]
async fn test_unban_restores_access() {
    let Some(ctx) = TestContext::new().await else { return };
    let target = 97;

    send_text(&ctx, ADMIN_ID, "/ban_user 97").await.unwrap().unwrap();
    assert!(send_text(&ctx, target, "/start").await.is_none());

    send_text(&ctx, ADMIN_ID, "/unban_user 97").await.unwrap().unwrap();
    assert!(!ctx.store.is_banned(target).await.unwrap());
    send_text(&ctx, target, "/start").await.unwrap().unwrap();

    let actions: Vec<String> = ctx
        .store
        .list_recent_logs(10)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.action)
        .collect();
    assert_eq!(actions, vec!["unban_user", "ban_user"]);
}

#[tokio::test]
async fn test_storage_outage_fails_closed() {
    let Some(ctx) = TestContext::new().await else { return };

    ctx.store.set_unavailable(true);
    assert!(send_text(&ctx, 55, "/new_banner").await.is_none());

    let replies = ctx.telegram_mock.sent_messages().await;
    assert_eq!(replies.len(), 1);
    assert!(replies[0].contains("try again later"));
}

#[tokio::test]
async fn test_non_admin_cannot_ban() {
    let Some(ctx) = TestContext::new().await else { return };

    let result = send_text(&ctx, 56, "/ban_user 57").await.unwrap();
    assert_matches!(result, Err(BannerBotError::PermissionDenied(_)));
    assert!(!ctx.store.is_banned(57).await.unwrap());
    assert!(ctx
        .telegram_mock
        .sent_messages()
        .await
        .iter()
        .any(|m| m == "🔒 Admin only"));
}
