//! Banner creation from /new_banner to the delivered photo

use assert_matches::assert_matches;
use BannerBot::database::BannerStore;
use BannerBot::state::{Background, BannerFlow};
use BannerBot::engine::TemplateId;
use BannerBot::BannerBotError;

use crate::helpers::TestContext;
use crate::integration::{press_button, send_text};

#[tokio::test]
async fn test_user_creates_banner_on_template() {
    let Some(ctx) = TestContext::new().await else { return };
    let user_id = 42;

    send_text(&ctx, user_id, "/new_banner").await.unwrap().unwrap();
    assert_eq!(ctx.services.flows.get(user_id).await, BannerFlow::AwaitingTemplateChoice);

    press_button(&ctx, user_id, "banner:template:2").await.unwrap().unwrap();
    assert_eq!(
        ctx.services.flows.get(user_id).await,
        BannerFlow::AwaitingText {
            background: Background::Template(TemplateId::new(2).unwrap())
        }
    );

    send_text(&ctx, user_id, "Happy Birthday").await.unwrap().unwrap();

    assert_eq!(ctx.telegram_mock.sent_photo_count().await, 1);
    assert_eq!(ctx.services.flows.get(user_id).await, BannerFlow::Idle);

    let user = ctx.store.get_user(user_id).await.unwrap().unwrap();
    assert_eq!(user.banners_generated, 1);

    let logs = ctx.store.list_recent_logs(50).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].user_id, 42);
    assert_eq!(logs[0].action, "banner_created");
    assert_eq!(logs[0].details.as_deref(), Some("template=2 len=14"));
}

#[tokio::test]
async fn test_too_long_text_keeps_user_waiting_for_text() {
    let Some(ctx) = TestContext::new().await else { return };
    let user_id = 43;

    send_text(&ctx, user_id, "/new_banner").await.unwrap().unwrap();
    press_button(&ctx, user_id, "banner:template:1").await.unwrap().unwrap();

    let long = "a".repeat(61);
    let result = send_text(&ctx, user_id, &long).await.unwrap();
    assert_matches!(result, Err(BannerBotError::InputTooLong { length: 61, max: 60 }));
    assert_matches!(ctx.services.flows.get(user_id).await, BannerFlow::AwaitingText { .. });
    assert_eq!(ctx.telegram_mock.sent_photo_count().await, 0);

    let replies = ctx.telegram_mock.sent_messages().await;
    assert!(replies.last().unwrap().contains("too long"));

    // A shorter retry goes through
    send_text(&ctx, user_id, "Short one").await.unwrap().unwrap();
    assert_eq!(ctx.telegram_mock.sent_photo_count().await, 1);
    assert_eq!(ctx.store.get_user(user_id).await.unwrap().unwrap().banners_generated, 1);
}

#[tokio::test]
async fn test_template_button_outside_flow_is_rejected() {
    let Some(ctx) = TestContext::new().await else { return };
    let user_id = 44;

    let result = press_button(&ctx, user_id, "banner:template:3").await.unwrap();
    assert_matches!(result, Err(BannerBotError::InvalidStateTransition { .. }));
    assert_eq!(ctx.services.flows.get(user_id).await, BannerFlow::Idle);

    let replies = ctx.telegram_mock.sent_messages().await;
    assert!(replies.iter().any(|r| r.contains("/new_banner")));
}

#[tokio::test]
async fn test_other_command_resets_flow() {
    let Some(ctx) = TestContext::new().await else { return };
    let user_id = 45;

    send_text(&ctx, user_id, "/new_banner").await.unwrap().unwrap();
    press_button(&ctx, user_id, "banner:template:4").await.unwrap().unwrap();

    send_text(&ctx, user_id, "/stats").await.unwrap().unwrap();
    assert_eq!(ctx.services.flows.get(user_id).await, BannerFlow::Idle);

    // Text after the reset is not a caption
    send_text(&ctx, user_id, "Happy Birthday").await.unwrap().unwrap();
    assert_eq!(ctx.telegram_mock.sent_photo_count().await, 0);
}

#[tokio::test]
async fn test_cancel_from_button() {
    let Some(ctx) = TestContext::new().await else { return };
    let user_id = 46;

    press_button(&ctx, user_id, "menu:create").await.unwrap().unwrap();
    assert_eq!(ctx.services.flows.get(user_id).await, BannerFlow::AwaitingTemplateChoice);

    press_button(&ctx, user_id, "banner:cancel").await.unwrap().unwrap();
    assert_eq!(ctx.services.flows.get(user_id).await, BannerFlow::Idle);
    assert!(ctx
        .telegram_mock
        .sent_messages()
        .await
        .iter()
        .any(|m| m.contains("cancelled")));
}

#[tokio::test]
async fn test_rate_limit_stops_banners() {
    let Some(ctx) = TestContext::with_settings(|s| s.rate_limit.banners_per_hour = 1).await else {
        return;
    };
    let user_id = 47;

    send_text(&ctx, user_id, "/new_banner").await.unwrap().unwrap();
    press_button(&ctx, user_id, "banner:template:1").await.unwrap().unwrap();
    send_text(&ctx, user_id, "first").await.unwrap().unwrap();
    send_text(&ctx, user_id, "/new_banner").await.unwrap().unwrap();
    press_button(&ctx, user_id, "banner:template:1").await.unwrap().unwrap();
    let result = send_text(&ctx, user_id, "second").await.unwrap();

    assert_matches!(result, Err(BannerBotError::RateLimitExceeded));
    assert_eq!(ctx.telegram_mock.sent_photo_count().await, 1);
    assert_eq!(ctx.store.get_user(user_id).await.unwrap().unwrap().banners_generated, 1);
    assert_eq!(ctx.services.flows.get(user_id).await, BannerFlow::Idle);
}

#[tokio::test]
async fn test_home_button_greets_user_by_name() {
    let Some(ctx) = TestContext::new().await else { return };

    press_button(&ctx, 42, "menu:home").await.unwrap().unwrap();

    let replies = ctx.telegram_mock.sent_messages().await;
    assert_eq!(replies.len(), 1);
    assert!(replies[0].contains("Hi, User42!"));
}
