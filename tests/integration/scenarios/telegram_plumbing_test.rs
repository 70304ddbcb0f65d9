//! The fake Bot API and update builders behave like the real thing

use teloxide::prelude::*;

use crate::helpers::{create_callback_update, create_message_update, create_test_callback_query, TelegramMockServer};

#[test]
fn test_updates_carry_their_sender() {
    let message = create_message_update(99, "Happy Birthday");
    assert_eq!(message.from().map(|u| u.id.0), Some(99));

    let callback = create_callback_update(77, "menu:create");
    assert_eq!(callback.from().map(|u| u.id.0), Some(77));
}

#[tokio::test]
async fn test_mock_answers_teloxide_requests() {
    let mock = TelegramMockServer::new().await;
    let bot = mock.bot();

    bot.send_message(ChatId(42), "ping").await.unwrap();
    let query = create_test_callback_query(42, "menu:help");
    bot.answer_callback_query(query.id).text("pong").await.unwrap();

    assert_eq!(mock.sent_messages().await, vec!["ping".to_string()]);
    assert_eq!(mock.callback_answers().await, vec![Some("pong".to_string())]);
}
