//! Test data helpers for creating test objects
//!
//! Telegram types are built from the JSON the Bot API would send, so they
//! stay valid across teloxide versions.

use serde_json::{json, Value};
use teloxide::types::{CallbackQuery, Message, Update};

pub const ADMIN_ID: i64 = 1000;

fn user_json(user_id: i64, username: Option<&str>) -> Value {
    let mut user = json!({
        "id": user_id,
        "is_bot": false,
        "first_name": format!("User{}", user_id),
        "language_code": "en"
    });
    if let Some(username) = username {
        user["username"] = json!(username);
    }
    user
}

fn message_json(user_id: i64, text: &str) -> Value {
    json!({
        "message_id": 1,
        "date": 1640995200,
        "chat": {
            "id": user_id,
            "type": "private",
            "first_name": format!("User{}", user_id)
        },
        "from": user_json(user_id, None),
        "text": text
    })
}

/// A private text message from `user_id`
pub fn create_test_message(user_id: i64, text: &str) -> Message {
    serde_json::from_value(message_json(user_id, text)).expect("valid message json")
}

fn callback_json(user_id: i64, data: &str) -> Value {
    json!({
        "id": format!("cb-{}", user_id),
        "from": user_json(user_id, None),
        "chat_instance": "test_instance",
        "data": data,
        "message": {
            "message_id": 2,
            "date": 1640995200,
            "chat": {
                "id": user_id,
                "type": "private",
                "first_name": format!("User{}", user_id)
            },
            "text": "menu"
        }
    })
}

/// A button press by `user_id` on a message in their private chat
pub fn create_test_callback_query(user_id: i64, data: &str) -> CallbackQuery {
    serde_json::from_value(callback_json(user_id, data)).expect("valid callback query json")
}

/// `Update` only recognises its kind when parsed from text; going through
/// `from_value` leaves it as `UpdateKind::Error` with no sender.
fn update_from_json(update: Value) -> Update {
    serde_json::from_str(&update.to_string()).expect("valid update json")
}

pub fn create_message_update(user_id: i64, text: &str) -> Update {
    update_from_json(json!({
        "update_id": 1,
        "message": message_json(user_id, text)
    }))
}

pub fn create_callback_update(user_id: i64, data: &str) -> Update {
    update_from_json(json!({
        "update_id": 2,
        "callback_query": callback_json(user_id, data)
    }))
}
