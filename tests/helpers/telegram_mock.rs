//! Mock Telegram API Server for testing
//!
//! This module provides a mock HTTP server that simulates the Telegram Bot API
//! for testing purposes. It uses wiremock to create configurable mock responses.

use serde_json::{json, Value};
use teloxide::Bot;
use wiremock::{
    matchers::{method, path_regex},
    Mock, MockServer, Request, ResponseTemplate,
};

pub const TEST_BOT_TOKEN: &str = "12345:test_token";

/// Mock Telegram API server for testing
pub struct TelegramMockServer {
    pub server: MockServer,
}

impl TelegramMockServer {
    /// Create a new mock Telegram API server with the default endpoints mounted
    pub async fn new() -> Self {
        let mock = Self {
            server: MockServer::start().await,
        };
        mock.setup_default_mocks().await;
        mock
    }

    /// Bot whose requests all go to this server
    pub fn bot(&self) -> Bot {
        let url = url::Url::parse(&self.server.uri()).expect("mock server uri");
        Bot::new(TEST_BOT_TOKEN).set_api_url(url)
    }

    fn method_path(name: &str) -> String {
        format!("/bot{}/{}", TEST_BOT_TOKEN, name)
    }

    /// teloxide names methods in PascalCase (`SendMessage`), the API docs in camelCase
    fn method_pattern(name: &str) -> String {
        format!("(?i)^{}$", regex::escape(&Self::method_path(name)))
    }

    async fn mount(&self, name: &str, result: Value) {
        Mock::given(method("POST"))
            .and(path_regex(Self::method_pattern(name)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "result": result })))
            .mount(&self.server)
            .await;
    }

    /// Setup the endpoints the handlers call
    pub async fn setup_default_mocks(&self) {
        self.mount("sendMessage", bot_message(json!({ "text": "Test message" }))).await;
        self.mount(
            "sendPhoto",
            bot_message(json!({
                "photo": [{
                    "file_id": "photo_file_id",
                    "file_unique_id": "photo_unique_id",
                    "width": 1080,
                    "height": 1920,
                    "file_size": 123456
                }]
            })),
        )
        .await;
        self.mount("answerCallbackQuery", json!(true)).await;
        self.mount("setMyCommands", json!(true)).await;
    }

    async fn requests_to(&self, name: &str) -> Vec<Request> {
        let wanted = Self::method_path(name);
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.url.path().eq_ignore_ascii_case(&wanted))
            .collect()
    }

    /// Text bodies of every sendMessage call, in order
    pub async fn sent_messages(&self) -> Vec<String> {
        self.requests_to("sendMessage")
            .await
            .iter()
            .filter_map(|r| serde_json::from_slice::<Value>(&r.body).ok())
            .filter_map(|body| body.get("text").and_then(Value::as_str).map(str::to_string))
            .collect()
    }

    pub async fn sent_photo_count(&self) -> usize {
        self.requests_to("sendPhoto").await.len()
    }

    /// Texts passed to answerCallbackQuery
    pub async fn callback_answers(&self) -> Vec<Option<String>> {
        self.requests_to("answerCallbackQuery")
            .await
            .iter()
            .filter_map(|r| serde_json::from_slice::<Value>(&r.body).ok())
            .map(|body| body.get("text").and_then(Value::as_str).map(str::to_string))
            .collect()
    }

    /// Reset all recorded requests and mocks, then mount the defaults again
    pub async fn reset(&self) {
        self.server.reset().await;
        self.setup_default_mocks().await;
    }
}

/// A message sent by the bot, as returned from the API
fn bot_message(content: Value) -> Value {
    let mut message = json!({
        "message_id": 123,
        "from": {
            "id": 12345,
            "is_bot": true,
            "first_name": "BannerBot",
            "username": "banner_bot"
        },
        "chat": {
            "id": 42,
            "type": "private",
            "first_name": "Test"
        },
        "date": 1640995200
    });
    if let (Some(message), Some(content)) = (message.as_object_mut(), content.as_object()) {
        for (key, value) in content {
            message.insert(key.clone(), value.clone());
        }
    }
    message
}
