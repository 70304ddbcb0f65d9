//! Test context for unified test setup
//!
//! Wires the real services to an in-memory store and a mock Telegram API.

use std::path::PathBuf;
use std::sync::Arc;

use BannerBot::{
    config::Settings,
    database::{BannerStore, MemoryStore},
    engine::Compositor,
    services::ServiceFactory,
};
use tempfile::TempDir;
use teloxide::Bot;

use super::{telegram_mock::TelegramMockServer, test_data::ADMIN_ID, TEST_BOT_TOKEN};

/// Fonts commonly present on Linux hosts
pub fn test_font_paths() -> Vec<PathBuf> {
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
        "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

/// Settings pointing at an empty template directory, with wallpapers off
pub fn test_settings(temp_dir: &TempDir) -> Settings {
    let mut settings = Settings::default();
    settings.bot.token = TEST_BOT_TOKEN.to_string();
    settings.bot.admin_ids = vec![ADMIN_ID];
    settings.banner.templates_dir = temp_dir.path().join("templates");
    settings.banner.font_paths = test_font_paths();
    settings.wallpaper.enabled = false;
    settings.wallpaper.on_start = false;
    settings
}

/// Unified test context that manages all test components
pub struct TestContext {
    pub telegram_mock: TelegramMockServer,
    pub store: Arc<MemoryStore>,
    pub services: Arc<ServiceFactory>,
    pub bot: Bot,
    pub temp_dir: TempDir,
}

impl TestContext {
    /// `None` when no usable font is installed, in which case callers skip
    pub async fn new() -> Option<Self> {
        Self::with_settings(|_| {}).await
    }

    pub async fn with_settings(adjust: impl FnOnce(&mut Settings)) -> Option<Self> {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let temp_dir = tempfile::tempdir().expect("temp dir");
        let mut settings = test_settings(&temp_dir);
        adjust(&mut settings);

        let compositor = match Compositor::new(&settings.banner) {
            Ok(compositor) => Arc::new(compositor),
            Err(e) => {
                eprintln!("skipping: {}", e);
                return None;
            }
        };

        let store = Arc::new(MemoryStore::new());
        let dyn_store: Arc<dyn BannerStore> = store.clone();
        let services = ServiceFactory::new(settings, dyn_store, compositor).expect("service factory");

        let telegram_mock = TelegramMockServer::new().await;
        let bot = telegram_mock.bot();

        Some(Self {
            telegram_mock,
            store,
            services: Arc::new(services),
            bot,
            temp_dir,
        })
    }

    /// Services as the dispatcher hands them to handlers
    pub fn services(&self) -> ServiceFactory {
        (*self.services).clone()
    }
}
