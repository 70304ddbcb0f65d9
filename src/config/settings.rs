//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from built-in defaults, an optional TOML file and
//! environment variables.

use std::path::PathBuf;
use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub banner: BannerConfig,
    pub wallpaper: WallpaperConfig,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
    #[serde(default)]
    pub admin_ids: Vec<i64>,
}

/// MongoDB configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub name: String,
    pub connect_timeout_seconds: u64,
    pub max_pool_size: u32,
}

/// Keep-alive HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Banner rendering configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BannerConfig {
    pub width: u32,
    pub height: u32,
    pub jpeg_quality: u8,
    pub max_text_length: usize,
    pub templates_dir: PathBuf,
    pub font_paths: Vec<PathBuf>,
    pub watermark: String,
}

/// Public wallpaper source configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WallpaperConfig {
    pub enabled: bool,
    pub urls: Vec<String>,
    pub timeout_seconds: u64,
    pub on_start: bool,
}

/// Banner generation quota per user
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    pub banners_per_hour: u32,
    pub admin_exempt: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: String,
    pub file_name: String,
}

impl Settings {
    /// Load settings from defaults, configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("BANNERBOT")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("bot.admin_ids")
                    .with_list_parse_key("banner.font_paths")
                    .with_list_parse_key("wallpaper.urls")
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Settings = settings.try_deserialize()?;
        settings.apply_hosting_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Apply the plain variables hosting platforms usually set
    /// (`BOT_TOKEN`, `MONGO_URI`, `MONGO_DB_NAME`, `ADMIN_IDS`, `PORT`).
    pub fn apply_hosting_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("BOT_TOKEN") {
            self.bot.token = token.trim().to_string();
        }
        if let Some(url) = lookup("MONGO_URI") {
            self.database.url = url.trim().to_string();
        }
        if let Some(name) = lookup("MONGO_DB_NAME") {
            self.database.name = name.trim().to_string();
        }
        if let Some(ids) = lookup("ADMIN_IDS") {
            self.bot.admin_ids = parse_admin_ids(&ids);
        }
        if let Some(port) = lookup("PORT").and_then(|p| p.trim().parse::<u16>().ok()) {
            self.server.port = port;
        }
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::BannerBotError> {
        super::validation::validate_settings(self)
    }
}

/// Parse a comma separated admin id list, skipping entries that are not numbers
pub fn parse_admin_ids(raw: &str) -> Vec<i64> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| part.parse::<i64>().ok())
        .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
                admin_ids: vec![],
            },
            database: DatabaseConfig {
                url: "mongodb://localhost:27017".to_string(),
                name: "bannerbot".to_string(),
                connect_timeout_seconds: 5,
                max_pool_size: 100,
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 10000,
            },
            banner: BannerConfig {
                width: 1080,
                height: 1920,
                jpeg_quality: 90,
                max_text_length: 60,
                templates_dir: PathBuf::from("templates"),
                font_paths: vec![
                    PathBuf::from("assets/fonts/Inter-Bold.ttf"),
                    PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"),
                    PathBuf::from("/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf"),
                    PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"),
                ],
                watermark: "@BannerBot".to_string(),
            },
            wallpaper: WallpaperConfig {
                enabled: true,
                urls: vec![
                    "https://picsum.photos/1080/1920.jpg".to_string(),
                    "https://picsum.photos/seed/anime/1080/1920".to_string(),
                ],
                timeout_seconds: 10,
                on_start: true,
            },
            rate_limit: RateLimitConfig {
                banners_per_hour: 10,
                admin_exempt: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                directory: "logs".to_string(),
                file_name: "bannerbot.log".to_string(),
            },
        }
    }
}
