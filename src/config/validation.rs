//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use url::Url;
use crate::utils::errors::{BannerBotError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_database_config(&settings.database)?;
    validate_server_config(&settings.server)?;
    validate_banner_config(&settings.banner)?;
    validate_wallpaper_config(&settings.wallpaper)?;
    validate_rate_limit_config(&settings.rate_limit)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(BannerBotError::Config(
            "Bot token is required (set BOT_TOKEN)".to_string()
        ));
    }

    // Telegram tokens look like `<bot id>:<secret>`
    if config.token.len() < 10 || !config.token.contains(':') {
        return Err(BannerBotError::Config(
            "Bot token is malformed".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(BannerBotError::Config(
            "Database URL is required (set MONGO_URI)".to_string()
        ));
    }

    if !config.url.starts_with("mongodb://") && !config.url.starts_with("mongodb+srv://") {
        return Err(BannerBotError::Config(
            format!("Database URL must be a mongodb:// or mongodb+srv:// URI, got: {}", config.url)
        ));
    }

    if config.name.is_empty() {
        return Err(BannerBotError::Config(
            "Database name is required".to_string()
        ));
    }

    if config.connect_timeout_seconds == 0 {
        return Err(BannerBotError::Config(
            "Database connect timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate keep-alive server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(BannerBotError::Config(
            "Server host is required".to_string()
        ));
    }

    if config.port == 0 {
        return Err(BannerBotError::Config(
            "Server port must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate banner rendering configuration
fn validate_banner_config(config: &super::BannerConfig) -> Result<()> {
    if config.width == 0 || config.height == 0 {
        return Err(BannerBotError::Config(
            "Banner dimensions must be greater than 0".to_string()
        ));
    }

    if config.jpeg_quality == 0 || config.jpeg_quality > 100 {
        return Err(BannerBotError::Config(
            format!("JPEG quality must be within 1..=100, got {}", config.jpeg_quality)
        ));
    }

    if config.max_text_length == 0 {
        return Err(BannerBotError::Config(
            "Max text length must be greater than 0".to_string()
        ));
    }

    if config.font_paths.is_empty() {
        return Err(BannerBotError::Config(
            "At least one font path must be configured".to_string()
        ));
    }

    Ok(())
}

/// Validate wallpaper source configuration
fn validate_wallpaper_config(config: &super::WallpaperConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }

    if config.urls.is_empty() {
        return Err(BannerBotError::Config(
            "Wallpaper source is enabled but no URLs are configured".to_string()
        ));
    }

    for raw in &config.urls {
        let url = Url::parse(raw).map_err(|e| {
            BannerBotError::Config(format!("Invalid wallpaper URL {}: {}", raw, e))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(BannerBotError::Config(
                format!("Wallpaper URL must use http or https: {}", raw)
            ));
        }
    }

    if config.timeout_seconds == 0 {
        return Err(BannerBotError::Config(
            "Wallpaper timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate rate limit configuration
fn validate_rate_limit_config(config: &super::RateLimitConfig) -> Result<()> {
    if config.banners_per_hour == 0 {
        return Err(BannerBotError::Config(
            "Banners per hour must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(BannerBotError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(BannerBotError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
