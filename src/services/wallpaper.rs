//! Random wallpaper source
//! 
//! Fetches a background image from a public image host. Best effort: any
//! failure is reported to the caller, which falls back to bundled templates.

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::config::WallpaperConfig;
use crate::utils::errors::{BannerBotError, Result};

/// Anything larger is not a wallpaper
const MAX_WALLPAPER_BYTES: usize = 15 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct WallpaperService {
    client: Client,
    urls: Vec<Url>,
    enabled: bool,
}

impl WallpaperService {
    /// Create a new WallpaperService instance
    pub fn new(config: &WallpaperConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(format!("{}/{}", crate::NAME, crate::VERSION))
            .build()?;

        let urls = config
            .urls
            .iter()
            .map(|raw| {
                Url::parse(raw).map_err(|e| BannerBotError::Config(format!("Invalid wallpaper URL {}: {}", raw, e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            client,
            urls,
            enabled: config.enabled && !config.urls.is_empty(),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Download one random wallpaper and return the raw image bytes
    pub async fn fetch_random(&self) -> Result<Vec<u8>> {
        if !self.enabled {
            return Err(BannerBotError::InvalidInput("Wallpapers are disabled".to_string()));
        }

        let mut url = self
            .urls
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| BannerBotError::Config("No wallpaper URLs configured".to_string()))?;

        // Hosts like picsum cache by URL; a random query gives a fresh picture
        let seed: u32 = rand::thread_rng().gen();
        url.query_pairs_mut().append_pair("random", &seed.to_string());

        debug!(url = %url, "Fetching wallpaper");
        let response = self.client.get(url.clone()).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;

        if bytes.is_empty() || bytes.len() > MAX_WALLPAPER_BYTES {
            warn!(url = %url, size = bytes.len(), "Wallpaper has unusable size");
            return Err(BannerBotError::Render(format!("wallpaper size {} is out of range", bytes.len())));
        }
        if image::guess_format(&bytes).is_err() {
            warn!(url = %url, "Wallpaper host returned something that is not an image");
            return Err(BannerBotError::Render("wallpaper is not an image".to_string()));
        }

        Ok(bytes.to_vec())
    }
}
