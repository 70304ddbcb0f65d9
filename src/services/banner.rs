//! Banner generation
//!
//! Ties the rate limiter, compositor, wallpaper source and store together:
//! rate limit, render off the async runtime, count, audit.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::database::BannerStore;
use crate::engine::{Compositor, TemplateId};
use crate::middleware::{AccessFilter, BannerRateLimiter};
use crate::models::{actions, LogEntry};
use crate::services::wallpaper::WallpaperService;
use crate::state::Background;
use crate::utils::errors::{BannerBotError, Result};
use crate::utils::helpers::char_len;
use crate::utils::logging::log_render_failure;

/// Template used when a wallpaper cannot be fetched
pub const FALLBACK_TEMPLATE: i64 = 1;

/// A rendered banner ready to be sent
#[derive(Debug, Clone)]
pub struct Banner {
    pub jpeg: Vec<u8>,
    /// The user's banner count after this one, `None` when it could not be recorded
    pub total_for_user: Option<u64>,
    /// The wallpaper could not be used and template 1 was drawn instead
    pub used_fallback: bool,
}

#[derive(Clone)]
pub struct BannerService {
    compositor: Arc<Compositor>,
    store: Arc<dyn BannerStore>,
    limiter: BannerRateLimiter,
    wallpapers: WallpaperService,
    access: AccessFilter,
    admin_exempt: bool,
}

impl BannerService {
    pub fn new(
        compositor: Arc<Compositor>,
        store: Arc<dyn BannerStore>,
        limiter: BannerRateLimiter,
        wallpapers: WallpaperService,
        access: AccessFilter,
        admin_exempt: bool,
    ) -> Self {
        Self {
            compositor,
            store,
            limiter,
            wallpapers,
            access,
            admin_exempt,
        }
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    /// Render a banner for `user_id` and record it
    pub async fn create_banner(&self, user_id: i64, background: Background, text: &str) -> Result<Banner> {
        // Bad captions should not burn quota
        let caption = self.compositor.validate_text(text)?;

        if !(self.admin_exempt && self.access.is_admin(user_id)) {
            self.limiter.check(user_id)?;
        }

        let (jpeg, template_id, used_fallback) = match background {
            Background::Template(id) => (self.render_template(user_id, id.get() as i64, &caption).await?, Some(id), false),
            Background::Wallpaper => match self.render_wallpaper(user_id, &caption).await {
                Ok(jpeg) => (jpeg, None, false),
                Err(e) => {
                    warn!(user_id = user_id, error = %e, "Wallpaper unavailable, using fallback template");
                    let jpeg = self.render_template(user_id, FALLBACK_TEMPLATE, &caption).await?;
                    (jpeg, TemplateId::new(FALLBACK_TEMPLATE).ok(), true)
                }
            },
        };

        // Post-render storage failures are logged; the banner is still delivered
        let total_for_user = match self.store.increment_banner_count(user_id).await {
            Ok(total) => Some(total),
            Err(e) => {
                error!(user_id = user_id, error = %e, "Failed to count rendered banner");
                None
            }
        };

        let details = match template_id {
            Some(id) => format!("template={} len={}", id, char_len(&caption)),
            None => format!("template=wallpaper len={}", char_len(&caption)),
        };
        if let Err(e) = self
            .store
            .append_log(LogEntry::new(user_id, actions::BANNER_CREATED, Some(details)))
            .await
        {
            error!(user_id = user_id, error = %e, "Failed to write banner audit entry");
        }

        info!(user_id = user_id, background = %background, total = ?total_for_user, "Banner created");
        Ok(Banner {
            jpeg,
            total_for_user,
            used_fallback,
        })
    }

    async fn render_template(&self, user_id: i64, template_id: i64, caption: &str) -> Result<Vec<u8>> {
        let compositor = Arc::clone(&self.compositor);
        let text = caption.to_string();

        let result = tokio::task::spawn_blocking(move || compositor.compose(template_id, &text))
            .await
            .map_err(|e| BannerBotError::Render(format!("render task failed: {}", e)))
            .and_then(|r| r);

        if let Err(e) = &result {
            log_render_failure(user_id, u8::try_from(template_id).ok(), char_len(caption), &e.to_string());
        }
        result
    }

    async fn render_wallpaper(&self, user_id: i64, caption: &str) -> Result<Vec<u8>> {
        let bytes = self.wallpapers.fetch_random().await?;
        let compositor = Arc::clone(&self.compositor);
        let text = caption.to_string();

        let result = tokio::task::spawn_blocking(move || compositor.compose_on(&bytes, &text))
            .await
            .map_err(|e| BannerBotError::Render(format!("render task failed: {}", e)))
            .and_then(|r| r);

        if let Err(e) = &result {
            log_render_failure(user_id, None, char_len(caption), &e.to_string());
        }
        result
    }
}
