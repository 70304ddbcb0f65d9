//! Background templates
//!
//! Templates are static files `template{n}.jpg` (or `.png`) under the
//! configured directory. A missing or unreadable file falls back to a
//! generated gradient so a deploy without assets still produces banners.

use std::fmt;
use std::path::PathBuf;

use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};
use tracing::warn;

use crate::utils::errors::{BannerBotError, Result};

pub const TEMPLATE_COUNT: u8 = 4;

const EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// A validated template number in `1..=TEMPLATE_COUNT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemplateId(u8);

impl TemplateId {
    pub fn new(id: i64) -> Result<Self> {
        if (1..=TEMPLATE_COUNT as i64).contains(&id) {
            Ok(Self(id as u8))
        } else {
            Err(BannerBotError::InvalidTemplate { template_id: id })
        }
    }

    /// Parse a template number coming from callback data
    pub fn parse(raw: &str) -> Result<Self> {
        let id = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| BannerBotError::InvalidInput(format!("'{}' is not a template number", raw)))?;
        Self::new(id)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = TemplateId> {
        (1..=TEMPLATE_COUNT).map(TemplateId)
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Loads template backgrounds sized to the banner canvas
#[derive(Debug, Clone)]
pub struct TemplateLibrary {
    dir: PathBuf,
    width: u32,
    height: u32,
}

impl TemplateLibrary {
    pub fn new(dir: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            dir: dir.into(),
            width,
            height,
        }
    }

    /// First existing file for the template, trying each known extension
    pub fn path_for(&self, id: TemplateId) -> Option<PathBuf> {
        EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("template{}.{}", id, ext)))
            .find(|path| path.is_file())
    }

    /// Background for `id`, or the gradient when the file is missing or broken
    pub fn load(&self, id: TemplateId) -> RgbaImage {
        let Some(path) = self.path_for(id) else {
            warn!(template_id = id.get(), dir = %self.dir.display(), "Template file missing, using gradient");
            return gradient(self.width, self.height);
        };

        match image::open(&path) {
            Ok(img) => fit(img, self.width, self.height),
            Err(e) => {
                warn!(template_id = id.get(), path = %path.display(), error = %e, "Template unreadable, using gradient");
                gradient(self.width, self.height)
            }
        }
    }
}

/// Scale to cover the canvas and crop the overflow around the centre
pub fn fit(img: DynamicImage, width: u32, height: u32) -> RgbaImage {
    img.resize_to_fill(width, height, FilterType::Lanczos3).to_rgba8()
}

/// Dark vertical gradient, purple at the bottom
pub fn gradient(width: u32, height: u32) -> RgbaImage {
    let height_f = height.max(1) as f32;
    RgbaImage::from_fn(width, height, |_, y| {
        let t = y as f32 / height_f;
        Rgba([
            (18.0 + t * 45.0) as u8,
            (12.0 + t * 28.0) as u8,
            (38.0 + t * 90.0) as u8,
            255,
        ])
    })
}
