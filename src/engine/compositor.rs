//! Banner compositing
//!
//! Turns a background and a caption into the final JPEG: contrast boost,
//! blurred caption panel, glow, outlined caption and watermark.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use tracing::debug;

use crate::config::BannerConfig;
use crate::engine::template::{fit, TemplateId, TemplateLibrary};
use crate::engine::typography::{layout_caption, CaptionLayout, FontBook};
use crate::utils::errors::{BannerBotError, Result};
use crate::utils::helpers::{char_len, sanitize_caption};

/// `imageops::contrast` takes a percentage on a squared scale; 9.5 is about x1.2
const CONTRAST: f32 = 9.5;
const STROKE_RADIUS: i32 = 4;
const TEXT_LIFT_PX: f32 = 120.0;
const PANEL_PADDING_PX: f32 = 40.0;
const PANEL_BRIGHTNESS: f32 = 0.55;
const GLOW_SIGMA: f32 = 6.0;

const FILL: Rgba<u8> = Rgba([255, 255, 255, 255]);
const STROKE: Rgba<u8> = Rgba([0, 0, 0, 255]);
const GLOW: Rgba<u8> = Rgba([120, 170, 255, 180]);
const WATERMARK: Rgba<u8> = Rgba([210, 210, 210, 255]);

/// Renders banners; cheap to share behind an `Arc`
#[derive(Debug)]
pub struct Compositor {
    templates: TemplateLibrary,
    font: FontBook,
    width: u32,
    height: u32,
    jpeg_quality: u8,
    max_text_length: usize,
    watermark: String,
}

impl Compositor {
    /// Build a compositor, loading the first usable font from the configuration
    pub fn new(config: &BannerConfig) -> Result<Self> {
        let font = FontBook::load(&config.font_paths)?;
        Ok(Self::with_font(config, font))
    }

    pub fn with_font(config: &BannerConfig, font: FontBook) -> Self {
        Self {
            templates: TemplateLibrary::new(config.templates_dir.clone(), config.width, config.height),
            font,
            width: config.width,
            height: config.height,
            jpeg_quality: config.jpeg_quality,
            max_text_length: config.max_text_length,
            watermark: config.watermark.clone(),
        }
    }

    pub fn max_text_length(&self) -> usize {
        self.max_text_length
    }

    /// Normalize a caption and check it against the length limit
    pub fn validate_text(&self, text: &str) -> Result<String> {
        let caption = sanitize_caption(text);
        if caption.is_empty() {
            return Err(BannerBotError::InvalidInput("Please send some text for the banner.".to_string()));
        }

        let length = char_len(&caption);
        if length > self.max_text_length {
            return Err(BannerBotError::InputTooLong {
                length,
                max: self.max_text_length,
            });
        }
        Ok(caption)
    }

    /// Render `text` onto template `template_id` and encode the result as JPEG
    pub fn compose(&self, template_id: i64, text: &str) -> Result<Vec<u8>> {
        let id = TemplateId::new(template_id)?;
        let caption = self.validate_text(text)?;

        let background = self.templates.load(id);
        self.render(background, &caption)
    }

    /// Render `text` onto arbitrary image bytes, e.g. a fetched wallpaper
    pub fn compose_on(&self, background: &[u8], text: &str) -> Result<Vec<u8>> {
        let caption = self.validate_text(text)?;

        let decoded = image::load_from_memory(background)
            .map_err(|e| BannerBotError::Render(format!("background could not be decoded: {}", e)))?;
        self.render(fit(decoded, self.width, self.height), &caption)
    }

    fn render(&self, background: RgbaImage, caption: &str) -> Result<Vec<u8>> {
        let mut canvas = imageops::contrast(&background, CONTRAST);

        let layout = layout_caption(&self.font, caption, self.width);
        let line_height = self.font.line_height(layout.px);
        let block_height = layout.block_height(&self.font);
        let top = ((self.height as f32 - block_height) / 2.0 - TEXT_LIFT_PX).max(0.0);
        debug!(px = layout.px, lines = layout.lines.len(), "Caption laid out");

        let panel = self.panel_box(top, block_height);
        blur_panel(&mut canvas, panel);
        self.draw_glow(&mut canvas, panel, &layout, top);

        for (i, line) in layout.lines.iter().enumerate() {
            let x = self.centered_x(layout.px, line);
            let y = top + line_height * i as f32;
            self.font.draw_outlined(&mut canvas, layout.px, x, y, line, FILL, STROKE, STROKE_RADIUS);
        }

        if !self.watermark.is_empty() {
            let px = (self.width / 32).max(12) as f32;
            self.font.draw(&mut canvas, px, 30.0, 30.0, WATERMARK, &self.watermark);
        }

        self.encode(canvas)
    }

    fn centered_x(&self, px: f32, line: &str) -> f32 {
        ((self.width as f32 - self.font.text_width(px, line)) / 2.0).max(0.0)
    }

    /// Panel rectangle (x, y, w, h) spanning 90% of the width around the caption block
    fn panel_box(&self, top: f32, block_height: f32) -> (u32, u32, u32, u32) {
        let x = (self.width as f32 * 0.05) as u32;
        let w = (self.width as f32 * 0.90) as u32;
        let y = (top - PANEL_PADDING_PX).max(0.0) as u32;
        let bottom = (top + block_height + PANEL_PADDING_PX).min(self.height as f32) as u32;
        (x, y, w.max(1), bottom.saturating_sub(y).max(1))
    }

    fn draw_glow(&self, canvas: &mut RgbaImage, panel: (u32, u32, u32, u32), layout: &CaptionLayout, top: f32) {
        let (px0, py0, pw, ph) = panel;
        let line_height = self.font.line_height(layout.px);

        let mut glow = RgbaImage::new(pw, ph);
        for (i, line) in layout.lines.iter().enumerate() {
            let x = self.centered_x(layout.px, line) - px0 as f32;
            let y = top + line_height * i as f32 - py0 as f32;
            self.font.draw(&mut glow, layout.px, x, y, GLOW, line);
        }

        let glow = soften(&glow, GLOW_SIGMA);
        imageops::overlay(canvas, &glow, px0 as i64, py0 as i64);
    }

    fn encode(&self, canvas: RgbaImage) -> Result<Vec<u8>> {
        let rgb = DynamicImage::ImageRgba8(canvas).to_rgb8();
        let mut out = Vec::new();
        JpegEncoder::new_with_quality(&mut out, self.jpeg_quality)
            .encode_image(&rgb)
            .map_err(|e| BannerBotError::Render(format!("JPEG encoding failed: {}", e)))?;
        Ok(out)
    }
}

/// Blur and darken a rectangle of the canvas so the caption stays readable
fn blur_panel(canvas: &mut RgbaImage, (x, y, w, h): (u32, u32, u32, u32)) {
    let region = imageops::crop_imm(canvas, x, y, w, h).to_image();
    let mut region = soften(&region, 4.0);
    for pixel in region.pixels_mut() {
        for c in 0..3 {
            pixel[c] = (pixel[c] as f32 * PANEL_BRIGHTNESS) as u8;
        }
        pixel[3] = 255;
    }
    imageops::replace(canvas, &region, x as i64, y as i64);
}

/// Gaussian blur done at quarter resolution, then scaled back
fn soften(img: &RgbaImage, sigma: f32) -> RgbaImage {
    let (w, h) = img.dimensions();
    let small = imageops::resize(img, (w / 4).max(1), (h / 4).max(1), FilterType::Triangle);
    let blurred = imageops::blur(&small, sigma);
    imageops::resize(&blurred, w, h, FilterType::Triangle)
}
