//! Font loading, caption layout and glyph drawing

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use rusttype::{point, Font, PositionedGlyph, Scale};
use tracing::{debug, info};

use crate::utils::errors::{BannerBotError, Result};

/// Smallest font size the auto-sizer will go down to
pub const MIN_FONT_PX: f32 = 30.0;
/// Step used when shrinking the font
pub const FONT_STEP_PX: f32 = 4.0;
pub const MAX_LINES: usize = 3;
/// Share of the canvas width a caption line may occupy
pub const WIDTH_RATIO: f32 = 0.9;

const ELLIPSIS: &str = "...";

/// The TrueType font every banner is drawn with
pub struct FontBook {
    font: Font<'static>,
    source: PathBuf,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook").field("source", &self.source).finish()
    }
}

impl FontBook {
    /// Load the first usable font from `paths`
    pub fn load(paths: &[PathBuf]) -> Result<Self> {
        for path in paths {
            match Self::from_file(path) {
                Ok(book) => {
                    info!(font = %path.display(), "Font loaded");
                    return Ok(book);
                }
                Err(e) => debug!(font = %path.display(), error = %e, "Font candidate skipped"),
            }
        }

        Err(BannerBotError::Config(format!(
            "No usable font found, tried: {}",
            paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
        )))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let mut book = Self::from_bytes(bytes)?;
        book.source = path.to_path_buf();
        Ok(book)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let font = Font::try_from_vec(bytes)
            .ok_or_else(|| BannerBotError::Render("font data is not a valid TrueType font".to_string()))?;
        Ok(Self {
            font,
            source: PathBuf::from("<memory>"),
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    fn glyphs(&self, px: f32, text: &str, x: f32, y: f32) -> Vec<PositionedGlyph<'_>> {
        let scale = Scale::uniform(px);
        let ascent = self.font.v_metrics(scale).ascent;
        self.font.layout(text, scale, point(x, y + ascent)).collect()
    }

    /// Advance width of `text` at `px`
    pub fn text_width(&self, px: f32, text: &str) -> f32 {
        self.glyphs(px, text, 0.0, 0.0)
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
    }

    /// Distance between consecutive baselines
    pub fn line_height(&self, px: f32) -> f32 {
        let v = self.font.v_metrics(Scale::uniform(px));
        v.ascent - v.descent + v.line_gap
    }

    /// Draw `text` with its top-left corner at (`x`, `y`), blending `color` over the image
    pub fn draw(&self, img: &mut RgbaImage, px: f32, x: f32, y: f32, color: Rgba<u8>, text: &str) {
        let (width, height) = img.dimensions();

        for glyph in self.glyphs(px, text, x, y) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = gx as i32 + bb.min.x;
                let py = gy as i32 + bb.min.y;
                if px < 0 || py < 0 || px as u32 >= width || py as u32 >= height {
                    return;
                }
                blend(img.get_pixel_mut(px as u32, py as u32), color, coverage);
            });
        }
    }

    /// Draw `text` in `fill` surrounded by a `stroke`-coloured outline of `radius` pixels
    #[allow(clippy::too_many_arguments)]
    pub fn draw_outlined(
        &self,
        img: &mut RgbaImage,
        px: f32,
        x: f32,
        y: f32,
        text: &str,
        fill: Rgba<u8>,
        stroke: Rgba<u8>,
        radius: i32,
    ) {
        for dx in -radius..=radius {
            for dy in -radius..=radius {
                if (dx != 0 || dy != 0) && dx * dx + dy * dy <= radius * radius {
                    self.draw(img, px, x + dx as f32, y + dy as f32, stroke, text);
                }
            }
        }
        self.draw(img, px, x, y, fill, text);
    }
}

/// Source-over blend of `color` scaled by glyph `coverage`
fn blend(dst: &mut Rgba<u8>, color: Rgba<u8>, coverage: f32) {
    let sa = coverage.clamp(0.0, 1.0) * color[3] as f32 / 255.0;
    if sa <= 0.0 {
        return;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    for c in 0..3 {
        let value = (color[c] as f32 * sa + dst[c] as f32 * da * (1.0 - sa)) / out_a;
        dst[c] = value.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round() as u8;
}

/// A caption broken into lines at a chosen size
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionLayout {
    pub px: f32,
    pub lines: Vec<String>,
}

impl CaptionLayout {
    pub fn block_height(&self, font: &FontBook) -> f32 {
        font.line_height(self.px) * self.lines.len() as f32
    }
}

/// Pick the largest size, starting at `canvas_width / 14`, at which the
/// caption wraps into at most three lines that fit 90% of the width.
pub fn layout_caption(font: &FontBook, text: &str, canvas_width: u32) -> CaptionLayout {
    let max_width = canvas_width as f32 * WIDTH_RATIO;
    let mut px = (canvas_width / 14) as f32;

    while px > MIN_FONT_PX {
        if let Some(lines) = try_wrap(font, px, text, max_width, MAX_LINES) {
            return CaptionLayout { px, lines };
        }
        px -= FONT_STEP_PX;
    }

    let px = MIN_FONT_PX.min((canvas_width / 14) as f32).max(1.0);
    CaptionLayout {
        px,
        lines: wrap_lines(font, px, text, max_width, MAX_LINES),
    }
}

/// Greedy word wrap; `None` when the text needs more than `max_lines`
/// lines or a single word is wider than `max_width`.
fn try_wrap(font: &FontBook, px: f32, text: &str, max_width: f32, max_lines: usize) -> Option<Vec<String>> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if font.text_width(px, word) > max_width {
            return None;
        }
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if font.text_width(px, &candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
            if lines.len() >= max_lines {
                return None;
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    (lines.len() <= max_lines).then_some(lines)
}

/// Word wrap that always succeeds: the last allowed line is shortened and
/// ends in an ellipsis when the text does not fit.
pub fn wrap_lines(font: &FontBook, px: f32, text: &str, max_width: f32, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut overflow = false;

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if current.is_empty() || font.text_width(px, &candidate) <= max_width {
            current = candidate;
        } else if lines.len() + 1 < max_lines {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            overflow = true;
            break;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    if let Some(last) = lines.last_mut() {
        if overflow || font.text_width(px, last) > max_width {
            *last = shorten_with_ellipsis(font, px, last, max_width);
        }
    }
    lines
}

fn shorten_with_ellipsis(font: &FontBook, px: f32, line: &str, max_width: f32) -> String {
    let mut kept = line.to_string();
    while !kept.is_empty() && font.text_width(px, &format!("{}{}", kept, ELLIPSIS)) > max_width {
        match kept.rsplit_once(' ') {
            Some((head, _)) => kept = head.to_string(),
            None => {
                kept.pop();
            }
        }
    }
    format!("{}{}", kept, ELLIPSIS)
}
