//! Font loading, text measuring and text drawing.
//!
//! A configured TrueType/OpenType file is preferred. When none is configured,
//! or it cannot be read, the built-in 8x8 bitmap font is used instead, scaled
//! up by whole pixels. Both paths are deterministic.

use crate::config::FontConfig;
use crate::error::CardError;
use ab_glyph::{FontVec, PxScale};
use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::fmt;
use std::path::{Path, PathBuf};

/// Side length of a bitmap glyph cell before scaling.
const BITMAP_CELL: u32 = 8;

/// Glyph used for characters the bitmap font has no shape for.
const BITMAP_FALLBACK: char = '?';

pub enum CardFont {
    TrueType { font: FontVec, path: PathBuf },
    Bitmap,
}

impl CardFont {
    /// Load the configured font, falling back to the bitmap font on any failure.
    pub fn load(config: &FontConfig) -> Self {
        match config.path.as_deref() {
            Some(path) => match Self::from_file(path) {
                Ok(font) => font,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Falling back to built-in bitmap font"
                    );
                    CardFont::Bitmap
                }
            },
            None => CardFont::Bitmap,
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, CardError> {
        let bytes = std::fs::read(path).map_err(|e| {
            CardError::Font(format!("Failed to read font {}: {}", path.display(), e))
        })?;
        let font = FontVec::try_from_vec(bytes).map_err(|e| {
            CardError::Font(format!("Failed to parse font {}: {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), "Loaded TrueType font");
        Ok(CardFont::TrueType {
            font,
            path: path.to_path_buf(),
        })
    }

    pub fn builtin() -> Self {
        CardFont::Bitmap
    }

    pub fn description(&self) -> String {
        match self {
            CardFont::TrueType { path, .. } => path.display().to_string(),
            CardFont::Bitmap => "built-in bitmap".to_string(),
        }
    }

    pub fn line_height(&self, size: f32) -> u32 {
        line_height(size)
    }

    /// Rendered width of `text` in pixels.
    pub fn measure(&self, size: f32, text: &str) -> u32 {
        if text.is_empty() {
            return 0;
        }
        match self {
            CardFont::TrueType { font, .. } => text_size(PxScale::from(size), font, text).0,
            CardFont::Bitmap => {
                let advance = BITMAP_CELL * bitmap_scale(size);
                text.chars().count() as u32 * advance
            }
        }
    }

    /// Draw `text` with its top-left corner at (`x`, `y`). Pixels outside the
    /// canvas are clipped.
    pub fn draw(&self, canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, size: f32, text: &str) {
        match self {
            CardFont::TrueType { font, .. } => {
                draw_text_mut(canvas, color, x, y, PxScale::from(size), font, text)
            }
            CardFont::Bitmap => draw_bitmap_text(canvas, color, x, y, bitmap_scale(size), text),
        }
    }
}

impl fmt::Debug for CardFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardFont::TrueType { path, .. } => f
                .debug_struct("CardFont::TrueType")
                .field("path", path)
                .finish(),
            CardFont::Bitmap => f.write_str("CardFont::Bitmap"),
        }
    }
}

/// Vertical distance between consecutive lines at `size`. The same for every font
/// so the grid does not depend on which font was loaded.
pub fn line_height(size: f32) -> u32 {
    (size * 1.25).round().max(1.0) as u32
}

fn bitmap_scale(size: f32) -> u32 {
    ((size / BITMAP_CELL as f32).round() as u32).max(1)
}

fn bitmap_glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get(BITMAP_FALLBACK))
        .unwrap_or([0; 8])
}

fn draw_bitmap_text(canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, scale: u32, text: &str) {
    let advance = (BITMAP_CELL * scale) as i32;
    for (i, c) in text.chars().enumerate() {
        let glyph = bitmap_glyph(c);
        let origin_x = x + i as i32 * advance;
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..BITMAP_CELL {
                // Bit 0 is the leftmost pixel of the row.
                if bits & (1 << col) == 0 {
                    continue;
                }
                let px = origin_x + (col * scale) as i32;
                let py = y + (row as u32 * scale) as i32;
                fill_block(canvas, color, px, py, scale);
            }
        }
    }
}

fn fill_block(canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, scale: u32) {
    let (width, height) = canvas.dimensions();
    for dy in 0..scale as i32 {
        for dx in 0..scale as i32 {
            let (px, py) = (x + dx, y + dy);
            if px >= 0 && py >= 0 && (px as u32) < width && (py as u32) < height {
                canvas.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}
