//! Configuration System
//!
//! Layered configuration for card composition: canvas size, theme colours, fonts,
//! picture fitting, layout limits, export location and logging. Sources are merged
//! by the `config` crate (defaults, global file, workspace files, environment) and
//! validated before use.

use crate::card::layout::minimum_canvas;
use crate::card::picture::FitMode;
use crate::logging::LoggingConfig;
use image::Rgb;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Largest canvas side accepted, in pixels.
pub const MAX_CANVAS_SIDE: u32 = 16_384;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardConfig {
    #[serde(default)]
    pub canvas: CanvasConfig,

    #[serde(default)]
    pub theme: ThemeConfig,

    #[serde(default)]
    pub font: FontConfig,

    #[serde(default)]
    pub picture: PictureConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Canvas size of the exported card, in pixels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    #[serde(default = "default_canvas_width")]
    pub width: u32,
    #[serde(default = "default_canvas_height")]
    pub height: u32,
}

fn default_canvas_width() -> u32 {
    1024
}

fn default_canvas_height() -> u32 {
    576
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
        }
    }
}

/// Theme colours as `#rrggbb` strings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_text")]
    pub text: String,
    /// Border and button fill
    #[serde(default = "default_box", rename = "box")]
    pub box_color: String,
    /// Outline drawn around invalid fields
    #[serde(default = "default_invalid")]
    pub invalid: String,
    /// Fill of the empty picture region and picture padding
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

fn default_background() -> String {
    "#1e1e1e".to_string()
}

fn default_text() -> String {
    "#ffffff".to_string()
}

fn default_box() -> String {
    "#505050".to_string()
}

fn default_invalid() -> String {
    "#dc3232".to_string()
}

fn default_placeholder() -> String {
    "#3c3c3c".to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            text: default_text(),
            box_color: default_box(),
            invalid: default_invalid(),
            placeholder: default_placeholder(),
        }
    }
}

/// Font selection. Without a path the built-in bitmap font is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    /// TrueType/OpenType font file
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_title_size")]
    pub title_size: f32,
    #[serde(default = "default_body_size")]
    pub body_size: f32,
}

fn default_title_size() -> f32 {
    40.0
}

fn default_body_size() -> f32 {
    24.0
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: None,
            title_size: default_title_size(),
            body_size: default_body_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PictureConfig {
    /// Edge length of the square picture region
    #[serde(default = "default_box_size")]
    pub box_size: u32,
    #[serde(default)]
    pub fit: FitMode,
}

fn default_box_size() -> u32 {
    180
}

impl Default for PictureConfig {
    fn default() -> Self {
        Self {
            box_size: default_box_size(),
            fit: FitMode::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Wrapped description lines before truncation
    #[serde(default = "default_description_max_lines")]
    pub description_max_lines: usize,
}

fn default_description_max_lines() -> usize {
    3
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            description_max_lines: default_description_max_lines(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory exported cards are written to (relative paths resolve against the workspace)
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    Canvas(String),
    Theme(String, String),
    Font(String),
    Picture(String),
    Layout(String),
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigIssue::Canvas(msg) => write!(f, "Canvas: {}", msg),
            ConfigIssue::Theme(key, msg) => write!(f, "Theme '{}': {}", key, msg),
            ConfigIssue::Font(msg) => write!(f, "Font: {}", msg),
            ConfigIssue::Picture(msg) => write!(f, "Picture: {}", msg),
            ConfigIssue::Layout(msg) => write!(f, "Layout: {}", msg),
        }
    }
}

impl std::error::Error for ConfigIssue {}

/// Parse a `#rrggbb` colour.
pub fn parse_hex_color(value: &str) -> Result<Rgb<u8>, String> {
    let digits = value
        .strip_prefix('#')
        .ok_or_else(|| format!("'{}' must start with '#'", value))?;
    if digits.len() != 6 {
        return Err(format!("'{}' must have exactly six hex digits", value));
    }
    let bytes = hex::decode(digits).map_err(|e| format!("'{}' is not valid hex: {}", value, e))?;
    Ok(Rgb([bytes[0], bytes[1], bytes[2]]))
}

impl ThemeConfig {
    fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("background", &self.background),
            ("text", &self.text),
            ("box", &self.box_color),
            ("invalid", &self.invalid),
            ("placeholder", &self.placeholder),
        ]
    }
}

impl CardConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ConfigIssue>> {
        let mut errors = Vec::new();

        for (key, value) in self.theme.entries() {
            if let Err(e) = parse_hex_color(value) {
                errors.push(ConfigIssue::Theme(key.to_string(), e));
            }
        }

        let (width, height) = (self.canvas.width, self.canvas.height);
        if width > MAX_CANVAS_SIDE || height > MAX_CANVAS_SIDE {
            errors.push(ConfigIssue::Canvas(format!(
                "{}x{} exceeds the limit of {} pixels per side",
                width, height, MAX_CANVAS_SIDE
            )));
        }

        let sizes_positive = self.font.title_size > 0.0 && self.font.body_size > 0.0;
        if !sizes_positive {
            errors.push(ConfigIssue::Font(
                "title_size and body_size must be positive".to_string(),
            ));
        } else if self.font.title_size > height as f32 || self.font.body_size > height as f32 {
            errors.push(ConfigIssue::Font(format!(
                "title_size and body_size must not exceed the canvas height ({})",
                height
            )));
        }

        if self.picture.box_size == 0 {
            errors.push(ConfigIssue::Picture("box_size must be positive".to_string()));
        } else if self.picture.box_size > width.min(height) {
            errors.push(ConfigIssue::Picture(format!(
                "box_size {} does not fit a {}x{} canvas",
                self.picture.box_size, width, height
            )));
        }

        if self.layout.description_max_lines == 0 {
            errors.push(ConfigIssue::Layout(
                "description_max_lines must be at least 1".to_string(),
            ));
        }

        if sizes_positive {
            let (min_width, min_height) =
                minimum_canvas(self.picture.box_size, self.font.body_size);
            if self.canvas.width < min_width || self.canvas.height < min_height {
                errors.push(ConfigIssue::Canvas(format!(
                    "{}x{} is too small for the card grid (need at least {}x{})",
                    self.canvas.width, self.canvas.height, min_width, min_height
                )));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
