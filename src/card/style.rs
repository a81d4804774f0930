//! Resolved card style: configuration with colours parsed and limits applied.

use crate::card::picture::FitMode;
use crate::config::{parse_hex_color, CardConfig};
use crate::error::CardError;
use image::Rgb;

#[derive(Debug, Clone, PartialEq)]
pub struct CardStyle {
    pub width: u32,
    pub height: u32,
    pub background: Rgb<u8>,
    pub text: Rgb<u8>,
    pub box_color: Rgb<u8>,
    pub invalid: Rgb<u8>,
    pub placeholder: Rgb<u8>,
    pub title_size: f32,
    pub body_size: f32,
    pub picture_box: u32,
    pub fit: FitMode,
    pub description_max_lines: usize,
}

impl CardStyle {
    pub fn from_config(config: &CardConfig) -> Result<Self, CardError> {
        let color = |key: &str, value: &str| {
            parse_hex_color(value)
                .map_err(|e| CardError::ConfigError(format!("theme.{}: {}", key, e)))
        };
        Ok(Self {
            width: config.canvas.width,
            height: config.canvas.height,
            background: color("background", &config.theme.background)?,
            text: color("text", &config.theme.text)?,
            box_color: color("box", &config.theme.box_color)?,
            invalid: color("invalid", &config.theme.invalid)?,
            placeholder: color("placeholder", &config.theme.placeholder)?,
            title_size: config.font.title_size,
            body_size: config.font.body_size,
            picture_box: config.picture.box_size,
            fit: config.picture.fit,
            description_max_lines: config.layout.description_max_lines,
        })
    }
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 576,
            background: Rgb([30, 30, 30]),
            text: Rgb([255, 255, 255]),
            box_color: Rgb([80, 80, 80]),
            invalid: Rgb([220, 50, 50]),
            placeholder: Rgb([60, 60, 60]),
            title_size: 40.0,
            body_size: 24.0,
            picture_box: 180,
            fit: FitMode::Contain,
            description_max_lines: 3,
        }
    }
}
