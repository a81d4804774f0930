//! Picture loading and fit-to-box scaling.

use crate::error::CardError;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, ImageReader, Rgb, RgbImage, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Resampling filter used for every resize. Fixed so output is reproducible.
pub const RESAMPLE_FILTER: FilterType = FilterType::Lanczos3;

/// File extensions accepted for upload (compared case-insensitively).
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// How a picture is made to fill its box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Scale to fit inside the box, pad the rest.
    #[default]
    Contain,
    /// Scale to cover the box, crop the overflow.
    Cover,
}

/// Decode a PNG or JPEG picture.
///
/// Both the file extension and the sniffed content must be PNG/JPEG. The file
/// is closed as soon as decoding finishes.
pub fn load_picture(path: &Path) -> Result<DynamicImage, CardError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext) => {}
        Some(ext) => {
            return Err(CardError::UnsupportedImageFormat(format!(
                "{} has extension .{}",
                path.display(),
                ext
            )))
        }
        None => {
            return Err(CardError::UnsupportedImageFormat(format!(
                "{} has no file extension",
                path.display()
            )))
        }
    }

    let reader = ImageReader::open(path)?.with_guessed_format()?;
    match reader.format() {
        Some(ImageFormat::Png) | Some(ImageFormat::Jpeg) => {}
        Some(other) => {
            return Err(CardError::UnsupportedImageFormat(format!(
                "{} contains {:?} data",
                path.display(),
                other
            )))
        }
        None => {
            return Err(CardError::UnsupportedImageFormat(format!(
                "{} is not a recognised image",
                path.display()
            )))
        }
    }

    let picture = reader.decode()?;
    tracing::debug!(
        path = %path.display(),
        width = picture.width(),
        height = picture.height(),
        "Decoded picture"
    );
    Ok(picture)
}

/// Scale `picture` into a `width` x `height` box, preserving its aspect ratio.
///
/// The result is always exactly `width` x `height`. Transparent pixels and any
/// padding are filled with `pad`.
pub fn fit_to_box(
    picture: &DynamicImage,
    width: u32,
    height: u32,
    mode: FitMode,
    pad: Rgb<u8>,
) -> RgbImage {
    let mut boxed = RgbaImage::from_pixel(width, height, Rgba([pad[0], pad[1], pad[2], 255]));
    if width == 0 || height == 0 || picture.width() == 0 || picture.height() == 0 {
        return DynamicImage::ImageRgba8(boxed).to_rgb8();
    }

    let scaled = match mode {
        FitMode::Contain => picture.resize(width, height, RESAMPLE_FILTER),
        FitMode::Cover => picture.resize_to_fill(width, height, RESAMPLE_FILTER),
    }
    .to_rgba8();

    let x = width.saturating_sub(scaled.width()) / 2;
    let y = height.saturating_sub(scaled.height()) / 2;
    imageops::overlay(&mut boxed, &scaled, i64::from(x), i64::from(y));

    DynamicImage::ImageRgba8(boxed).to_rgb8()
}
