//! Picture loading and fitting through the public API.

use crate::integration::write_solid_png;
use agentcard::card::{fit_to_box, load_picture, FitMode};
use agentcard::error::CardError;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use tempfile::TempDir;

const PAD: Rgb<u8> = Rgb([60, 60, 60]);

#[test]
fn test_png_and_jpeg_load() {
    let dir = TempDir::new().unwrap();
    let png = write_solid_png(dir.path(), "a.png", 20, 10, Rgb([10, 20, 30]));
    assert_eq!(load_picture(&png).unwrap().width(), 20);

    let jpeg = dir.path().join("b.JPG");
    RgbImage::from_pixel(16, 16, Rgb([0, 0, 255]))
        .save_with_format(&jpeg, ImageFormat::Jpeg)
        .unwrap();
    assert_eq!(load_picture(&jpeg).unwrap().height(), 16);
}

#[test]
fn test_gif_is_rejected_by_extension() {
    let dir = TempDir::new().unwrap();
    let gif = dir.path().join("anim.gif");
    std::fs::write(&gif, b"GIF89a").unwrap();
    assert!(matches!(
        load_picture(&gif),
        Err(CardError::UnsupportedImageFormat(_))
    ));
}

#[test]
fn test_mislabelled_content_is_rejected() {
    let dir = TempDir::new().unwrap();
    let fake = dir.path().join("fake.png");
    std::fs::write(&fake, b"GIF89a\x01\x00\x01\x00\x00\x00\x00").unwrap();
    assert!(matches!(
        load_picture(&fake),
        Err(CardError::UnsupportedImageFormat(_))
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        load_picture(&dir.path().join("missing.png")),
        Err(CardError::Io(_))
    ));
}

#[test]
fn test_tall_picture_is_padded_left_and_right() {
    let tall = DynamicImage::ImageRgb8(RgbImage::from_pixel(50, 200, Rgb([0, 200, 0])));
    let fitted = fit_to_box(&tall, 180, 180, FitMode::Contain, PAD);
    assert_eq!(fitted.dimensions(), (180, 180));
    // 50x200 scales to 45x180, centred horizontally.
    assert_eq!(*fitted.get_pixel(0, 90), PAD);
    assert_eq!(*fitted.get_pixel(179, 90), PAD);
    assert!(fitted.get_pixel(90, 90)[1] > 180);
}

#[test]
fn test_small_picture_is_scaled_up() {
    let small = DynamicImage::ImageRgb8(RgbImage::from_pixel(9, 9, Rgb([0, 0, 220])));
    let fitted = fit_to_box(&small, 180, 180, FitMode::Contain, PAD);
    assert_eq!(fitted.dimensions(), (180, 180));
    assert!(fitted.get_pixel(90, 90)[2] > 200);
}

#[test]
fn test_cover_crops_instead_of_padding() {
    let wide = DynamicImage::ImageRgb8(RgbImage::from_pixel(400, 100, Rgb([220, 0, 0])));
    let fitted = fit_to_box(&wide, 180, 180, FitMode::Cover, PAD);
    assert_eq!(fitted.dimensions(), (180, 180));
    assert!(fitted.pixels().all(|p| *p != PAD));
}
