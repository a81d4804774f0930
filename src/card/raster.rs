//! Rasterise a `CardLayout` onto an RGB canvas.

use crate::card::font::CardFont;
use crate::card::layout::{CardLayout, PictureSlot, Region, BORDER_WIDTH, BULLET_RADIUS, OUTLINE_PAD};
use crate::card::style::CardStyle;
use image::{imageops, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;

/// Width of the outline drawn around invalid fields.
const OUTLINE_WIDTH: u32 = 2;

/// Draw every element of `layout`. Draw order: background, border, picture,
/// invalid-field outlines, buttons, text.
pub fn rasterize(layout: &CardLayout, style: &CardStyle, font: &CardFont) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(layout.width, layout.height, style.background);

    outline(&mut canvas, layout.border, BORDER_WIDTH, style.box_color);

    match &layout.picture {
        PictureSlot::Picture { region, pixels } => {
            imageops::replace(&mut canvas, pixels, i64::from(region.x), i64::from(region.y));
        }
        PictureSlot::Placeholder { region } => fill(&mut canvas, *region, style.placeholder),
    }

    for region in layout.invalid_regions() {
        outline(
            &mut canvas,
            region.inflate(OUTLINE_PAD),
            OUTLINE_WIDTH,
            style.invalid,
        );
    }

    for action in &layout.actions {
        fill(&mut canvas, action.region, style.box_color);
    }

    for list in [&layout.skills, &layout.metrics] {
        for row in &list.rows {
            draw_filled_circle_mut(&mut canvas, row.dot, BULLET_RADIUS, style.text);
        }
    }

    for line in layout.text_lines() {
        font.draw(&mut canvas, style.text, line.x, line.y, line.size, &line.text);
    }

    canvas
}

fn to_rect(region: Region) -> Option<Rect> {
    if region.width == 0 || region.height == 0 {
        return None;
    }
    Some(Rect::at(region.x, region.y).of_size(region.width, region.height))
}

fn fill(canvas: &mut RgbImage, region: Region, color: Rgb<u8>) {
    if let Some(rect) = to_rect(region) {
        draw_filled_rect_mut(canvas, rect, color);
    }
}

/// Hollow rectangle `width` pixels thick, growing inwards from `region`.
fn outline(canvas: &mut RgbImage, region: Region, width: u32, color: Rgb<u8>) {
    for i in 0..width as i32 {
        if let Some(rect) = to_rect(region.inflate(-i)) {
            draw_hollow_rect_mut(canvas, rect, color);
        }
    }
}
