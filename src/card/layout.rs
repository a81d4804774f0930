//! Fixed-grid card layout.
//!
//! `layout_card` turns a profile into a `CardLayout`: every region, text line,
//! bullet and button the card will contain, with positions in canvas pixels.
//! It does no drawing. Text is wrapped and truncated here so the raster stage
//! only places what it is given.
//!
//! ```text
//!  +--------------------------------------------------------------+
//!  | [picture]  Title                                             |
//!  |            Description, wrapped to the text column           |
//!  |                                                              |
//!  | Core Skills:                  Metrics:                       |
//!  |   * skill                       * metric                     |
//!  |                                                              |
//!  |  [ Execute ]                                   [ Details ]   |
//!  +--------------------------------------------------------------+
//! ```

use crate::agent::validation::{validate_profile, FieldId, ProfileReport};
use crate::agent::lists::{BoundedList, ListSpec};
use crate::agent::AgentProfile;
use crate::card::font::{line_height, CardFont};
use crate::card::picture::fit_to_box;
use crate::card::style::CardStyle;
use crate::card::text::{truncate_to_width, wrap_text};
use image::{DynamicImage, RgbImage};
use serde::Serialize;

pub const BORDER_INSET: u32 = 20;
pub const BORDER_WIDTH: u32 = 2;
/// Left edge of the picture and the skills heading.
pub const CONTENT_INSET: u32 = 40;
pub const PICTURE_TOP: u32 = 60;
pub const COLUMN_GAP: u32 = 20;
/// Space between the picture and the list headings.
pub const LIST_GAP: u32 = 30;
pub const BULLET_INDENT: u32 = 20;
pub const BULLET_RADIUS: i32 = 4;
/// Offset from a bullet's left edge to its text.
pub const BULLET_TEXT_OFFSET: i32 = 16;
pub const METRICS_HEADING_OFFSET: i32 = 12;
pub const METRICS_BULLET_OFFSET: i32 = 8;
pub const BUTTON_WIDTH: u32 = 140;
pub const BUTTON_HEIGHT: u32 = 40;
/// Distance from the bottom edge of the canvas to the top of the buttons.
pub const BUTTON_BOTTOM: u32 = 80;
pub const EXECUTE_LEFT: u32 = 60;
/// Distance from the right edge of the canvas to the left of the Details button.
pub const DETAILS_RIGHT: u32 = 200;
/// Padding between a text block and its invalid-field outline.
pub const OUTLINE_PAD: i32 = 4;

pub const SKILLS_HEADING: &str = "Core Skills:";
pub const METRICS_HEADING: &str = "Metrics:";

const LABEL_PAD: u32 = 4;
const LABEL_MIN_SIZE: f32 = 8.0;

/// Rows a list column can hold: heading plus the largest list.
const LIST_ROWS: u32 = 6;
/// Minimum gap between the last list row and the buttons.
const BUTTON_CLEARANCE: u32 = 10;

/// Smallest canvas the fixed grid fits on for a picture box and body text size.
///
/// Saturates at `u32::MAX` rather than wrapping, so oversized inputs always
/// fail the canvas check.
pub fn minimum_canvas(box_size: u32, body_size: f32) -> (u32, u32) {
    let width = box_size.saturating_add(300).max(480);
    let height = [
        box_size,
        LIST_GAP,
        LIST_ROWS.saturating_mul(line_height(body_size)),
        BUTTON_CLEARANCE,
        BUTTON_BOTTOM,
    ]
    .into_iter()
    .fold(PICTURE_TOP, u32::saturating_add);
    (width, height)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Grow by `by` pixels on every side.
    pub fn inflate(&self, by: i32) -> Self {
        Self {
            x: self.x - by,
            y: self.y - by,
            width: (self.width as i32 + 2 * by).max(0) as u32,
            height: (self.height as i32 + 2 * by).max(0) as u32,
        }
    }
}

/// One line of text, top-left anchored.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub field: FieldId,
    pub lines: Vec<TextLine>,
    pub bounds: Region,
    pub invalid: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PictureSlot {
    /// The fitted picture, exactly the size of `region`.
    Picture { region: Region, pixels: RgbImage },
    /// No picture: the region is filled with the placeholder colour.
    Placeholder { region: Region },
}

impl PictureSlot {
    pub fn region(&self) -> Region {
        match self {
            PictureSlot::Picture { region, .. } | PictureSlot::Placeholder { region } => *region,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, PictureSlot::Placeholder { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BulletRow {
    pub field: FieldId,
    /// Centre of the bullet dot.
    pub dot: (i32, i32),
    pub line: TextLine,
    pub bounds: Region,
    pub invalid: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListBlock {
    pub heading: TextLine,
    pub rows: Vec<BulletRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Details,
    Execute,
}

impl ActionKind {
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Details => "Details",
            ActionKind::Execute => "Execute",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionIndicator {
    pub kind: ActionKind,
    pub region: Region,
    pub label: TextLine,
}

/// Everything the card contains, positioned on a `width` x `height` canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub width: u32,
    pub height: u32,
    pub border: Region,
    pub picture: PictureSlot,
    pub title: TextBlock,
    pub description: TextBlock,
    pub skills: ListBlock,
    pub metrics: ListBlock,
    pub actions: Vec<ActionIndicator>,
}

impl CardLayout {
    pub fn action(&self, kind: ActionKind) -> Option<&ActionIndicator> {
        self.actions.iter().find(|a| a.kind == kind)
    }

    pub fn has_action(&self, kind: ActionKind) -> bool {
        self.action(kind).is_some()
    }

    /// Bounds of every block drawn from an invalid field.
    pub fn invalid_regions(&self) -> Vec<Region> {
        let blocks = [&self.title, &self.description]
            .into_iter()
            .filter(|b| b.invalid)
            .map(|b| b.bounds);
        let rows = self
            .skills
            .rows
            .iter()
            .chain(self.metrics.rows.iter())
            .filter(|r| r.invalid)
            .map(|r| r.bounds);
        blocks.chain(rows).collect()
    }

    /// All text lines in drawing order.
    pub fn text_lines(&self) -> Vec<&TextLine> {
        let mut lines: Vec<&TextLine> = Vec::new();
        lines.extend(self.title.lines.iter());
        lines.extend(self.description.lines.iter());
        for list in [&self.skills, &self.metrics] {
            lines.push(&list.heading);
            lines.extend(list.rows.iter().map(|r| &r.line));
        }
        lines.extend(self.actions.iter().map(|a| &a.label));
        lines
    }
}

/// Lay out `profile` on the fixed grid.
///
/// Validity never blocks layout: invalid fields are placed like valid ones and
/// flagged so the raster stage can outline them.
pub fn layout_card(
    profile: &AgentProfile,
    picture: Option<&DynamicImage>,
    style: &CardStyle,
    font: &CardFont,
) -> CardLayout {
    let report = validate_profile(profile);
    let width = style.width;
    let height = style.height;
    let body_lh = line_height(style.body_size);
    let title_lh = line_height(style.title_size);

    let border = Region::new(
        BORDER_INSET as i32,
        BORDER_INSET as i32,
        width.saturating_sub(2 * BORDER_INSET),
        height.saturating_sub(2 * BORDER_INSET),
    );

    let picture_region = Region::new(
        CONTENT_INSET as i32,
        PICTURE_TOP as i32,
        style.picture_box,
        style.picture_box,
    );
    let picture = match picture {
        Some(source) => PictureSlot::Picture {
            region: picture_region,
            pixels: fit_to_box(
                source,
                style.picture_box,
                style.picture_box,
                style.fit,
                style.placeholder,
            ),
        },
        None => PictureSlot::Placeholder {
            region: picture_region,
        },
    };

    let text_x = (CONTENT_INSET + style.picture_box + COLUMN_GAP) as i32;
    let text_width = width.saturating_sub(CONTENT_INSET + text_x as u32);

    let title_y = PICTURE_TOP as i32;
    let title_text = truncate_to_width(
        |s: &str| font.measure(style.title_size, s),
        &profile.name,
        text_width,
    );
    let title = TextBlock {
        field: FieldId::Name,
        lines: non_blank_line(title_text, text_x, title_y, style.title_size),
        bounds: Region::new(text_x, title_y, text_width, title_lh),
        invalid: !report.is_field_valid(FieldId::Name),
    };

    let description_y = title_y + title_lh as i32;
    let wrapped = wrap_text(
        |s: &str| font.measure(style.body_size, s),
        &profile.description,
        text_width,
        style.description_max_lines,
    );
    let description_lines: Vec<TextLine> = wrapped
        .into_iter()
        .enumerate()
        .map(|(i, text)| TextLine {
            text,
            x: text_x,
            y: description_y + (i as u32 * body_lh) as i32,
            size: style.body_size,
        })
        .collect();
    let description = TextBlock {
        field: FieldId::Description,
        bounds: Region::new(
            text_x,
            description_y,
            text_width,
            body_lh * description_lines.len().max(1) as u32,
        ),
        lines: description_lines,
        invalid: !report.is_field_valid(FieldId::Description),
    };

    let lists_top = (PICTURE_TOP + style.picture_box + LIST_GAP) as i32;
    let middle = (width / 2) as i32;

    let skills_bullet_x = (CONTENT_INSET + BULLET_INDENT) as i32;
    let skills = list_block(
        &profile.skills,
        FieldId::Skill,
        &report,
        ListColumn {
            heading: SKILLS_HEADING,
            heading_x: CONTENT_INSET as i32,
            bullet_x: skills_bullet_x,
            right: middle - METRICS_HEADING_OFFSET - COLUMN_GAP as i32,
            top: lists_top,
        },
        style,
        font,
    );

    let metrics = list_block(
        &profile.metrics,
        FieldId::Metric,
        &report,
        ListColumn {
            heading: METRICS_HEADING,
            heading_x: middle - METRICS_HEADING_OFFSET,
            bullet_x: middle + METRICS_BULLET_OFFSET,
            right: width as i32 - CONTENT_INSET as i32,
            top: lists_top,
        },
        style,
        font,
    );

    let button_y = height as i32 - BUTTON_BOTTOM as i32;
    let mut actions = Vec::new();
    if profile.show_execute {
        actions.push(action(
            ActionKind::Execute,
            Region::new(EXECUTE_LEFT as i32, button_y, BUTTON_WIDTH, BUTTON_HEIGHT),
            style,
            font,
        ));
    }
    if profile.show_details {
        actions.push(action(
            ActionKind::Details,
            Region::new(
                width as i32 - DETAILS_RIGHT as i32,
                button_y,
                BUTTON_WIDTH,
                BUTTON_HEIGHT,
            ),
            style,
            font,
        ));
    }

    tracing::debug!(
        width,
        height,
        skills = skills.rows.len(),
        metrics = metrics.rows.len(),
        actions = actions.len(),
        invalid = !report.is_valid(),
        "Laid out card"
    );

    CardLayout {
        width,
        height,
        border,
        picture,
        title,
        description,
        skills,
        metrics,
        actions,
    }
}

struct ListColumn {
    heading: &'static str,
    heading_x: i32,
    bullet_x: i32,
    /// Right edge of the text column.
    right: i32,
    top: i32,
}

fn list_block<S: ListSpec>(
    list: &BoundedList<S>,
    id: fn(usize) -> FieldId,
    report: &ProfileReport,
    column: ListColumn,
    style: &CardStyle,
    font: &CardFont,
) -> ListBlock {
    let lh = line_height(style.body_size);
    let text_x = column.bullet_x + BULLET_TEXT_OFFSET;
    let text_width = (column.right - text_x).max(0) as u32;
    let measure = |s: &str| font.measure(style.body_size, s);

    let rows = list
        .iter()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .enumerate()
        .map(|(slot, (index, text))| {
            let y = column.top + ((slot as u32 + 1) * lh) as i32;
            BulletRow {
                field: id(index),
                dot: (
                    column.bullet_x + BULLET_RADIUS,
                    y + (style.body_size / 2.0).round() as i32,
                ),
                line: TextLine {
                    text: truncate_to_width(measure, text.trim(), text_width),
                    x: text_x,
                    y,
                    size: style.body_size,
                },
                bounds: Region::new(text_x, y, text_width, lh),
                invalid: !report.is_field_valid(id(index)),
            }
        })
        .collect();

    ListBlock {
        heading: TextLine {
            text: column.heading.to_string(),
            x: column.heading_x,
            y: column.top,
            size: style.body_size,
        },
        rows,
    }
}

fn action(kind: ActionKind, region: Region, style: &CardStyle, font: &CardFont) -> ActionIndicator {
    let label = kind.label();
    // Shrink the label until it fits inside the button with some padding.
    let mut size = style.body_size;
    while size > LABEL_MIN_SIZE
        && font.measure(size, label) + 2 * LABEL_PAD > region.width
    {
        size -= 2.0;
    }
    let label_width = font.measure(size, label);
    let x = region.x + (region.width.saturating_sub(label_width) / 2) as i32;
    let y = region.y + ((region.height as f32 - size) / 2.0).round().max(0.0) as i32;
    ActionIndicator {
        kind,
        region,
        label: TextLine {
            text: label.to_string(),
            x,
            y,
            size,
        },
    }
}

fn non_blank_line(text: String, x: i32, y: i32, size: f32) -> Vec<TextLine> {
    if text.trim().is_empty() {
        Vec::new()
    } else {
        vec![TextLine { text, x, y, size }]
    }
}
