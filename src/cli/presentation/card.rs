//! Card presentation: render summaries and the layout preview table.

use crate::agent::ProfileReport;
use crate::card::layout::{CardLayout, PictureSlot, Region, TextBlock};
use crate::cli::presentation::validation::issues_json;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::PathBuf;

/// Result of `render`: where the card went and what it contains.
#[derive(Debug, Clone)]
pub struct RenderSummary {
    pub path: PathBuf,
    pub fingerprint: String,
    pub width: u32,
    pub height: u32,
    pub actions: Vec<&'static str>,
    pub report: ProfileReport,
    pub rendered_at: String,
}

pub fn format_render_summary_text(summary: &RenderSummary) -> String {
    let mut output = format!("Card written: {}\n", summary.path.display());
    output.push_str(&format!("  Size: {}x{}\n", summary.width, summary.height));
    output.push_str(&format!(
        "  Fingerprint: {}...\n",
        &summary.fingerprint[..summary.fingerprint.len().min(16)]
    ));
    let actions = if summary.actions.is_empty() {
        "none".to_string()
    } else {
        summary.actions.join(", ")
    };
    output.push_str(&format!("  Actions: {}\n", actions));
    let issues = summary.report.issues();
    if issues.is_empty() {
        output.push_str("  All fields valid");
    } else {
        output.push_str(&format!(
            "  Flagged fields ({}), outlined on the card:",
            issues.len()
        ));
        for (id, reason) in issues {
            output.push_str(&format!("\n    ✗ {}: {}", id, reason));
        }
    }
    output
}

pub fn format_render_summary_json(summary: &RenderSummary) -> String {
    let out = json!({
        "path": summary.path,
        "fingerprint": summary.fingerprint,
        "width": summary.width,
        "height": summary.height,
        "actions": summary.actions,
        "valid": summary.report.is_valid(),
        "issues": issues_json(&summary.report),
        "rendered_at": summary.rendered_at,
    });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Layout plan as a table, one row per drawn element.
pub fn format_layout_table(layout: &CardLayout) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Element", "Position", "Size", "Content", "Status"]);

    let (picture_content, picture_region) = match &layout.picture {
        PictureSlot::Picture { region, .. } => ("picture", *region),
        PictureSlot::Placeholder { region } => ("placeholder", *region),
    };
    table.add_row(vec![
        "Picture".to_string(),
        position(picture_region),
        size(picture_region),
        picture_content.to_string(),
        "ok".to_string(),
    ]);

    table.add_row(block_row("Title", &layout.title));
    table.add_row(block_row("Description", &layout.description));

    for (label, list) in [("Skills", &layout.skills), ("Metrics", &layout.metrics)] {
        table.add_row(vec![
            label.to_string(),
            format!("({}, {})", list.heading.x, list.heading.y),
            "-".to_string(),
            list.heading.text.clone(),
            "ok".to_string(),
        ]);
        for row in &list.rows {
            table.add_row(vec![
                format!("  {}", row.field),
                position(row.bounds),
                size(row.bounds),
                format!("• {}", row.line.text),
                status(row.invalid),
            ]);
        }
    }

    for action in &layout.actions {
        table.add_row(vec![
            "Button".to_string(),
            position(action.region),
            size(action.region),
            action.label.text.clone(),
            "ok".to_string(),
        ]);
    }

    format!(
        "{}\n\nCanvas: {}x{}\n{}",
        format_section_heading("Card layout"),
        layout.width,
        layout.height,
        table
    )
}

fn block_row(label: &str, block: &TextBlock) -> Vec<String> {
    let content = if block.lines.is_empty() {
        "(empty)".to_string()
    } else {
        block
            .lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join(" / ")
    };
    vec![
        label.to_string(),
        position(block.bounds),
        size(block.bounds),
        content,
        status(block.invalid),
    ]
}

fn position(region: Region) -> String {
    format!("({}, {})", region.x, region.y)
}

fn size(region: Region) -> String {
    format!("{}x{}", region.width, region.height)
}

fn status(invalid: bool) -> String {
    if invalid {
        "invalid".to_string()
    } else {
        "ok".to_string()
    }
}
