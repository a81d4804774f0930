//! CLI presentation: text and json formatters per command family.

mod card;
mod validation;

pub use card::{
    format_layout_table, format_render_summary_json, format_render_summary_text,
    format_section_heading, RenderSummary,
};
pub use validation::{
    format_field_status_json, format_field_status_text, format_profile_report_json,
    format_profile_report_text, format_status_line,
};
