//! CLI domain: parse, route, help, output, presentation and the interactive form.
//! No domain orchestration; single route table dispatches to domain services.

mod help;
mod interactive;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use interactive::{run_form, MenuAction};
pub use output::map_error;
pub use parse::{Cli, Commands, OutputFormat, ProfileArgs};
pub use presentation::{
    format_field_status_json, format_field_status_text, format_layout_table,
    format_profile_report_json, format_profile_report_text, format_render_summary_json,
    format_render_summary_text, format_section_heading, format_status_line, RenderSummary,
};
pub use route::{build_profile, RunContext};
