//! CLI parse: clap types for agentcard. No behavior; definitions only.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Agentcard CLI - compose agent profile cards
#[derive(Parser)]
#[command(name = "agentcard")]
#[command(version)]
#[command(about = "Fill in an agent profile and render it as a visual card")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compose a card and write it as a PNG
    Render {
        #[command(flatten)]
        profile: ProfileArgs,
        /// Output directory (default: output.dir from config)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show the card layout and field issues without writing anything
    Preview {
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Check a single field, or every field of a profile
    Validate {
        /// Field kind to check (name, description, skill, metric)
        #[arg(long, value_name = "KIND", requires = "text")]
        field: Option<String>,
        /// Text to check with --field
        #[arg(value_name = "TEXT", requires = "field")]
        text: Option<String>,
        #[command(flatten)]
        profile: ProfileArgs,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Fill in a profile interactively and export the card
    New {
        #[command(flatten)]
        profile: ProfileArgs,
        /// Output directory (default: output.dir from config)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Rendering of command results on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Profile fields given on the command line. Flags override values from `--profile`.
#[derive(Args, Debug, Clone, Default)]
pub struct ProfileArgs {
    /// Profile TOML file to start from
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// Agent name
    #[arg(long)]
    pub name: Option<String>,

    /// Short description
    #[arg(long)]
    pub description: Option<String>,

    /// Skill (repeat up to 5 times)
    #[arg(long = "skill", value_name = "SKILL")]
    pub skills: Vec<String>,

    /// Metric (repeat up to 3 times)
    #[arg(long = "metric", value_name = "METRIC")]
    pub metrics: Vec<String>,

    /// Picture for the card (PNG or JPEG)
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Show the Details button
    #[arg(long, overrides_with = "no_details")]
    pub details: bool,

    /// Hide the Details button, even if the profile file shows it
    #[arg(long = "no-details", overrides_with = "details")]
    pub no_details: bool,

    /// Show the Execute button
    #[arg(long, overrides_with = "no_execute")]
    pub execute: bool,

    /// Hide the Execute button, even if the profile file shows it
    #[arg(long = "no-execute", overrides_with = "execute")]
    pub no_execute: bool,
}

impl ProfileArgs {
    /// True when no profile input was given at all.
    pub fn is_empty(&self) -> bool {
        self.profile.is_none()
            && self.name.is_none()
            && self.description.is_none()
            && self.skills.is_empty()
            && self.metrics.is_empty()
            && self.image.is_none()
            && self.details_toggle().is_none()
            && self.execute_toggle().is_none()
    }

    /// `Some` when `--details` or `--no-details` was given; the last one wins.
    pub fn details_toggle(&self) -> Option<bool> {
        toggle(self.details, self.no_details)
    }

    pub fn execute_toggle(&self) -> Option<bool> {
        toggle(self.execute, self.no_execute)
    }
}

fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}
