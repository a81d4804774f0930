//! Agentcard CLI Binary
//!
//! Loads the layered configuration once, starts logging from its `[logging]`
//! table and CLI flags, then runs one command against a `RunContext`.

use agentcard::cli::{map_error, Cli, RunContext};
use agentcard::config::{CardConfig, ConfigLoader};
use agentcard::logging::{init_logging, resolve_log_file_path, LoggingConfig};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let loaded = ConfigLoader::load_for(&cli.workspace, cli.config.as_deref());
    let base = loaded
        .as_ref()
        .map(|config| config.logging.clone())
        .unwrap_or_default();
    let logging_config = build_logging_config(&cli, base);

    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!(workspace = %cli.workspace.display(), "Agentcard CLI starting");
    let sources = ConfigLoader::sources(&cli.workspace, cli.config.as_deref());
    info!("{}", describe_sources(&sources));

    let context = match loaded.and_then(|config| {
        log_card_settings(&config, &cli.workspace);
        RunContext::from_config(cli.workspace.clone(), config)
    }) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!(error = %e, "Error loading configuration");
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

/// Apply CLI logging flags on top of the configured `[logging]` table.
fn build_logging_config(cli: &Cli, mut config: LoggingConfig) -> LoggingConfig {
    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
        // An explicit --log-output value still takes precedence below.
        if config.output == "file" {
            config.output = "file+stderr".to_string();
        }
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }

    let output_uses_file = config.output == "file" || config.output == "file+stderr";
    if config.enabled && output_uses_file {
        if let Ok(path) = resolve_log_file_path(cli.log_file.clone(), config.file.clone()) {
            config.file = Some(path);
        }
    } else if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}

fn describe_sources(sources: &[PathBuf]) -> String {
    if sources.is_empty() {
        return "Configuration: built-in defaults".to_string();
    }
    let listed: Vec<String> = sources.iter().map(|p| p.display().to_string()).collect();
    format!("Configuration loaded from {}", listed.join(", "))
}

fn log_card_settings(config: &CardConfig, workspace: &Path) {
    info!(
        canvas = %format!("{}x{}", config.canvas.width, config.canvas.height),
        box_size = config.picture.box_size,
        font = %config
            .font
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "builtin".to_string()),
        output_dir = %workspace.join(&config.output.dir).display(),
        "Card settings"
    );
}
