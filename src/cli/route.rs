//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::agent::{
    revalidate, validate_profile, AgentProfile, FieldKind, FormSession, MetricList, SkillList,
};
use crate::card::{export_card, load_picture, ActionKind, CardRenderer};
use crate::config::{CardConfig, ConfigLoader};
use crate::error::CardError;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::command_name;
use crate::cli::interactive;
use crate::cli::parse::{Commands, OutputFormat, ProfileArgs};
use crate::cli::presentation::{
    format_field_status_json, format_field_status_text, format_layout_table,
    format_profile_report_json, format_profile_report_text, format_render_summary_json,
    format_render_summary_text, RenderSummary,
};

/// Runtime context for CLI execution: workspace, loaded config and the card renderer.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    workspace_root: PathBuf,
    config: CardConfig,
    renderer: CardRenderer,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, CardError> {
        let config = ConfigLoader::load_for(&workspace_root, config_path.as_deref())?;
        Self::from_config(workspace_root, config)
    }

    /// Create run context from an already loaded configuration.
    pub fn from_config(workspace_root: PathBuf, config: CardConfig) -> Result<Self, CardError> {
        let renderer = CardRenderer::from_config(&config)?;
        Ok(Self {
            workspace_root,
            config,
            renderer,
        })
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, CardError> {
        let name = command_name(command);
        let span = tracing::info_span!("command", name = %name);
        let _guard = span.enter();
        let started = Instant::now();

        let result = self.execute_inner(command);
        match &result {
            Ok(_) => tracing::info!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Command finished"
            ),
            Err(e) => tracing::warn!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                error = %e,
                "Command failed"
            ),
        }
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, CardError> {
        match command {
            Commands::Render {
                profile,
                output,
                format,
            } => self.handle_render(profile, output.as_deref(), *format),
            Commands::Preview { profile } => self.handle_preview(profile),
            Commands::Validate {
                field,
                text,
                profile,
                format,
            } => match field {
                Some(kind) => {
                    self.handle_validate_field(kind, text.as_deref().unwrap_or(""), *format)
                }
                None => self.handle_validate_profile(profile, *format),
            },
            Commands::New { profile, output } => self.handle_new(profile, output.as_deref()),
        }
    }

    fn handle_render(
        &self,
        args: &ProfileArgs,
        output: Option<&Path>,
        format: OutputFormat,
    ) -> Result<String, CardError> {
        let profile = build_profile(args)?;
        let report = validate_profile(&profile);
        let card = self.renderer.render(&profile)?;
        let path = export_card(&card, &self.output_dir(output), &profile.name)?;
        let (width, height) = card.dimensions();

        let actions = [ActionKind::Execute, ActionKind::Details]
            .into_iter()
            .filter(|kind| card.has_action(*kind))
            .map(|kind| match kind {
                ActionKind::Execute => "execute",
                ActionKind::Details => "details",
            })
            .collect();

        let summary = RenderSummary {
            path,
            fingerprint: card.fingerprint()?,
            width,
            height,
            actions,
            report,
            rendered_at: chrono::Utc::now().to_rfc3339(),
        };
        match format {
            OutputFormat::Json => Ok(format_render_summary_json(&summary)),
            OutputFormat::Text => Ok(format_render_summary_text(&summary)),
        }
    }

    fn handle_preview(&self, args: &ProfileArgs) -> Result<String, CardError> {
        let profile = build_profile(args)?;
        let picture = match &profile.image {
            Some(path) => Some(load_picture(path)?),
            None => None,
        };
        let layout = self.renderer.plan(&profile, picture.as_ref());
        let report = validate_profile(&profile);
        Ok(format!(
            "{}\n\n{}",
            format_layout_table(&layout),
            format_profile_report_text(&report, false)
        ))
    }

    fn handle_validate_field(
        &self,
        kind: &str,
        text: &str,
        format: OutputFormat,
    ) -> Result<String, CardError> {
        let kind = FieldKind::parse(kind)?;
        let status = revalidate(kind, text);
        match format {
            OutputFormat::Json => Ok(format_field_status_json(&status, text)),
            OutputFormat::Text => Ok(format_field_status_text(&status, text)),
        }
    }

    fn handle_validate_profile(
        &self,
        args: &ProfileArgs,
        format: OutputFormat,
    ) -> Result<String, CardError> {
        let profile = build_profile(args)?;
        let report = validate_profile(&profile);
        match format {
            OutputFormat::Json => Ok(format_profile_report_json(&report)),
            OutputFormat::Text => Ok(format_profile_report_text(&report, true)),
        }
    }

    fn handle_new(&self, args: &ProfileArgs, output: Option<&Path>) -> Result<String, CardError> {
        let session = if args.is_empty() {
            FormSession::new()
        } else {
            FormSession::from_profile(build_profile(args)?)?
        };
        interactive::run_form(&self.renderer, session, &self.output_dir(output))
    }

    /// Output directory: explicit flag, else `output.dir` from config. Relative
    /// paths resolve against the workspace root.
    fn output_dir(&self, output: Option<&Path>) -> PathBuf {
        let dir = output.unwrap_or(&self.config.output.dir);
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            self.workspace_root.join(dir)
        }
    }
}

/// Assemble a profile from `--profile` (if given) overlaid with individual flags.
pub fn build_profile(args: &ProfileArgs) -> Result<AgentProfile, CardError> {
    let mut profile = match &args.profile {
        Some(path) => AgentProfile::load_from_file(path)?,
        None => AgentProfile::new(),
    };
    if let Some(name) = &args.name {
        profile.name = name.clone();
    }
    if let Some(description) = &args.description {
        profile.description = description.clone();
    }
    if !args.skills.is_empty() {
        profile.skills = SkillList::with_items(args.skills.iter().cloned())?;
    }
    if !args.metrics.is_empty() {
        profile.metrics = MetricList::with_items(args.metrics.iter().cloned())?;
    }
    if let Some(image) = &args.image {
        profile.image = Some(image.clone());
    }
    if let Some(show) = args.details_toggle() {
        profile.show_details = show;
    }
    if let Some(show) = args.execute_toggle() {
        profile.show_execute = show;
    }
    Ok(profile)
}
