//! Interactive form: a dialoguer menu that drives a `FormSession`.
//!
//! Every edit is validated as soon as it is entered. The field status and the
//! updated layout preview are printed after each step, and the card can be
//! exported at any point.

use crate::agent::{EditOutcome, FormEdit, FormSession, MAX_METRICS, MAX_SKILLS};
use crate::card::{export_card, CardRenderer};
use crate::cli::output::map_error;
use crate::cli::presentation::{format_layout_table, format_status_line};
use crate::error::CardError;
use dialoguer::{Confirm, Input, Select};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

/// Entries of the form menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    SetName,
    SetDescription,
    AddSkill,
    EditSkill,
    RemoveSkill,
    AddMetric,
    EditMetric,
    RemoveMetric,
    ChooseImage,
    ClearImage,
    ToggleDetails,
    ToggleExecute,
    Export,
    Quit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 14] = [
        MenuAction::SetName,
        MenuAction::SetDescription,
        MenuAction::AddSkill,
        MenuAction::EditSkill,
        MenuAction::RemoveSkill,
        MenuAction::AddMetric,
        MenuAction::EditMetric,
        MenuAction::RemoveMetric,
        MenuAction::ChooseImage,
        MenuAction::ClearImage,
        MenuAction::ToggleDetails,
        MenuAction::ToggleExecute,
        MenuAction::Export,
        MenuAction::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::SetName => "Set name",
            MenuAction::SetDescription => "Set description",
            MenuAction::AddSkill => "Add skill",
            MenuAction::EditSkill => "Edit skill",
            MenuAction::RemoveSkill => "Remove skill",
            MenuAction::AddMetric => "Add metric",
            MenuAction::EditMetric => "Edit metric",
            MenuAction::RemoveMetric => "Remove metric",
            MenuAction::ChooseImage => "Choose image",
            MenuAction::ClearImage => "Clear image",
            MenuAction::ToggleDetails => "Toggle Details button",
            MenuAction::ToggleExecute => "Toggle Execute button",
            MenuAction::Export => "Export card",
            MenuAction::Quit => "Quit",
        }
    }
}

/// Outcome of one menu step.
enum Step {
    Edit(FormEdit),
    Exported(PathBuf),
    Nothing,
    Quit,
}

/// Run the form until the user exports or quits. Returns the closing message.
pub fn run_form(
    renderer: &CardRenderer,
    mut session: FormSession,
    output_dir: &Path,
) -> Result<String, CardError> {
    let labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();
    println!("{}", format_layout_table(&renderer.plan(session.profile(), session.picture())));

    loop {
        let selection = Select::new()
            .with_prompt("Agent card")
            .items(&labels)
            .default(0)
            .interact()?;

        match prompt_step(MenuAction::ALL[selection], &session, renderer, output_dir)? {
            Step::Edit(edit) => match session.apply(edit) {
                Ok(outcome) => println!("{}", describe_outcome(&outcome)),
                Err(e) => println!("{} {}", "✗".red(), map_error(&e)),
            },
            Step::Exported(path) => {
                return Ok(format!("Card written: {}", path.display()));
            }
            Step::Nothing => continue,
            Step::Quit => return Ok("Closed without exporting".to_string()),
        }

        println!();
        println!("{}", format_layout_table(&renderer.plan(session.profile(), session.picture())));
    }
}

fn prompt_step(
    action: MenuAction,
    session: &FormSession,
    renderer: &CardRenderer,
    output_dir: &Path,
) -> Result<Step, CardError> {
    let profile = session.profile();
    let step = match action {
        MenuAction::SetName => Step::Edit(FormEdit::SetName(prompt_text("Name", &profile.name)?)),
        MenuAction::SetDescription => Step::Edit(FormEdit::SetDescription(prompt_text(
            "Description",
            &profile.description,
        )?)),
        MenuAction::AddSkill => {
            if profile.skills.is_full() {
                println!("Skill list is full ({} of {})", profile.skills.len(), MAX_SKILLS);
                Step::Nothing
            } else {
                Step::Edit(FormEdit::AddSkill(prompt_text("Skill", "")?))
            }
        }
        MenuAction::EditSkill => match pick_row("Skill", profile.skills.as_slice())? {
            Some(index) => Step::Edit(FormEdit::EditSkill {
                index,
                text: prompt_text("Skill", &profile.skills.as_slice()[index])?,
            }),
            None => Step::Nothing,
        },
        MenuAction::RemoveSkill => match pick_row("Skill", profile.skills.as_slice())? {
            Some(index) => Step::Edit(FormEdit::RemoveSkill(index)),
            None => Step::Nothing,
        },
        MenuAction::AddMetric => {
            if profile.metrics.is_full() {
                println!("Metric list is full ({} of {})", profile.metrics.len(), MAX_METRICS);
                Step::Nothing
            } else {
                Step::Edit(FormEdit::AddMetric(prompt_text("Metric", "")?))
            }
        }
        MenuAction::EditMetric => match pick_row("Metric", profile.metrics.as_slice())? {
            Some(index) => Step::Edit(FormEdit::EditMetric {
                index,
                text: prompt_text("Metric", &profile.metrics.as_slice()[index])?,
            }),
            None => Step::Nothing,
        },
        MenuAction::RemoveMetric => match pick_row("Metric", profile.metrics.as_slice())? {
            Some(index) => Step::Edit(FormEdit::RemoveMetric(index)),
            None => Step::Nothing,
        },
        MenuAction::ChooseImage => {
            let path: String = Input::new()
                .with_prompt("Image path (PNG or JPEG)")
                .interact_text()?;
            Step::Edit(FormEdit::SetImage(PathBuf::from(path.trim())))
        }
        MenuAction::ClearImage => Step::Edit(FormEdit::ClearImage),
        MenuAction::ToggleDetails => Step::Edit(FormEdit::SetShowDetails(!profile.show_details)),
        MenuAction::ToggleExecute => Step::Edit(FormEdit::SetShowExecute(!profile.show_execute)),
        MenuAction::Export => {
            let report = session.report();
            if !report.is_valid() {
                println!(
                    "{} {} field(s) are invalid and will be outlined on the card",
                    "!".yellow(),
                    report.issues().len()
                );
            }
            let card = renderer.compose(profile, session.picture());
            match export_card(&card, output_dir, &profile.name) {
                Ok(path) => Step::Exported(path),
                Err(e) => {
                    // The session stays open so the user can fix the problem and retry.
                    println!("{} {}", "✗".red(), map_error(&e));
                    Step::Nothing
                }
            }
        }
        MenuAction::Quit => {
            let confirmed = Confirm::new()
                .with_prompt("Quit without exporting?")
                .default(false)
                .interact()?;
            if confirmed {
                Step::Quit
            } else {
                Step::Nothing
            }
        }
    };
    Ok(step)
}

fn prompt_text(prompt: &str, initial: &str) -> Result<String, CardError> {
    let text: String = Input::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?;
    Ok(text)
}

fn pick_row(label: &str, rows: &[String]) -> Result<Option<usize>, CardError> {
    if rows.is_empty() {
        println!("No {} entries yet", label.to_lowercase());
        return Ok(None);
    }
    let index = Select::new()
        .with_prompt(label)
        .items(rows)
        .default(0)
        .interact()?;
    Ok(Some(index))
}

fn describe_outcome(outcome: &EditOutcome) -> String {
    match outcome {
        EditOutcome::Field { id, status } => format_status_line(*id, status),
        EditOutcome::Removed { id, text } => format!("Removed {} ({})", id, text),
        EditOutcome::ImageSet(path) => format!("{} image {}", "✓".green(), path.display()),
        EditOutcome::ImageCleared => "Image cleared".to_string(),
        EditOutcome::Toggled { details, execute } => format!(
            "Details button: {}, Execute button: {}",
            on_off(*details),
            on_off(*execute)
        ),
    }
}

fn on_off(on: bool) -> &'static str {
    if on {
        "on"
    } else {
        "off"
    }
}
