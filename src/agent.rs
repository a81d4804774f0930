//! Agent profile model.
//!
//! An `AgentProfile` is the in-memory draft a user edits: name, description,
//! bounded skill/metric lists, an optional picture and two display toggles.
//! It lives for one editing session. Only the rendered card is ever written
//! to disk; a profile may be read from a TOML file but is never saved.

pub mod lists;
pub mod session;
pub mod validation;

pub use lists::{BoundedList, MetricList, Metrics, SkillList, Skills, MAX_METRICS, MAX_SKILLS};
pub use session::{EditOutcome, FormEdit, FormSession};
pub use validation::{
    revalidate, validate_field, validate_profile, FieldId, FieldKind, FieldStatus, InvalidReason,
    ProfileReport,
};

use crate::error::CardError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Draft of one agent profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgentProfile {
    pub name: String,
    pub description: String,
    pub skills: SkillList,
    pub metrics: MetricList,
    /// Picture to show in the card's image region (PNG or JPEG).
    pub image: Option<PathBuf>,
    pub show_details: bool,
    pub show_execute: bool,
}

impl AgentProfile {
    /// Empty profile, as at the start of a session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a profile from a TOML file.
    ///
    /// A relative `image` path is resolved against the file's directory.
    pub fn load_from_file(path: &Path) -> Result<Self, CardError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CardError::Profile(format!(
                "Failed to read profile {}: {}",
                path.display(),
                e
            ))
        })?;
        let file: ProfileFile = toml::from_str(&content).map_err(|e| {
            CardError::Profile(format!(
                "Failed to parse profile {}: {}",
                path.display(),
                e
            ))
        })?;
        let mut profile = AgentProfile::try_from(file)?;
        if let Some(image) = profile.image.take() {
            let resolved = if image.is_relative() {
                path.parent()
                    .map(|dir| dir.join(&image))
                    .unwrap_or(image)
            } else {
                image
            };
            profile.image = Some(resolved);
        }
        tracing::debug!(profile = %path.display(), "Loaded agent profile");
        Ok(profile)
    }
}

/// On-disk shape of a profile file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileFile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub metrics: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,
    #[serde(default)]
    pub show_details: bool,
    #[serde(default)]
    pub show_execute: bool,
}

impl TryFrom<ProfileFile> for AgentProfile {
    type Error = CardError;

    fn try_from(file: ProfileFile) -> Result<Self, Self::Error> {
        Ok(Self {
            name: file.name,
            description: file.description,
            skills: SkillList::with_items(file.skills)?,
            metrics: MetricList::with_items(file.metrics)?,
            image: file.image,
            show_details: file.show_details,
            show_execute: file.show_execute,
        })
    }
}
