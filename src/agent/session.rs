//! Editing session: one explicitly owned profile plus its decoded picture.
//!
//! The presentation layer turns each user action into a `FormEdit` and hands
//! it to `FormSession::apply`, which validates synchronously and reports the
//! status of whatever changed. Invalid text is stored and flagged; only list
//! additions and picture uploads are refused outright.

use crate::agent::validation::{revalidate, validate_profile, FieldId, FieldStatus, ProfileReport};
use crate::agent::AgentProfile;
use crate::card::picture::load_picture;
use crate::error::CardError;
use image::DynamicImage;
use std::path::PathBuf;

/// A single user action on the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEdit {
    SetName(String),
    SetDescription(String),
    AddSkill(String),
    EditSkill { index: usize, text: String },
    RemoveSkill(usize),
    AddMetric(String),
    EditMetric { index: usize, text: String },
    RemoveMetric(usize),
    SetImage(PathBuf),
    ClearImage,
    SetShowDetails(bool),
    SetShowExecute(bool),
}

/// What an accepted edit changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// A text field was written; the status says whether it is valid.
    Field { id: FieldId, status: FieldStatus },
    /// A row was removed from a list.
    Removed { id: FieldId, text: String },
    ImageSet(PathBuf),
    ImageCleared,
    Toggled { details: bool, execute: bool },
}

/// Session-scoped form state.
#[derive(Debug, Default)]
pub struct FormSession {
    profile: AgentProfile,
    picture: Option<DynamicImage>,
}

impl FormSession {
    /// Start a session with an empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session from an existing profile, decoding its picture if set.
    pub fn from_profile(mut profile: AgentProfile) -> Result<Self, CardError> {
        let picture = match profile.image.take() {
            Some(path) => {
                let picture = load_picture(&path)?;
                profile.image = Some(path);
                Some(picture)
            }
            None => None,
        };
        Ok(Self { profile, picture })
    }

    pub fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    pub fn picture(&self) -> Option<&DynamicImage> {
        self.picture.as_ref()
    }

    pub fn report(&self) -> ProfileReport {
        validate_profile(&self.profile)
    }

    /// Consume the session, keeping the profile.
    pub fn into_profile(self) -> AgentProfile {
        self.profile
    }

    /// Apply one edit. On error the session is left exactly as it was.
    pub fn apply(&mut self, edit: FormEdit) -> Result<EditOutcome, CardError> {
        tracing::debug!(edit = ?edit, "Applying form edit");
        match edit {
            FormEdit::SetName(text) => {
                let status = revalidate(FieldId::Name.kind(), &text);
                self.profile.name = text;
                Ok(EditOutcome::Field {
                    id: FieldId::Name,
                    status,
                })
            }
            FormEdit::SetDescription(text) => {
                let status = revalidate(FieldId::Description.kind(), &text);
                self.profile.description = text;
                Ok(EditOutcome::Field {
                    id: FieldId::Description,
                    status,
                })
            }
            FormEdit::AddSkill(text) => {
                let index = self.profile.skills.len();
                self.profile.skills.add(text)?;
                Ok(EditOutcome::Field {
                    id: FieldId::Skill(index),
                    status: FieldStatus {
                        kind: FieldId::Skill(index).kind(),
                        valid: true,
                        reason: None,
                    },
                })
            }
            FormEdit::EditSkill { index, text } => {
                let status = self.profile.skills.set(index, text)?;
                Ok(EditOutcome::Field {
                    id: FieldId::Skill(index),
                    status,
                })
            }
            FormEdit::RemoveSkill(index) => {
                let text = self.profile.skills.remove(index)?;
                Ok(EditOutcome::Removed {
                    id: FieldId::Skill(index),
                    text,
                })
            }
            FormEdit::AddMetric(text) => {
                let index = self.profile.metrics.len();
                self.profile.metrics.add(text)?;
                Ok(EditOutcome::Field {
                    id: FieldId::Metric(index),
                    status: FieldStatus {
                        kind: FieldId::Metric(index).kind(),
                        valid: true,
                        reason: None,
                    },
                })
            }
            FormEdit::EditMetric { index, text } => {
                let status = self.profile.metrics.set(index, text)?;
                Ok(EditOutcome::Field {
                    id: FieldId::Metric(index),
                    status,
                })
            }
            FormEdit::RemoveMetric(index) => {
                let text = self.profile.metrics.remove(index)?;
                Ok(EditOutcome::Removed {
                    id: FieldId::Metric(index),
                    text,
                })
            }
            FormEdit::SetImage(path) => {
                let picture = load_picture(&path).map_err(|e| {
                    tracing::warn!(path = %path.display(), error = %e, "Image upload rejected");
                    e
                })?;
                self.picture = Some(picture);
                self.profile.image = Some(path.clone());
                Ok(EditOutcome::ImageSet(path))
            }
            FormEdit::ClearImage => {
                self.picture = None;
                self.profile.image = None;
                Ok(EditOutcome::ImageCleared)
            }
            FormEdit::SetShowDetails(on) => {
                self.profile.show_details = on;
                Ok(self.toggles())
            }
            FormEdit::SetShowExecute(on) => {
                self.profile.show_execute = on;
                Ok(self.toggles())
            }
        }
    }

    fn toggles(&self) -> EditOutcome {
        EditOutcome::Toggled {
            details: self.profile.show_details,
            execute: self.profile.show_execute,
        }
    }
}
