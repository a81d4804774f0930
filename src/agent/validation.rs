//! Field validation rules for agent profiles.
//!
//! Every text field of a profile is checked against the same small rule
//! table: letters and spaces only, an optional maximum length, and whether
//! the empty string is acceptable. Validation never mutates anything; the
//! caller decides how to surface an invalid field.

use crate::agent::AgentProfile;
use crate::error::CardError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DESCRIPTION_MAX: usize = 60;
pub const SKILL_MAX: usize = 20;
pub const METRIC_MAX: usize = 20;

/// Class of a profile text field. Selects the rule applied to its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Name,
    Description,
    Skill,
    Metric,
}

impl FieldKind {
    pub const ALL: [FieldKind; 4] = [
        FieldKind::Name,
        FieldKind::Description,
        FieldKind::Skill,
        FieldKind::Metric,
    ];

    /// Maximum length in characters, if any.
    pub fn max_len(self) -> Option<usize> {
        match self {
            FieldKind::Name => None,
            FieldKind::Description => Some(DESCRIPTION_MAX),
            FieldKind::Skill => Some(SKILL_MAX),
            FieldKind::Metric => Some(METRIC_MAX),
        }
    }

    pub fn allows_empty(self) -> bool {
        !matches!(self, FieldKind::Name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Name => "name",
            FieldKind::Description => "description",
            FieldKind::Skill => "skill",
            FieldKind::Metric => "metric",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CardError> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(FieldKind::Name),
            "description" => Ok(FieldKind::Description),
            "skill" => Ok(FieldKind::Skill),
            "metric" => Ok(FieldKind::Metric),
            _ => Err(CardError::Input(format!(
                "Unknown field: {}. Must be name, description, skill or metric",
                s
            ))),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a field failed its rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InvalidReason {
    Empty,
    InvalidCharacter { ch: char, position: usize },
    TooLong { len: usize, max: usize },
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::Empty => f.write_str("must not be empty"),
            InvalidReason::InvalidCharacter { ch, position } => write!(
                f,
                "only letters and spaces are allowed (found {:?} at position {})",
                ch, position
            ),
            InvalidReason::TooLong { len, max } => {
                write!(f, "{} characters exceeds the limit of {}", len, max)
            }
        }
    }
}

/// Outcome of validating one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldStatus {
    pub kind: FieldKind,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<InvalidReason>,
}

impl FieldStatus {
    fn ok(kind: FieldKind) -> Self {
        Self {
            kind,
            valid: true,
            reason: None,
        }
    }

    fn invalid(kind: FieldKind, reason: InvalidReason) -> Self {
        Self {
            kind,
            valid: false,
            reason: Some(reason),
        }
    }

    /// Turn an invalid status into a `CardError::Validation`.
    pub fn into_result(self) -> Result<(), CardError> {
        match self.reason {
            Some(reason) if !self.valid => Err(CardError::Validation {
                field: self.kind,
                reason,
            }),
            _ => Ok(()),
        }
    }
}

fn is_allowed_char(c: char) -> bool {
    c == ' ' || c.is_alphabetic()
}

/// Validate `text` as a field of class `kind`.
///
/// Checks run in a fixed order: emptiness, character class, length.
/// Length is counted in characters, not bytes.
pub fn validate_field(kind: FieldKind, text: &str) -> FieldStatus {
    if text.is_empty() {
        return if kind.allows_empty() {
            FieldStatus::ok(kind)
        } else {
            FieldStatus::invalid(kind, InvalidReason::Empty)
        };
    }

    if let Some((position, ch)) = text.chars().enumerate().find(|(_, c)| !is_allowed_char(*c)) {
        return FieldStatus::invalid(kind, InvalidReason::InvalidCharacter { ch, position });
    }

    if let Some(max) = kind.max_len() {
        let len = text.chars().count();
        if len > max {
            return FieldStatus::invalid(kind, InvalidReason::TooLong { len, max });
        }
    }

    FieldStatus::ok(kind)
}

/// Re-run validation for a field after an edit. Called from change handlers.
pub fn revalidate(kind: FieldKind, text: &str) -> FieldStatus {
    let status = validate_field(kind, text);
    if !status.valid {
        tracing::debug!(field = %kind, reason = ?status.reason, "Field flagged invalid");
    }
    status
}

/// Identifies one field slot inside a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "field", content = "index", rename_all = "lowercase")]
pub enum FieldId {
    Name,
    Description,
    Skill(usize),
    Metric(usize),
}

impl FieldId {
    pub fn kind(self) -> FieldKind {
        match self {
            FieldId::Name => FieldKind::Name,
            FieldId::Description => FieldKind::Description,
            FieldId::Skill(_) => FieldKind::Skill,
            FieldId::Metric(_) => FieldKind::Metric,
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldId::Name => f.write_str("name"),
            FieldId::Description => f.write_str("description"),
            FieldId::Skill(i) => write!(f, "skill #{}", i + 1),
            FieldId::Metric(i) => write!(f, "metric #{}", i + 1),
        }
    }
}

/// Validation status of every field in a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileReport {
    pub fields: Vec<(FieldId, FieldStatus)>,
}

impl ProfileReport {
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(|(_, status)| status.valid)
    }

    pub fn status(&self, id: FieldId) -> Option<&FieldStatus> {
        self.fields
            .iter()
            .find(|(field, _)| *field == id)
            .map(|(_, status)| status)
    }

    pub fn is_field_valid(&self, id: FieldId) -> bool {
        self.status(id).map(|s| s.valid).unwrap_or(true)
    }

    /// Invalid fields only, in profile order.
    pub fn issues(&self) -> Vec<(FieldId, InvalidReason)> {
        self.fields
            .iter()
            .filter_map(|(id, status)| status.reason.clone().map(|r| (*id, r)))
            .collect()
    }

    pub fn total_checks(&self) -> usize {
        self.fields.len()
    }

    pub fn passed_checks(&self) -> usize {
        self.fields.iter().filter(|(_, s)| s.valid).count()
    }
}

/// Validate every text field of `profile`.
pub fn validate_profile(profile: &AgentProfile) -> ProfileReport {
    let mut fields = vec![
        (FieldId::Name, validate_field(FieldKind::Name, &profile.name)),
        (
            FieldId::Description,
            validate_field(FieldKind::Description, &profile.description),
        ),
    ];
    for (i, skill) in profile.skills.iter().enumerate() {
        fields.push((FieldId::Skill(i), validate_field(FieldKind::Skill, skill)));
    }
    for (i, metric) in profile.metrics.iter().enumerate() {
        fields.push((FieldId::Metric(i), validate_field(FieldKind::Metric, metric)));
    }
    ProfileReport { fields }
}
