//! Validation presentation: single-field and whole-profile reports, text/json.

use crate::agent::{FieldId, FieldStatus, ProfileReport};
use owo_colors::OwoColorize;
use serde_json::json;

pub fn format_field_status_text(status: &FieldStatus, text: &str) -> String {
    let mut output = format!("Validating {}: {:?}\n\n", status.kind, text);
    match &status.reason {
        None => output.push_str(&format!("✓ Valid {}\n", status.kind)),
        Some(reason) => output.push_str(&format!("✗ Invalid {}: {}\n", status.kind, reason)),
    }
    output
}

pub fn format_field_status_json(status: &FieldStatus, text: &str) -> String {
    let out = json!({
        "field": status.kind,
        "text": text,
        "valid": status.valid,
        "reason": status.reason.as_ref().map(|r| r.to_string()),
    });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_profile_report_text(report: &ProfileReport, verbose: bool) -> String {
    let mut output = String::from("Validating profile:\n\n");
    for (id, status) in &report.fields {
        match &status.reason {
            None => {
                if verbose {
                    output.push_str(&format!("✓ {}\n", id));
                }
            }
            Some(reason) => output.push_str(&format!("✗ {}: {}\n", id, reason)),
        }
    }
    if report.is_valid() {
        output.push_str(&format!(
            "✓ All validation checks passed\n\nValidation passed: {}/{} checks\n",
            report.passed_checks(),
            report.total_checks()
        ));
    } else {
        output.push_str(&format!(
            "\nValidation failed: {} issue(s) found ({}/{} checks passed)\n",
            report.issues().len(),
            report.passed_checks(),
            report.total_checks()
        ));
    }
    output
}

pub fn format_profile_report_json(report: &ProfileReport) -> String {
    let out = json!({
        "valid": report.is_valid(),
        "passed": report.passed_checks(),
        "total": report.total_checks(),
        "issues": issues_json(report),
    });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}

/// `[{ "field": "metric #1", "reason": "..." }]` for every invalid field.
pub fn issues_json(report: &ProfileReport) -> serde_json::Value {
    let issues: Vec<_> = report
        .issues()
        .into_iter()
        .map(|(id, reason)| json!({ "field": id.to_string(), "reason": reason.to_string() }))
        .collect();
    json!(issues)
}

/// One coloured status line for the interactive form.
pub fn format_status_line(id: FieldId, status: &FieldStatus) -> String {
    match &status.reason {
        None => format!("{} {}", "✓".green(), id),
        Some(reason) => format!("{} {}: {}", "✗".red(), id, reason.red()),
    }
}
