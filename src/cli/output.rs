//! Output formatting utilities for CLI.

use serde::Serialize;
use std::path::PathBuf;
use tilecheck::validate::IssueSummary;
use tilecheck::{LevelData, ValidationIssue, has_errors};

/// Outcome of checking one level file.
#[derive(Debug)]
pub(super) struct LevelReport {
    /// File that was checked.
    pub(super) path: PathBuf,
    /// Level name, when it loaded and has one.
    pub(super) name: Option<String>,
    /// Issues, or the structural error that stopped loading.
    pub(super) outcome: Result<Vec<ValidationIssue>, String>,
}

impl LevelReport {
    /// Report for a level that loaded and was validated.
    pub(super) fn validated(path: PathBuf, level: &LevelData, issues: Vec<ValidationIssue>) -> Self {
        Self {
            path,
            name: level.name.clone(),
            outcome: Ok(issues),
        }
    }

    /// Report for a level that failed to load.
    pub(super) fn load_failed(path: PathBuf, error: String) -> Self {
        Self {
            path,
            name: None,
            outcome: Err(error),
        }
    }

    /// Whether the level passes: it loaded, has no errors, and (when strict)
    /// no warnings.
    pub(super) fn passed(&self, strict: bool) -> bool {
        match &self.outcome {
            Ok(issues) => {
                !has_errors(issues) && (!strict || IssueSummary::from_issues(issues).warnings == 0)
            }
            Err(_) => false,
        }
    }
}

/// JSON-serializable level report.
#[derive(Debug, Serialize)]
pub(super) struct JsonLevelReport<'a> {
    /// File that was checked.
    pub(super) path: String,
    /// Level name (null if unnamed or not loaded).
    pub(super) name: Option<&'a str>,
    /// Whether the level passed.
    pub(super) passed: bool,
    /// Structural load error (null if the level loaded).
    pub(super) load_error: Option<&'a str>,
    /// Issue counts (null if the level did not load).
    pub(super) summary: Option<IssueSummary>,
    /// Findings in rule order.
    pub(super) issues: &'a [ValidationIssue],
}

impl<'a> JsonLevelReport<'a> {
    /// Create from a `LevelReport`.
    pub(super) fn from_report(report: &'a LevelReport, strict: bool) -> Self {
        let (load_error, summary, issues) = match &report.outcome {
            Ok(issues) => (None, Some(IssueSummary::from_issues(issues)), issues.as_slice()),
            Err(e) => (Some(e.as_str()), None, &[][..]),
        };
        Self {
            path: report.path.display().to_string(),
            name: report.name.as_deref(),
            passed: report.passed(strict),
            load_error,
            summary,
            issues,
        }
    }
}

/// Format one level report as human-readable text.
pub(super) fn format_text(report: &LevelReport, strict: bool) -> String {
    let mut output = String::new();

    let status = if report.passed(strict) { "PASS" } else { "FAIL" };
    output.push_str(&format!("{status} {}", report.path.display()));
    if let Some(name) = &report.name {
        output.push_str(&format!(" ({name})"));
    }
    output.push('\n');

    match &report.outcome {
        Ok(issues) => {
            for issue in issues {
                output.push_str(&format!("  {issue}\n"));
            }
            output.push_str(&format!("  {}\n", IssueSummary::from_issues(issues)));
        }
        Err(e) => output.push_str(&format!("  could not load: {e}\n")),
    }

    output
}
