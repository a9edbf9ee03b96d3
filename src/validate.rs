//! Static level validation.
//!
//! [`LevelValidator::validate`] walks a [`crate::LevelData`] and returns an
//! ordered list of [`ValidationIssue`]s. Findings are data, never errors:
//! the level still loads. Tooling gates on [`has_errors`] alone.

mod issue;
mod rules;

pub use issue::{EntityRef, IssueCategory, IssueSummary, Severity, ValidationIssue, has_errors};
pub use rules::LevelValidator;
