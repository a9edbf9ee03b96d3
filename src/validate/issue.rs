//! Validation findings.

use std::fmt;

use serde::Serialize;

use crate::level::EntityKind;
use crate::tile::Point;

/// How serious a finding is.
///
/// Only [`Severity::Error`] should block shipping a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    /// The level is broken.
    Error,
    /// Likely a design mistake.
    Warning,
    /// Worth a look.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
        };
        f.write_str(name)
    }
}

/// Rule group that produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IssueCategory {
    /// Player and toy spawns.
    Spawn,
    /// Presence of the level-complete tile.
    ExitTile,
    /// Spider patrols.
    Spider,
    /// Snails.
    Snail,
    /// Food items.
    Food,
    /// Tripwires.
    Tripwire,
    /// Map-wide quality heuristics.
    Quality,
    /// Tile ids missing from the registry.
    UnknownTile,
}

impl IssueCategory {
    /// Short name used when rendering issues.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            IssueCategory::Spawn => "Spawn",
            IssueCategory::ExitTile => "Exit",
            IssueCategory::Spider => "Spider",
            IssueCategory::Snail => "Snail",
            IssueCategory::Food => "Food",
            IssueCategory::Tripwire => "Tripwire",
            IssueCategory::Quality => "Quality",
            IssueCategory::UnknownTile => "Tile",
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which entity a finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EntityRef {
    /// Entity kind.
    pub kind: EntityKind,
    /// 0-based position in the level's list for that kind.
    pub index: usize,
}

/// One finding of the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    severity: Severity,
    category: IssueCategory,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    entity: Option<EntityRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tile: Option<Point>,
}

impl ValidationIssue {
    pub(crate) fn new(
        severity: Severity,
        category: IssueCategory,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            message: message.into(),
            entity: None,
            tile: None,
        }
    }

    pub(crate) fn error(category: IssueCategory, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, category, message)
    }

    pub(crate) fn warning(category: IssueCategory, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, category, message)
    }

    pub(crate) fn info(category: IssueCategory, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, category, message)
    }

    pub(crate) fn at_tile(mut self, tile: Point) -> Self {
        self.tile = Some(tile);
        self
    }

    pub(crate) fn for_entity(mut self, kind: EntityKind, index: usize) -> Self {
        self.entity = Some(EntityRef { kind, index });
        self
    }

    /// Severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Rule group.
    #[must_use]
    pub const fn category(&self) -> IssueCategory {
        self.category
    }

    /// Human-readable description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Entity the finding is about, if any.
    #[must_use]
    pub const fn entity(&self) -> Option<EntityRef> {
        self.entity
    }

    /// Tile coordinate the finding points at, if any.
    #[must_use]
    pub const fn tile(&self) -> Option<Point> {
        self.tile
    }

    /// Whether this is an error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    /// `[SEVERITY] category: message @ tile(x,y) [Kind #N]`, suffixes only
    /// when present.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.category, self.message)?;
        if let Some(tile) = self.tile {
            write!(f, " @ tile({},{})", tile.x, tile.y)?;
        }
        if let Some(entity) = self.entity {
            write!(f, " [{} #{}]", entity.kind, entity.index)?;
        }
        Ok(())
    }
}

/// True iff any issue is an error. The one signal tooling should gate on.
#[must_use]
pub fn has_errors(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(ValidationIssue::is_error)
}

/// Issue counts per severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct IssueSummary {
    /// Number of errors.
    pub errors: usize,
    /// Number of warnings.
    pub warnings: usize,
    /// Number of infos.
    pub infos: usize,
}

impl IssueSummary {
    /// Count the issues in `issues`.
    #[must_use]
    pub fn from_issues(issues: &[ValidationIssue]) -> Self {
        let mut summary = Self::default();
        for issue in issues {
            match issue.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
                Severity::Info => summary.infos += 1,
            }
        }
        summary
    }

    /// Total number of issues.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.errors + self.warnings + self.infos
    }
}

impl fmt::Display for IssueSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} error(s), {} warning(s), {} info",
            self.errors, self.warnings, self.infos
        )
    }
}
