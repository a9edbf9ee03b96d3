//! Level validation command implementation.

use super::output::{JsonLevelReport, LevelReport, format_text};
use super::{CliError, ReportFormat};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tilecheck::{EngineConfig, LevelData, LevelValidator, TileRegistry};
use tracing::info;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if any level fails to load or fails validation.
pub(crate) fn execute(
    levels: &[PathBuf],
    config: &EngineConfig,
    format: ReportFormat,
    strict: bool,
    progress: bool,
    threads: Option<usize>,
) -> Result<(), CliError> {
    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let registry = TileRegistry::standard();
    let validator = LevelValidator::new(&registry, config)?;

    let pb = if progress {
        let pb = ProgressBar::new(levels.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} levels")
        {
            pb.set_style(style.progress_chars("=>-"));
        }
        Some(pb)
    } else {
        None
    };

    // Levels are independent; collect keeps input order.
    let reports: Vec<LevelReport> = levels
        .par_iter()
        .map(|path| {
            let report = check_level(path, &validator);
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            report
        })
        .collect();

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let failed = reports.iter().filter(|r| !r.passed(strict)).count();
    info!(levels = reports.len(), failed, "validation finished");

    match format {
        ReportFormat::Text => {
            for report in &reports {
                print!("{}", format_text(report, strict));
            }
            println!();
            println!("{} level(s) checked, {failed} failed", reports.len());
        }
        ReportFormat::Json => {
            let json_reports: Vec<JsonLevelReport<'_>> = reports
                .iter()
                .map(|r| JsonLevelReport::from_report(r, strict))
                .collect();
            println!("{}", serde_json::to_string_pretty(&json_reports)?);
        }
    }

    if failed > 0 {
        return Err(CliError::new(format!(
            "{failed} of {} level(s) failed validation",
            reports.len()
        )));
    }

    Ok(())
}

/// Load and validate one level file.
fn check_level(path: &Path, validator: &LevelValidator<'_>) -> LevelReport {
    match LevelData::load(path) {
        Ok(level) => {
            let issues = validator.validate(&level);
            LevelReport::validated(path.to_path_buf(), &level, issues)
        }
        Err(e) => LevelReport::load_failed(path.to_path_buf(), e.to_string()),
    }
}
