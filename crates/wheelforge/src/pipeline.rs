//! Search-to-validation pipeline that hides the solver wiring.

use serde::{Deserialize, Serialize};
use tracing::info;
use wheelforge_config::{ConfigError, SearchConfig};
use wheelforge_core::{Puzzle, Result};
use wheelforge_solver::{
    decrypt, validate, ConfigurationSearch, DerivedPlaintext, SearchOutcome, ValidationReport,
    WheelSet,
};

/// Everything one pipeline run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveOutcome {
    pub search: SearchOutcome,
    pub wheels: WheelSet,
    pub derived: DerivedPlaintext,
    pub report: ValidationReport,
}

/// Searches, selects the top wheel per track, derives and validates.
///
/// # Errors
///
/// - `InvalidConfiguration` when `config` is malformed
/// - `NoValidConfiguration` or `InsufficientCoverage` from selection
/// - `ValidationMismatch` when the derived text contradicts a known span
pub fn run_search(puzzle: &Puzzle, config: &SearchConfig) -> Result<SolveOutcome> {
    let search = ConfigurationSearch::new(config.clone()).search(puzzle)?;
    let wheels = search.best_wheel_set(config.unfilled_slot_tolerance)?;

    let derived = decrypt(puzzle.ciphertext(), &wheels);
    let report = validate(puzzle, &derived)?;
    report.ensure_passed()?;

    info!(
        event = "pipeline_end",
        configurations = %wheels
            .configurations()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" "),
        digest = report.digest.as_str(),
    );

    Ok(SolveOutcome {
        search,
        wheels,
        derived,
        report,
    })
}

/// Runs the pipeline on the puzzle embedded in `config`.
///
/// # Errors
///
/// [`ConfigError::Invalid`] when `config` has no puzzle section; puzzle and
/// solver errors surface as [`ConfigError::Puzzle`].
pub fn run_configured(config: &SearchConfig) -> std::result::Result<SolveOutcome, ConfigError> {
    let puzzle = config
        .puzzle
        .as_ref()
        .ok_or_else(|| ConfigError::Invalid("no puzzle section".to_string()))?
        .to_puzzle()?;
    Ok(run_search(&puzzle, config)?)
}
