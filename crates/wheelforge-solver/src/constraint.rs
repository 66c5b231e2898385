//! Constraint solving for a single configuration.
//!
//! Turns known-plaintext constraints into required wheel residues, enforcing
//! slot consistency and the anti-null-key (Option-A) rule. Every attempt
//! builds a fresh [`Wheel`], so a rejected attempt leaves nothing behind.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;
use wheelforge_core::{
    Configuration, Constraint, OptionAViolation, Puzzle, Result, SlotConflict, Track, Wheel,
    WheelforgeError, TRACK_COUNT,
};

use crate::wheel_set::WheelSet;

/// Why a configuration was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    SlotConflict(SlotConflict),
    OptionAViolation(OptionAViolation),
}

impl Rejection {
    /// Offending ciphertext indices.
    pub fn indices(&self) -> Vec<usize> {
        match self {
            Rejection::SlotConflict(c) => c.indices.clone(),
            Rejection::OptionAViolation(v) => vec![v.index],
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Rejection::SlotConflict(_) => "slot_conflict",
            Rejection::OptionAViolation(_) => "option_a_violation",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::SlotConflict(c) => c.fmt(f),
            Rejection::OptionAViolation(v) => v.fmt(f),
        }
    }
}

impl From<Rejection> for WheelforgeError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::SlotConflict(c) => WheelforgeError::SlotConflict(c),
            Rejection::OptionAViolation(v) => WheelforgeError::OptionAViolation(v),
        }
    }
}

/// Solves wheels for one puzzle.
///
/// # Example
///
/// ```
/// use wheelforge_core::{Ciphertext, Configuration, Family, Puzzle, Span, Track};
/// use wheelforge_solver::ConstraintSolver;
///
/// let ciphertext = Ciphertext::parse("FLRVQQPRNG").unwrap();
/// let puzzle = Puzzle::new(ciphertext, vec![Span::anchor(0, 3, "EAST").unwrap()]).unwrap();
/// let solver = ConstraintSolver::new(&puzzle);
///
/// let config = Configuration::new(Family::Additive, 5, 0).unwrap();
/// let wheel = solver.solve_track(Track::of(0), config).unwrap();
/// // index 0: F - E = 1
/// assert_eq!(wheel.residue_for_index(0), Some(1));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConstraintSolver<'p> {
    puzzle: &'p Puzzle,
}

impl<'p> ConstraintSolver<'p> {
    pub fn new(puzzle: &'p Puzzle) -> Self {
        Self { puzzle }
    }

    pub fn puzzle(&self) -> &'p Puzzle {
        self.puzzle
    }

    /// Residue a constraint demands under `configuration`.
    #[inline]
    pub fn required_residue(constraint: &Constraint, configuration: &Configuration) -> u8 {
        configuration
            .family
            .required_residue(constraint.cipher, constraint.plaintext)
    }

    /// Fills a fresh wheel for `track` from the constraints on that track.
    ///
    /// Stops at the first offending constraint.
    pub fn solve_track(
        &self,
        track: Track,
        configuration: Configuration,
    ) -> std::result::Result<Wheel, Rejection> {
        let mut wheel = Wheel::new(track, configuration);
        let family = configuration.family;

        for constraint in self.puzzle.constraints_for(track) {
            let residue = Self::required_residue(constraint, &configuration);

            if residue == 0 && constraint.in_anchor && family.enforces_option_a() {
                return Err(Rejection::OptionAViolation(OptionAViolation {
                    track,
                    index: constraint.index,
                    family,
                }));
            }

            let slot = wheel.slot_for(constraint.index);
            wheel
                .set_residue(slot, residue, constraint.index)
                .map_err(Rejection::SlotConflict)?;
        }

        trace!(
            event = "track_solved",
            track = track.index() as u64,
            configuration = %configuration,
            known = wheel.coverage_stats().known as u64,
        );
        Ok(wheel)
    }

    /// Tests one fixed configuration per track.
    ///
    /// # Errors
    ///
    /// The first [`SlotConflict`] or [`OptionAViolation`] is fatal here.
    pub fn solve_configuration(&self, configurations: &[Configuration]) -> Result<WheelSet> {
        check_track_count(configurations)?;
        let wheels = Track::all()
            .zip(configurations.iter().copied())
            .map(|(track, configuration)| self.solve_track(track, configuration))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        WheelSet::new(wheels)
    }

    /// Runs every constraint against `configurations` and collects all
    /// rejections instead of stopping at the first.
    ///
    /// Each track still stops at its own first offence, so the result holds
    /// at most one rejection per track.
    ///
    /// # Errors
    ///
    /// [`WheelforgeError::InvalidConfiguration`] unless there is exactly one
    /// configuration per track.
    pub fn audit(&self, configurations: &[Configuration]) -> Result<Vec<Rejection>> {
        check_track_count(configurations)?;
        Ok(Track::all()
            .zip(configurations.iter().copied())
            .filter_map(|(track, configuration)| self.solve_track(track, configuration).err())
            .collect())
    }
}

fn check_track_count(configurations: &[Configuration]) -> Result<()> {
    if configurations.len() != TRACK_COUNT {
        return Err(WheelforgeError::InvalidConfiguration(format!(
            "expected {TRACK_COUNT} configurations, found {}",
            configurations.len()
        )));
    }
    Ok(())
}
