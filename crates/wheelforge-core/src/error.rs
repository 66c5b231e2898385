//! Error types for WheelForge

use thiserror::Error;

use crate::family::Family;
use crate::track::Track;
use crate::wheel::Configuration;

/// Two constraints require different residues on one wheel slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error(
    "slot conflict on {track} slot {slot}: holds {existing}, required {requested} (indices {indices:?})"
)]
pub struct SlotConflict {
    /// Track owning the wheel.
    pub track: Track,
    /// Slot both requirements map to.
    pub slot: usize,
    /// Residue already recorded.
    pub existing: u8,
    /// Residue the new constraint requires.
    pub requested: u8,
    /// Every index that contributed to the slot, the offending one last.
    pub indices: Vec<usize>,
}

/// A zero residue at a constrained position for an additive-style family.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("option-a violation on {track}: {family} requires residue 0 at index {index}")]
pub struct OptionAViolation {
    /// Track owning the wheel.
    pub track: Track,
    /// Constrained ciphertext index.
    pub index: usize,
    /// Family under test.
    pub family: Family,
}

/// Main error type for WheelForge operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WheelforgeError {
    /// Ciphertext or span length invariant violated
    #[error("length mismatch in {context}: expected {expected}, found {actual}")]
    LengthMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// Two constraints disagree on one wheel slot
    #[error(transparent)]
    SlotConflict(#[from] SlotConflict),

    /// Zero residue at an anchor for an additive-style family
    #[error(transparent)]
    OptionAViolation(#[from] OptionAViolation),

    /// Selected wheel leaves more slots unknown than the caller tolerates
    #[error("{track} ({configuration}): {unfilled} unfilled slots exceed tolerance of {tolerance}")]
    InsufficientCoverage {
        track: Track,
        configuration: Configuration,
        unfilled: usize,
        tolerance: usize,
    },

    /// Derived plaintext disagrees with a known constraint
    #[error("validation failed at {} positions: {indices:?}", indices.len())]
    ValidationMismatch { indices: Vec<usize> },

    /// Search space held no accepted candidate for a track
    #[error("no valid configuration for {track} among {evaluated} candidates")]
    NoValidConfiguration { track: Track, evaluated: usize },

    /// Malformed input (symbols, spans)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Malformed family, period or phase request
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl WheelforgeError {
    /// Returns `true` for rejections a search may absorb by discarding the
    /// candidate.
    pub fn is_candidate_rejection(&self) -> bool {
        matches!(
            self,
            WheelforgeError::SlotConflict(_) | WheelforgeError::OptionAViolation(_)
        )
    }
}

/// Result type alias for WheelForge operations
pub type Result<T> = std::result::Result<T, WheelforgeError>;
