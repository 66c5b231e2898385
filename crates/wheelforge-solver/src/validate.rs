//! Validation of derived plaintext against known constraints.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;
use wheelforge_core::{Letter, Puzzle, Result, SpanKind, WheelforgeError};

use crate::derive::DerivedPlaintext;

/// A known position where the derived letter is wrong or unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    pub index: usize,
    pub expected: Letter,
    /// `None` when the position could not be derived.
    pub derived: Option<Letter>,
}

/// Pass/fail for one span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanReport {
    pub label: String,
    pub kind: SpanKind,
    pub start: usize,
    pub end: usize,
    pub mismatches: Vec<Mismatch>,
}

impl SpanReport {
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Per-span results plus the digest of the derived text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub spans: Vec<SpanReport>,
    pub digest: ContentDigest,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.spans.iter().all(SpanReport::passed)
    }

    /// Every mismatching index, ascending and without duplicates.
    pub fn mismatched_indices(&self) -> Vec<usize> {
        let mut indices: Vec<_> = self
            .spans
            .iter()
            .flat_map(|s| s.mismatches.iter().map(|m| m.index))
            .collect();
        indices.sort_unstable();
        indices.dedup();
        indices
    }

    /// Converts a failed report into [`WheelforgeError::ValidationMismatch`].
    pub fn ensure_passed(&self) -> Result<()> {
        if self.passed() {
            Ok(())
        } else {
            Err(WheelforgeError::ValidationMismatch {
                indices: self.mismatched_indices(),
            })
        }
    }
}

/// Checks every span position of `puzzle` against `derived`.
///
/// Unknown derived positions count as mismatches.
///
/// # Errors
///
/// Returns [`WheelforgeError::LengthMismatch`] when `derived` does not
/// cover the whole ciphertext.
pub fn validate(puzzle: &Puzzle, derived: &DerivedPlaintext) -> Result<ValidationReport> {
    let expected = puzzle.ciphertext().len();
    if derived.len() != expected {
        return Err(WheelforgeError::LengthMismatch {
            context: "derived plaintext".to_string(),
            expected,
            actual: derived.len(),
        });
    }

    let spans: Vec<_> = puzzle
        .spans()
        .iter()
        .map(|span| SpanReport {
            label: span.label(),
            kind: span.kind,
            start: span.start,
            end: span.end,
            mismatches: span
                .pairs()
                .filter_map(|(index, letter)| {
                    let got = derived.get(index);
                    (got != Some(letter)).then_some(Mismatch {
                        index,
                        expected: letter,
                        derived: got,
                    })
                })
                .collect(),
        })
        .collect();

    let report = ValidationReport {
        spans,
        digest: ContentDigest::of(derived),
    };
    info!(
        event = "validation_end",
        passed = report.passed(),
        spans = report.spans.len(),
        mismatches = report.mismatched_indices().len(),
        digest = report.digest.as_str(),
    );
    Ok(report)
}

/// Hex SHA-256 of the rendered derived text (unknowns as `?`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentDigest(String);

impl ContentDigest {
    pub fn of(derived: &DerivedPlaintext) -> Self {
        Self::of_text(&derived.to_string())
    }

    pub fn of_text(text: &str) -> Self {
        Self(format!("{:x}", Sha256::digest(text.as_bytes())))
    }

    /// Compares against a previously accepted hex digest, ignoring case.
    pub fn matches(&self, accepted: &str) -> bool {
        self.0.eq_ignore_ascii_case(accepted.trim())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
