//! Plaintext derivation from solved wheels.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;
use wheelforge_core::{Ciphertext, CoverageStats, Letter};

use crate::wheel_set::WheelSet;

/// Placeholder rendered for an undeterminable position.
pub const UNKNOWN_SYMBOL: char = '?';

/// Derived plaintext; `None` marks a position whose wheel slot is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedPlaintext {
    symbols: Vec<Option<Letter>>,
}

impl DerivedPlaintext {
    pub fn new(symbols: Vec<Option<Letter>>) -> Self {
        Self { symbols }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Letter> {
        self.symbols.get(index).copied().flatten()
    }

    pub fn symbols(&self) -> &[Option<Letter>] {
        &self.symbols
    }

    /// Positions that could not be determined.
    pub fn unknown_indices(&self) -> Vec<usize> {
        self.symbols
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn coverage(&self) -> CoverageStats {
        CoverageStats {
            known: self.symbols.iter().filter(|s| s.is_some()).count(),
            total: self.symbols.len(),
        }
    }

    /// Rendered text of `start..=end`, clamped to the derived length.
    pub fn segment(&self, start: usize, end: usize) -> String {
        let end = end.saturating_add(1).min(self.symbols.len());
        if start >= end {
            return String::new();
        }
        self.symbols[start..end].iter().map(|s| render(*s)).collect()
    }
}

impl fmt::Display for DerivedPlaintext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.symbols
            .iter()
            .try_for_each(|s| write!(f, "{}", render(*s)))
    }
}

fn render(symbol: Option<Letter>) -> char {
    symbol.map_or(UNKNOWN_SYMBOL, Letter::to_char)
}

/// Decrypts every position with its track's wheel.
///
/// Pure: the same ciphertext and wheels always give the same text.
pub fn decrypt(ciphertext: &Ciphertext, wheels: &WheelSet) -> DerivedPlaintext {
    let symbols: Vec<_> = ciphertext
        .letters()
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let wheel = wheels.wheel_for_index(i);
            wheel
                .residue_for_index(i)
                .map(|r| wheel.family().decrypt(c, r))
        })
        .collect();
    let derived = DerivedPlaintext::new(symbols);

    let coverage = derived.coverage();
    info!(
        event = "derive_end",
        length = coverage.total,
        known = coverage.known,
        unknown = coverage.unknown(),
    );
    derived
}

/// Enciphers plaintext with the same wheels. Positions whose slot is
/// unknown stay `None`.
pub fn encipher(plaintext: &[Letter], wheels: &WheelSet) -> Vec<Option<Letter>> {
    plaintext
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            let wheel = wheels.wheel_for_index(i);
            wheel
                .residue_for_index(i)
                .map(|r| wheel.family().encrypt(p, r))
        })
        .collect()
}

/// Diagnostic rendering that substitutes residue 0 for unknown slots.
///
/// Never a solution: the substituted positions are listed so callers can
/// keep them apart from derived text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderPreview {
    pub text: String,
    pub placeholder_indices: Vec<usize>,
}

pub fn placeholder_preview(ciphertext: &Ciphertext, wheels: &WheelSet) -> PlaceholderPreview {
    let mut placeholder_indices = Vec::new();
    let text = ciphertext
        .letters()
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let wheel = wheels.wheel_for_index(i);
            let residue = wheel.residue_for_index(i).unwrap_or_else(|| {
                placeholder_indices.push(i);
                0
            });
            wheel.family().decrypt(c, residue).to_char()
        })
        .collect();
    PlaceholderPreview {
        text,
        placeholder_indices,
    }
}
