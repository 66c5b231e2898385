//! WheelForge Core - types shared by every WheelForge crate
//!
//! This crate provides the fundamental pieces of the periodic wheel model:
//! - [`Letter`] values of the fixed 26-letter alphabet
//! - the six-way position classifier ([`Track`])
//! - cipher [`Family`] formulas and per-track [`Wheel`] residue tables
//! - the puzzle model ([`Ciphertext`], [`Span`], [`Constraint`], [`Puzzle`])
//! - the error taxonomy shared by solver, search and validation

pub mod alphabet;
pub mod error;
pub mod family;
pub mod puzzle;
pub mod track;
pub mod wheel;


pub use alphabet::{parse_letters, Letter, ALPHABET_LEN};
pub use error::{OptionAViolation, Result, SlotConflict, WheelforgeError};
pub use family::Family;
pub use puzzle::{Ciphertext, Constraint, Puzzle, Span, SpanKind};
pub use track::{Track, TRACK_COUNT};
pub use wheel::{Configuration, CoverageStats, Wheel};
