//! WheelForge Solver Engine
//!
//! This crate provides the anchor-constrained wheel solver:
//! - Constraint solving for one configuration per track
//! - Lazy candidate enumeration and deterministic ranking
//! - Configuration search, sequential or parallel
//! - Plaintext derivation from solved wheels
//! - Validation against known plaintext and content digests
//!
//! Logging levels:
//! - **INFO**: Search start/end, derivation and validation summaries
//! - **DEBUG**: Per-track search summaries
//! - **TRACE**: Individual candidate rejections

pub mod candidate;
pub mod constraint;
pub mod derive;
pub mod rank;
pub mod report;
pub mod search;
pub mod stats;
pub mod validate;
pub mod wheel_set;

#[cfg(test)]
mod constraint_tests;
#[cfg(test)]
mod validate_tests;

pub use candidate::{Candidate, CandidateSequence};
pub use constraint::{ConstraintSolver, Rejection};
pub use derive::{decrypt, encipher, placeholder_preview, DerivedPlaintext, PlaceholderPreview};
pub use rank::{RankKey, RankedCandidate};
pub use report::{RejectionRecord, RejectionSummary};
pub use search::{ConfigurationSearch, SearchOutcome, TrackSearchResult};
pub use stats::SearchStats;
pub use validate::{validate, ContentDigest, Mismatch, SpanReport, ValidationReport};
pub use wheel_set::WheelSet;
