//! WheelForge - an anchor-constrained periodic wheel solver
//!
//! Load a puzzle, search every track for its best wheel configuration,
//! derive the plaintext and validate it in one call.
//!
//! # Example
//!
//! ```rust
//! use wheelforge::prelude::*;
//!
//! let ciphertext = Ciphertext::parse("FLRVQQPRNGKSPQTW").unwrap();
//! let puzzle = Puzzle::new(ciphertext, vec![Span::anchor(0, 3, "EAST").unwrap()]).unwrap();
//!
//! let outcome = run_search(&puzzle, &SearchConfig::new().with_period_range(2, 5)).unwrap();
//! assert_eq!(outcome.derived.segment(0, 3), "EAST");
//! assert!(outcome.report.passed());
//! ```

pub use wheelforge_config::{
    ConfigError, DiagnosticsLevel, FamilyRequest, PeriodRange, PuzzleConfig, SearchConfig,
    SpanConfig, ThreadCount,
};
pub use wheelforge_core::{
    Ciphertext, Configuration, Constraint, CoverageStats, Family, Letter, Puzzle, Result, Span,
    SpanKind, Track, Wheel, WheelforgeError, TRACK_COUNT,
};
pub use wheelforge_solver::{
    decrypt, encipher, placeholder_preview, validate, ConfigurationSearch, ConstraintSolver,
    ContentDigest, DerivedPlaintext, PlaceholderPreview, SearchOutcome, SearchStats,
    TrackSearchResult, ValidationReport, WheelSet,
};

mod pipeline;
pub use pipeline::{run_configured, run_search, SolveOutcome};

#[cfg(feature = "console")]
pub use wheelforge_console::init as init_console;

pub mod prelude {
    pub use super::{run_configured, run_search, SolveOutcome};
    pub use super::{
        Ciphertext, Configuration, Family, Letter, Puzzle, Span, SpanKind, Track, WheelforgeError,
    };
    pub use super::{SearchConfig, ThreadCount};
    pub use super::{DerivedPlaintext, ValidationReport, WheelSet};
}
