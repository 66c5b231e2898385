//! Configuration system for WheelForge.
//!
//! Load search configuration from TOML or YAML files to control the
//! period range, family selection, coverage tolerance and parallelism
//! without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use wheelforge_config::{FamilyRequest, SearchConfig};
//!
//! let config = SearchConfig::from_toml_str(r#"
//!     unfilled_slot_tolerance = 2
//!
//!     [period_range]
//!     min = 12
//!     max = 20
//!
//!     [puzzle]
//!     ciphertext = "ABCDEFGHIJ"
//!     anchors = [{ start = 2, end = 4, plaintext = "XYZ" }]
//! "#).unwrap();
//!
//! assert_eq!(config.period_range.min, 12);
//! assert_eq!(config.families, FamilyRequest::Search);
//! assert_eq!(config.puzzle.unwrap().anchors.len(), 1);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use wheelforge_config::SearchConfig;
//!
//! let config = SearchConfig::load("search.toml").unwrap_or_default();
//! assert_eq!(config.period_range.max, 22);
//! ```

use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wheelforge_core::{Ciphertext, Family, Puzzle, Span, SpanKind, WheelforgeError, TRACK_COUNT};

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid puzzle: {0}")]
    Puzzle(#[from] WheelforgeError),
}

/// Main search configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Inclusive range of wheel periods to enumerate.
    #[serde(default)]
    pub period_range: PeriodRange,

    /// Search all families or pin one per track.
    #[serde(default)]
    pub families: FamilyRequest,

    /// Maximum unknown slots accepted in a selected wheel (None = any).
    #[serde(default)]
    pub unfilled_slot_tolerance: Option<usize>,

    /// Number of threads for candidate evaluation.
    #[serde(default)]
    pub thread_count: ThreadCount,

    /// How much rejection detail to keep.
    #[serde(default)]
    pub diagnostics: DiagnosticsLevel,

    /// Keep at most this many ranked candidates per track.
    #[serde(default)]
    pub max_ranked: Option<usize>,

    /// Optional inline puzzle definition.
    #[serde(default)]
    pub puzzle: Option<PuzzleConfig>,
}

impl SearchConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.period_range.validate()?;
        if let FamilyRequest::Fixed { families } = &self.families {
            if families.len() != TRACK_COUNT {
                return Err(ConfigError::Invalid(format!(
                    "fixed family list needs {TRACK_COUNT} entries, found {}",
                    families.len()
                )));
            }
        }
        if let ThreadCount::Count(0) = self.thread_count {
            return Err(ConfigError::Invalid("thread count must be positive".to_string()));
        }
        Ok(())
    }

    /// Sets the period range.
    pub fn with_period_range(mut self, min: usize, max: usize) -> Self {
        self.period_range = PeriodRange { min, max };
        self
    }

    /// Pins one family per track.
    pub fn with_fixed_families(mut self, families: [Family; TRACK_COUNT]) -> Self {
        self.families = FamilyRequest::Fixed {
            families: families.to_vec(),
        };
        self
    }

    /// Sets the unfilled-slot tolerance.
    pub fn with_tolerance(mut self, tolerance: usize) -> Self {
        self.unfilled_slot_tolerance = Some(tolerance);
        self
    }

    /// Sets the evaluation thread count.
    pub fn with_thread_count(mut self, thread_count: ThreadCount) -> Self {
        self.thread_count = thread_count;
        self
    }

    /// Sets the diagnostics level.
    pub fn with_diagnostics(mut self, diagnostics: DiagnosticsLevel) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Families to try for `track`, in priority order.
    pub fn families_for(&self, track: usize) -> Vec<Family> {
        match &self.families {
            FamilyRequest::Search => Family::PRIORITY.to_vec(),
            FamilyRequest::Fixed { families } => families.get(track).copied().into_iter().collect(),
        }
    }
}

/// Inclusive period bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PeriodRange {
    pub min: usize,
    pub max: usize,
}

impl PeriodRange {
    pub const DEFAULT_MIN: usize = 10;
    pub const DEFAULT_MAX: usize = 22;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min == 0 || self.min > self.max {
            return Err(ConfigError::Invalid(format!(
                "period range {}..={} must satisfy 1 <= min <= max",
                self.min, self.max
            )));
        }
        Ok(())
    }

    pub fn periods(&self) -> RangeInclusive<usize> {
        self.min..=self.max
    }
}

impl Default for PeriodRange {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}

/// Family selection for the search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FamilyRequest {
    /// Try every family in priority order.
    #[default]
    Search,

    /// One family per track, indexed by track number.
    Fixed { families: Vec<Family> },
}

/// Thread count configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadCount {
    /// Sequential evaluation.
    #[default]
    None,

    /// Use the rayon global pool.
    Auto,

    /// Specific number of threads.
    Count(usize),
}

impl ThreadCount {
    pub fn is_parallel(&self) -> bool {
        !matches!(self, ThreadCount::None | ThreadCount::Count(1))
    }
}

/// Rejection reporting level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticsLevel {
    /// Counts plus the first few offending candidates.
    #[default]
    Summary,

    /// Every rejection record.
    Detailed,
}

/// Inline puzzle definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PuzzleConfig {
    /// Uppercase A-Z ciphertext.
    pub ciphertext: String,

    /// Length the ciphertext must have, if fixed.
    #[serde(default)]
    pub expected_length: Option<usize>,

    #[serde(default)]
    pub anchors: Vec<SpanConfig>,

    #[serde(default)]
    pub tail: Vec<SpanConfig>,
}

impl PuzzleConfig {
    /// Loads a puzzle definition from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses a puzzle definition from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Builds and validates the puzzle.
    pub fn to_puzzle(&self) -> Result<Puzzle, ConfigError> {
        let ciphertext = Ciphertext::parse(self.ciphertext.trim())?;
        let spans = self
            .anchors
            .iter()
            .map(|s| s.to_span(SpanKind::Anchor))
            .chain(self.tail.iter().map(|s| s.to_span(SpanKind::Tail)))
            .collect::<Result<Vec<_>, _>>()?;
        let puzzle = Puzzle::new(ciphertext, spans)?;
        Ok(match self.expected_length {
            Some(expected) => puzzle.with_expected_length(expected)?,
            None => puzzle,
        })
    }
}

/// One known-plaintext span; `end` is inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SpanConfig {
    pub start: usize,
    pub end: usize,
    pub plaintext: String,
}

impl SpanConfig {
    fn to_span(&self, kind: SpanKind) -> Result<Span, WheelforgeError> {
        Span::new(kind, self.start, self.end, &self.plaintext)
    }
}

#[cfg(test)]
mod tests;
