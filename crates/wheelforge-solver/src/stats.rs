//! Search statistics.
//!
//! Plain counters for tracking candidate evaluation across a search run.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Search-level statistics.
///
/// # Example
///
/// ```
/// use wheelforge_solver::SearchStats;
///
/// let mut stats = SearchStats::default();
/// stats.start();
/// stats.record_accepted();
/// stats.record_slot_conflict();
/// stats.record_option_a_violation();
///
/// assert_eq!(stats.candidates_evaluated, 3);
/// assert_eq!(stats.candidates_accepted, 1);
/// assert_eq!(stats.rejected(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    #[serde(skip)]
    start_time: Option<Instant>,
    /// Frozen duration once the search has finished.
    #[serde(with = "duration_ms")]
    elapsed: Duration,
    /// Total candidates evaluated across all tracks.
    pub candidates_evaluated: u64,
    /// Candidates that produced a consistent wheel.
    pub candidates_accepted: u64,
    /// Candidates rejected by a slot conflict.
    pub slot_conflicts: u64,
    /// Candidates rejected by the Option-A rule.
    pub option_a_violations: u64,
    /// Tracks searched.
    pub tracks_searched: u64,
}

impl SearchStats {
    /// Marks the start of searching.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Freezes the elapsed time.
    pub fn finish(&mut self) {
        if let Some(start) = self.start_time.take() {
            self.elapsed = start.elapsed();
        }
    }

    /// Elapsed time since [`start`](Self::start), or the frozen duration
    /// after [`finish`](Self::finish).
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .map(|t| t.elapsed())
            .unwrap_or(self.elapsed)
    }

    pub fn record_accepted(&mut self) {
        self.candidates_evaluated += 1;
        self.candidates_accepted += 1;
    }

    pub fn record_slot_conflict(&mut self) {
        self.candidates_evaluated += 1;
        self.slot_conflicts += 1;
    }

    pub fn record_option_a_violation(&mut self) {
        self.candidates_evaluated += 1;
        self.option_a_violations += 1;
    }

    pub fn record_track(&mut self) {
        self.tracks_searched += 1;
    }

    pub fn rejected(&self) -> u64 {
        self.slot_conflicts + self.option_a_violations
    }

    /// Folds per-track counters into this one. Timing is left alone.
    pub fn merge(&mut self, other: &SearchStats) {
        self.candidates_evaluated += other.candidates_evaluated;
        self.candidates_accepted += other.candidates_accepted;
        self.slot_conflicts += other.slot_conflicts;
        self.option_a_violations += other.option_a_violations;
        self.tracks_searched += other.tracks_searched;
    }

    /// Returns the candidates per second rate.
    pub fn candidates_per_second(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.candidates_evaluated as f64 / secs
        } else {
            0.0
        }
    }

    /// Returns the acceptance rate (accepted / evaluated).
    pub fn acceptance_rate(&self) -> f64 {
        if self.candidates_evaluated == 0 {
            0.0
        } else {
            self.candidates_accepted as f64 / self.candidates_evaluated as f64
        }
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}
