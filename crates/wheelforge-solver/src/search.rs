//! Exhaustive configuration search over every track.
//!
//! For each track the search enumerates `(family, period, phase)`
//! candidates, solves a fresh wheel per candidate, and ranks the survivors
//! with [`RankKey`](crate::rank::RankKey). Evaluation may run on a rayon
//! pool; results are collected in enumeration order and ranked by a key
//! that ignores evaluation order, so sequential and parallel runs agree.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};
use wheelforge_config::{SearchConfig, ThreadCount};
use wheelforge_core::{Puzzle, Result, Track, WheelforgeError};

use crate::candidate::{Candidate, CandidateSequence};
use crate::constraint::{ConstraintSolver, Rejection};
use crate::rank::{rank_candidates, RankedCandidate};
use crate::report::{RejectionRecord, RejectionSummary};
use crate::stats::SearchStats;
use crate::wheel_set::WheelSet;

type Evaluation = std::result::Result<RankedCandidate, RejectionRecord>;

/// Ranked candidates and diagnostics for one track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSearchResult {
    pub track: Track,
    /// Accepted candidates, best first. May be truncated by `max_ranked`.
    pub ranked: Vec<RankedCandidate>,
    /// Accepted count before truncation.
    pub accepted: usize,
    pub evaluated: usize,
    pub rejections: RejectionSummary,
}

impl TrackSearchResult {
    /// Top-ranked candidate, if any was accepted.
    pub fn best(&self) -> Option<&RankedCandidate> {
        self.ranked.first()
    }

    /// Picks the top-ranked candidate, checking it against `tolerance`.
    ///
    /// # Errors
    ///
    /// - [`WheelforgeError::NoValidConfiguration`] when nothing was accepted
    /// - [`WheelforgeError::InsufficientCoverage`] when the best wheel leaves
    ///   more than `tolerance` slots unknown
    pub fn select(&self, tolerance: Option<usize>) -> Result<&RankedCandidate> {
        let best = self
            .best()
            .ok_or(WheelforgeError::NoValidConfiguration {
                track: self.track,
                evaluated: self.evaluated,
            })?;
        if let Some(tolerance) = tolerance {
            if best.unfilled() > tolerance {
                return Err(WheelforgeError::InsufficientCoverage {
                    track: self.track,
                    configuration: best.configuration,
                    unfilled: best.unfilled(),
                    tolerance,
                });
            }
        }
        Ok(best)
    }
}

/// Results for all six tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub tracks: Vec<TrackSearchResult>,
    pub stats: SearchStats,
}

impl SearchOutcome {
    pub fn track(&self, track: Track) -> &TrackSearchResult {
        &self.tracks[track.index()]
    }

    /// Assembles the top-ranked wheel of every track.
    ///
    /// # Errors
    ///
    /// Fails on the first track whose selection fails; see
    /// [`TrackSearchResult::select`].
    pub fn best_wheel_set(&self, tolerance: Option<usize>) -> Result<WheelSet> {
        let wheels = self
            .tracks
            .iter()
            .map(|t| t.select(tolerance).map(|c| c.wheel.clone()))
            .collect::<Result<Vec<_>>>()?;
        WheelSet::new(wheels)
    }
}

/// Drives the per-track search.
///
/// # Example
///
/// ```
/// use wheelforge_config::SearchConfig;
/// use wheelforge_core::{Ciphertext, Puzzle, Span};
/// use wheelforge_solver::ConfigurationSearch;
///
/// let ciphertext = Ciphertext::parse("FLRVQQPRNGKSPQTW").unwrap();
/// let puzzle = Puzzle::new(ciphertext, vec![Span::anchor(0, 3, "EAST").unwrap()]).unwrap();
///
/// let search = ConfigurationSearch::new(SearchConfig::new().with_period_range(2, 4));
/// let outcome = search.search(&puzzle).unwrap();
/// assert_eq!(outcome.tracks.len(), 6);
/// assert!(outcome.stats.candidates_evaluated > 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigurationSearch {
    config: SearchConfig,
}

impl ConfigurationSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Candidate sequence for `track` under the configured families and periods.
    pub fn candidates(&self, track: Track) -> CandidateSequence {
        CandidateSequence::new(
            self.config.families_for(track.index()),
            self.config.period_range.periods(),
        )
    }

    /// Checks the request before any candidate is enumerated.
    ///
    /// # Errors
    ///
    /// [`WheelforgeError::InvalidConfiguration`] for an empty period range,
    /// a fixed family list without one entry per track, or zero threads.
    pub fn validate(&self) -> Result<()> {
        self.config
            .validate()
            .map_err(|err| WheelforgeError::InvalidConfiguration(err.to_string()))
    }

    /// Searches every track in ascending order.
    ///
    /// # Errors
    ///
    /// See [`ConfigurationSearch::validate`].
    pub fn search(&self, puzzle: &Puzzle) -> Result<SearchOutcome> {
        self.validate()?;
        let mut stats = SearchStats::default();
        stats.start();

        info!(
            event = "search_start",
            ciphertext_len = puzzle.ciphertext().len(),
            constraints = puzzle.constraints().len(),
            period_min = self.config.period_range.min,
            period_max = self.config.period_range.max,
            parallel = self.config.thread_count.is_parallel(),
        );

        let tracks: Vec<_> = Track::all()
            .map(|track| {
                let (result, track_stats) = self.search_track_with_stats(puzzle, track);
                stats.merge(&track_stats);
                result
            })
            .collect();

        stats.finish();
        info!(
            event = "search_end",
            candidates_evaluated = stats.candidates_evaluated,
            candidates_accepted = stats.candidates_accepted,
            slot_conflicts = stats.slot_conflicts,
            option_a_violations = stats.option_a_violations,
            duration_ms = stats.elapsed().as_millis() as u64,
        );

        Ok(SearchOutcome { tracks, stats })
    }

    /// Searches a single track.
    ///
    /// # Errors
    ///
    /// See [`ConfigurationSearch::validate`].
    pub fn search_track(&self, puzzle: &Puzzle, track: Track) -> Result<TrackSearchResult> {
        self.validate()?;
        Ok(self.search_track_with_stats(puzzle, track).0)
    }

    fn search_track_with_stats(
        &self,
        puzzle: &Puzzle,
        track: Track,
    ) -> (TrackSearchResult, SearchStats) {
        let candidates = self.candidates(track);
        debug!(
            event = "track_start",
            track = track.index(),
            candidates = candidates.len(),
        );

        let solver = ConstraintSolver::new(puzzle);
        let evaluations = self.evaluate_all(&solver, track, candidates);

        let mut stats = SearchStats::default();
        stats.record_track();
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();
        for evaluation in evaluations {
            match evaluation {
                Ok(candidate) => {
                    stats.record_accepted();
                    accepted.push(candidate);
                }
                Err(record) => {
                    match record.rejection {
                        Rejection::SlotConflict(_) => stats.record_slot_conflict(),
                        Rejection::OptionAViolation(_) => stats.record_option_a_violation(),
                    }
                    trace!(
                        event = "candidate_rejected",
                        track = track.index(),
                        configuration = %record.configuration,
                        reason = record.rejection.reason(),
                        indices = ?record.rejection.indices(),
                    );
                    rejected.push(record);
                }
            }
        }

        let accepted_count = accepted.len();
        let mut ranked = rank_candidates(accepted);
        if let Some(max) = self.config.max_ranked {
            ranked.truncate(max);
        }

        let result = TrackSearchResult {
            track,
            accepted: accepted_count,
            evaluated: stats.candidates_evaluated as usize,
            rejections: RejectionSummary::from_records(rejected, self.config.diagnostics),
            ranked,
        };

        match result.best() {
            Some(best) => debug!(
                event = "track_end",
                track = track.index(),
                accepted = accepted_count,
                rejected = stats.rejected(),
                best = %best.configuration,
                unfilled = best.unfilled(),
            ),
            None => debug!(
                event = "track_end",
                track = track.index(),
                accepted = 0u64,
                rejected = stats.rejected(),
            ),
        }

        (result, stats)
    }

    /// Evaluates every candidate and returns the results in enumeration order.
    fn evaluate_all(
        &self,
        solver: &ConstraintSolver<'_>,
        track: Track,
        candidates: CandidateSequence,
    ) -> Vec<Evaluation> {
        match self.config.thread_count {
            ThreadCount::None | ThreadCount::Count(1) => candidates
                .map(|candidate| evaluate(solver, track, candidate))
                .collect(),
            ThreadCount::Auto => evaluate_parallel(solver, track, candidates),
            ThreadCount::Count(n) => {
                match rayon::ThreadPoolBuilder::new().num_threads(n).build() {
                    Ok(pool) => pool.install(|| evaluate_parallel(solver, track, candidates)),
                    Err(err) => {
                        warn!(
                            event = "thread_pool_unavailable",
                            threads = n,
                            error = %err,
                        );
                        candidates
                            .map(|candidate| evaluate(solver, track, candidate))
                            .collect()
                    }
                }
            }
        }
    }
}

fn evaluate_parallel(
    solver: &ConstraintSolver<'_>,
    track: Track,
    candidates: CandidateSequence,
) -> Vec<Evaluation> {
    let candidates: Vec<Candidate> = candidates.collect();
    candidates
        .par_iter()
        .map(|candidate| evaluate(solver, track, *candidate))
        .collect()
}

fn evaluate(solver: &ConstraintSolver<'_>, track: Track, candidate: Candidate) -> Evaluation {
    solver
        .solve_track(track, candidate.configuration)
        .map(|wheel| RankedCandidate::unranked(candidate, wheel))
        .map_err(|rejection| RejectionRecord {
            configuration: candidate.configuration,
            rejection,
        })
}
