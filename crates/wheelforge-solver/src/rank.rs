//! Deterministic ranking of accepted candidates.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use wheelforge_core::{Configuration, CoverageStats, Wheel};

use crate::candidate::Candidate;

/// Total order over accepted candidates.
///
/// Compared lexicographically: full coverage before partial, then smaller
/// period, then family priority, then smaller phase, then enumeration
/// ordinal. The ordinal is unique, so no two keys compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RankKey {
    /// `false` sorts first: fully covered wheels win.
    pub partial: bool,
    pub period: usize,
    pub family_priority: usize,
    pub phase: usize,
    pub ordinal: usize,
}

impl RankKey {
    pub fn new(candidate: &Candidate, coverage: CoverageStats) -> Self {
        let configuration = candidate.configuration;
        Self {
            partial: !coverage.is_complete(),
            period: configuration.period,
            family_priority: configuration.family.priority(),
            phase: configuration.phase,
            ordinal: candidate.ordinal,
        }
    }
}

/// An accepted candidate together with its solved wheel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCandidate {
    /// 1-based position after ranking.
    pub rank: usize,
    pub key: RankKey,
    pub configuration: Configuration,
    pub coverage: CoverageStats,
    pub wheel: Wheel,
}

impl RankedCandidate {
    pub(crate) fn unranked(candidate: Candidate, wheel: Wheel) -> Self {
        let coverage = wheel.coverage_stats();
        Self {
            rank: 0,
            key: RankKey::new(&candidate, coverage),
            configuration: candidate.configuration,
            coverage,
            wheel,
        }
    }

    pub fn ordinal(&self) -> usize {
        self.key.ordinal
    }

    pub fn unfilled(&self) -> usize {
        self.coverage.unknown()
    }
}

impl PartialOrd for RankedCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankedCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Sorts candidates by [`RankKey`] and assigns 1-based ranks.
///
/// The result depends only on the set of candidates, never on the order in
/// which they were evaluated.
pub fn rank_candidates(mut accepted: Vec<RankedCandidate>) -> Vec<RankedCandidate> {
    accepted.sort_unstable_by_key(|c| c.key);
    for (i, candidate) in accepted.iter_mut().enumerate() {
        candidate.rank = i + 1;
    }
    accepted
}
