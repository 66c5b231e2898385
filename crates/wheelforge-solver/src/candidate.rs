//! Lazy enumeration of candidate configurations.
//!
//! Candidates are generated family-major in priority order, then by
//! ascending period, then by ascending phase. The ordinal of each candidate
//! is its position in that sequence and breaks every remaining ranking tie.

use std::iter::FusedIterator;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use wheelforge_core::{Configuration, Family};

/// One configuration with its enumeration ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub ordinal: usize,
    pub configuration: Configuration,
}

/// Iterator over `(family, period, phase)` triples without materializing them.
///
/// # Example
///
/// ```
/// use wheelforge_core::Family;
/// use wheelforge_solver::CandidateSequence;
///
/// let seq = CandidateSequence::new(vec![Family::Additive], 2..=3);
/// let triples: Vec<_> = seq
///     .map(|c| (c.configuration.period, c.configuration.phase))
///     .collect();
/// assert_eq!(triples, vec![(2, 0), (2, 1), (3, 0), (3, 1), (3, 2)]);
/// ```
#[derive(Debug, Clone)]
pub struct CandidateSequence {
    families: Vec<Family>,
    min_period: usize,
    max_period: usize,
    family_idx: usize,
    period: usize,
    phase: usize,
    ordinal: usize,
}

impl CandidateSequence {
    /// Creates a sequence over `families` (kept in the given order) and
    /// `periods`. Periods below 1 are skipped.
    pub fn new(families: Vec<Family>, periods: RangeInclusive<usize>) -> Self {
        let min_period = (*periods.start()).max(1);
        let max_period = *periods.end();
        Self {
            families,
            min_period,
            max_period,
            family_idx: 0,
            period: min_period,
            phase: 0,
            ordinal: 0,
        }
    }

    /// Total candidate count: `|families| * sum(L for L in periods)`.
    pub fn total(&self) -> usize {
        if self.min_period > self.max_period {
            return 0;
        }
        let per_family: usize = (self.min_period..=self.max_period).sum();
        self.families.len() * per_family
    }
}

impl Iterator for CandidateSequence {
    type Item = Candidate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.min_period > self.max_period {
            return None;
        }
        let family = *self.families.get(self.family_idx)?;
        let configuration = Configuration {
            family,
            period: self.period,
            phase: self.phase,
        };
        let candidate = Candidate {
            ordinal: self.ordinal,
            configuration,
        };

        self.ordinal += 1;
        self.phase += 1;
        if self.phase == self.period {
            self.phase = 0;
            self.period += 1;
            if self.period > self.max_period {
                self.period = self.min_period;
                self.family_idx += 1;
            }
        }

        Some(candidate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total().saturating_sub(self.ordinal);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CandidateSequence {}

impl FusedIterator for CandidateSequence {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_major_order() {
        let seq = CandidateSequence::new(Family::PRIORITY.to_vec(), 10..=11);
        let all: Vec<_> = seq.collect();
        assert_eq!(all.len(), 3 * (10 + 11));

        assert_eq!(all[0].configuration, Configuration::new(Family::Additive, 10, 0).unwrap());
        assert_eq!(all[9].configuration, Configuration::new(Family::Additive, 10, 9).unwrap());
        assert_eq!(all[10].configuration, Configuration::new(Family::Additive, 11, 0).unwrap());
        assert_eq!(all[21].configuration.family, Family::AdditiveVariant);
        assert_eq!(all[42].configuration.family, Family::Subtractive);

        for (i, c) in all.iter().enumerate() {
            assert_eq!(c.ordinal, i);
            assert!(c.configuration.phase < c.configuration.period);
        }
    }

    #[test]
    fn test_size_hint_tracks_progress() {
        let mut seq = CandidateSequence::new(vec![Family::Subtractive], 10..=22);
        assert_eq!(seq.len(), 208);
        seq.next();
        assert_eq!(seq.len(), 207);
    }

    #[test]
    fn test_empty_sequences() {
        assert_eq!(CandidateSequence::new(vec![], 10..=22).count(), 0);
        #[allow(clippy::reversed_empty_ranges)]
        let reversed = CandidateSequence::new(vec![Family::Additive], 5..=4);
        assert_eq!(reversed.count(), 0);
        assert_eq!(CandidateSequence::new(vec![Family::Additive], 0..=1).count(), 1);
    }
}
