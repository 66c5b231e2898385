//! Rejection diagnostics.

use serde::{Deserialize, Serialize};
use wheelforge_config::DiagnosticsLevel;
use wheelforge_core::Configuration;

use crate::constraint::Rejection;

/// A rejected configuration and the reason it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionRecord {
    pub configuration: Configuration,
    pub rejection: Rejection,
}

/// Aggregated rejection counts for one track.
///
/// Under [`DiagnosticsLevel::Summary`] only the first
/// [`RejectionSummary::SUMMARY_EXAMPLES`] records are kept, in enumeration
/// order. Under [`DiagnosticsLevel::Detailed`] every record is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionSummary {
    pub slot_conflicts: usize,
    pub option_a_violations: usize,
    pub examples: Vec<RejectionRecord>,
}

impl RejectionSummary {
    pub const SUMMARY_EXAMPLES: usize = 5;

    /// Builds a summary from records in enumeration order.
    pub fn from_records(
        records: impl IntoIterator<Item = RejectionRecord>,
        level: DiagnosticsLevel,
    ) -> Self {
        let limit = match level {
            DiagnosticsLevel::Summary => Self::SUMMARY_EXAMPLES,
            DiagnosticsLevel::Detailed => usize::MAX,
        };
        let mut summary = Self::default();
        for record in records {
            summary.record(record, limit);
        }
        summary
    }

    fn record(&mut self, record: RejectionRecord, limit: usize) {
        match record.rejection {
            Rejection::SlotConflict(_) => self.slot_conflicts += 1,
            Rejection::OptionAViolation(_) => self.option_a_violations += 1,
        }
        if self.examples.len() < limit {
            self.examples.push(record);
        }
    }

    pub fn total(&self) -> usize {
        self.slot_conflicts + self.option_a_violations
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wheelforge_core::{Family, OptionAViolation, SlotConflict, Track};

    fn records(n: usize) -> Vec<RejectionRecord> {
        (0..n)
            .map(|i| {
                let configuration = Configuration::new(Family::Additive, 10, i % 10).unwrap();
                let rejection = if i % 2 == 0 {
                    Rejection::SlotConflict(SlotConflict {
                        track: Track::of(0),
                        slot: 0,
                        existing: 1,
                        requested: 2,
                        indices: vec![0, 60],
                    })
                } else {
                    Rejection::OptionAViolation(OptionAViolation {
                        track: Track::of(0),
                        index: 0,
                        family: Family::Additive,
                    })
                };
                RejectionRecord {
                    configuration,
                    rejection,
                }
            })
            .collect()
    }

    #[test]
    fn test_summary_caps_examples() {
        let summary = RejectionSummary::from_records(records(9), DiagnosticsLevel::Summary);
        assert_eq!(summary.slot_conflicts, 5);
        assert_eq!(summary.option_a_violations, 4);
        assert_eq!(summary.total(), 9);
        assert_eq!(summary.examples.len(), RejectionSummary::SUMMARY_EXAMPLES);
        assert_eq!(summary.examples[0].configuration.phase, 0);
    }

    #[test]
    fn test_detailed_keeps_everything() {
        let summary = RejectionSummary::from_records(records(9), DiagnosticsLevel::Detailed);
        assert_eq!(summary.examples.len(), 9);
    }
}
