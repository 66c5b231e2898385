//! Per-track periodic residue tables.
//!
//! A [`Wheel`] is owned by exactly one track. Many ciphertext indices map
//! onto one slot through `slot = (index - phase) mod period`, so once a slot
//! holds a residue every later requirement for it must agree.

use std::fmt;

use smallvec::SmallVec;

use crate::alphabet::ALPHABET_LEN;
use crate::error::{Result, SlotConflict, WheelforgeError};
use crate::family::Family;
use crate::track::Track;

/// A (family, period, phase) triple under test for one track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Configuration {
    /// Decrypt relation.
    pub family: Family,
    /// Wheel length `L`.
    pub period: usize,
    /// Starting offset, `0..period`.
    pub phase: usize,
}

impl Configuration {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WheelforgeError::InvalidConfiguration`] for a zero period or
    /// a phase outside `0..period`.
    pub fn new(family: Family, period: usize, phase: usize) -> Result<Self> {
        if period == 0 {
            return Err(WheelforgeError::InvalidConfiguration(
                "period must be at least 1".to_string(),
            ));
        }
        if phase >= period {
            return Err(WheelforgeError::InvalidConfiguration(format!(
                "phase {phase} outside 0..{period}"
            )));
        }
        Ok(Self {
            family,
            period,
            phase,
        })
    }

    /// Maps a ciphertext index onto a wheel slot.
    #[inline]
    pub fn slot_for(&self, index: usize) -> usize {
        // phase < period, so adding period keeps the subtraction non-negative
        (index % self.period + self.period - self.phase) % self.period
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/L{}/p{}", self.family, self.period, self.phase)
    }
}

/// Known versus total slot counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverageStats {
    /// Entries that hold a value.
    pub known: usize,
    /// Total entries.
    pub total: usize,
}

impl CoverageStats {
    /// Entries still unknown.
    pub fn unknown(&self) -> usize {
        self.total - self.known
    }

    /// Fraction of known entries. An empty table counts as fully covered.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.known as f64 / self.total as f64
        }
    }

    /// Returns `true` when nothing is unknown.
    pub fn is_complete(&self) -> bool {
        self.known == self.total
    }
}

/// Periodic key-residue table for one track.
///
/// # Example
///
/// ```
/// use wheelforge_core::{Family, Track, Wheel};
///
/// let mut wheel = Wheel::create(Track::of(0), Family::Additive, 4, 1).unwrap();
/// assert_eq!(wheel.slot_for(0), 3);
/// assert_eq!(wheel.slot_for(7), 2);
///
/// wheel.set_residue(2, 11, 7).unwrap();
/// assert_eq!(wheel.residue_at(2), Some(11));
/// assert_eq!(wheel.residue_at(0), None);
/// assert!((wheel.coverage() - 0.25).abs() < f64::EPSILON);
///
/// let conflict = wheel.set_residue(2, 12, 13).unwrap_err();
/// assert_eq!(conflict.indices, vec![7, 13]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wheel {
    track: Track,
    configuration: Configuration,
    residues: Vec<Option<u8>>,
    contributors: Vec<SmallVec<[usize; 4]>>,
}

impl Wheel {
    /// Creates a wheel with every residue unknown.
    pub fn new(track: Track, configuration: Configuration) -> Self {
        let period = configuration.period;
        Self {
            track,
            configuration,
            residues: vec![None; period],
            contributors: vec![SmallVec::new(); period],
        }
    }

    /// Validates the triple and creates an empty wheel.
    pub fn create(track: Track, family: Family, period: usize, phase: usize) -> Result<Self> {
        Ok(Self::new(track, Configuration::new(family, period, phase)?))
    }

    /// Track owning this wheel.
    pub fn track(&self) -> Track {
        self.track
    }

    /// The configuration this wheel was built for.
    pub fn configuration(&self) -> Configuration {
        self.configuration
    }

    pub fn family(&self) -> Family {
        self.configuration.family
    }

    pub fn period(&self) -> usize {
        self.configuration.period
    }

    pub fn phase(&self) -> usize {
        self.configuration.phase
    }

    /// Slot a ciphertext index reads from.
    #[inline]
    pub fn slot_for(&self, index: usize) -> usize {
        self.configuration.slot_for(index)
    }

    /// Records `value` at `slot` on behalf of ciphertext `index`.
    ///
    /// Setting the same value again only adds `index` to the contributors.
    ///
    /// # Errors
    ///
    /// Returns a [`SlotConflict`] naming the old and new values and every
    /// contributing index when the slot already holds a different value.
    /// The wheel is left unchanged in that case.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is not below the period or `value` is not a residue
    /// in `0..26`.
    pub fn set_residue(
        &mut self,
        slot: usize,
        value: u8,
        index: usize,
    ) -> std::result::Result<(), SlotConflict> {
        assert!(value < ALPHABET_LEN, "residue {value} out of range");
        assert!(
            slot < self.residues.len(),
            "slot {slot} out of range for period {}",
            self.residues.len()
        );
        match self.residues[slot] {
            Some(existing) if existing != value => {
                let mut indices: Vec<usize> = self.contributors[slot].to_vec();
                indices.push(index);
                Err(SlotConflict {
                    track: self.track,
                    slot,
                    existing,
                    requested: value,
                    indices,
                })
            }
            _ => {
                self.residues[slot] = Some(value);
                if !self.contributors[slot].contains(&index) {
                    self.contributors[slot].push(index);
                }
                Ok(())
            }
        }
    }

    /// Residue at `slot`, if known.
    #[inline]
    pub fn residue_at(&self, slot: usize) -> Option<u8> {
        self.residues.get(slot).copied().flatten()
    }

    /// Residue read by ciphertext `index`, if known.
    #[inline]
    pub fn residue_for_index(&self, index: usize) -> Option<u8> {
        self.residue_at(self.slot_for(index))
    }

    /// All slots in order.
    pub fn residues(&self) -> &[Option<u8>] {
        &self.residues
    }

    /// Indices that determined `slot`, in the order they were applied.
    pub fn contributors(&self, slot: usize) -> &[usize] {
        self.contributors.get(slot).map(|c| c.as_slice()).unwrap_or(&[])
    }

    /// Known and total slot counts.
    pub fn coverage_stats(&self) -> CoverageStats {
        CoverageStats {
            known: self.residues.iter().filter(|r| r.is_some()).count(),
            total: self.residues.len(),
        }
    }

    /// Fraction of known slots.
    pub fn coverage(&self) -> f64 {
        self.coverage_stats().fraction()
    }

    pub fn unknown_slots(&self) -> usize {
        self.coverage_stats().unknown()
    }

    pub fn is_complete(&self) -> bool {
        self.coverage_stats().is_complete()
    }

    /// Renders residues as letters, `?` for unknown slots.
    pub fn key_string(&self) -> String {
        self.residues
            .iter()
            .map(|r| match r {
                Some(v) => (b'A' + v) as char,
                None => '?',
            })
            .collect()
    }
}
