//! The six solved wheels of one configuration attempt.

use serde::{Deserialize, Serialize};
use wheelforge_core::{
    Configuration, CoverageStats, Result, Track, Wheel, WheelforgeError, TRACK_COUNT,
};

/// One wheel per track, indexed by track number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelSet {
    wheels: Vec<Wheel>,
}

impl WheelSet {
    /// Builds a set from six wheels in track order.
    ///
    /// # Errors
    ///
    /// Returns [`WheelforgeError::InvalidConfiguration`] unless there are
    /// exactly six wheels and wheel `i` belongs to track `i`.
    pub fn new(wheels: Vec<Wheel>) -> Result<Self> {
        if wheels.len() != TRACK_COUNT {
            return Err(WheelforgeError::InvalidConfiguration(format!(
                "wheel set needs {TRACK_COUNT} wheels, found {}",
                wheels.len()
            )));
        }
        if let Some((i, wheel)) = wheels
            .iter()
            .enumerate()
            .find(|(i, w)| w.track().index() != *i)
        {
            return Err(WheelforgeError::InvalidConfiguration(format!(
                "wheel at position {i} belongs to {}",
                wheel.track()
            )));
        }
        Ok(Self { wheels })
    }

    /// Wheel owned by `track`.
    #[inline]
    pub fn wheel(&self, track: Track) -> &Wheel {
        &self.wheels[track.index()]
    }

    /// Wheel that governs ciphertext `index`.
    #[inline]
    pub fn wheel_for_index(&self, index: usize) -> &Wheel {
        self.wheel(Track::of(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Wheel> {
        self.wheels.iter()
    }

    /// Configuration per track.
    pub fn configurations(&self) -> Vec<Configuration> {
        self.wheels.iter().map(Wheel::configuration).collect()
    }

    /// Slot coverage summed over all wheels.
    pub fn coverage(&self) -> CoverageStats {
        self.wheels
            .iter()
            .map(Wheel::coverage_stats)
            .fold(CoverageStats::default(), |acc, s| CoverageStats {
                known: acc.known + s.known,
                total: acc.total + s.total,
            })
    }
}

impl<'a> IntoIterator for &'a WheelSet {
    type Item = &'a Wheel;
    type IntoIter = std::slice::Iter<'a, Wheel>;

    fn into_iter(self) -> Self::IntoIter {
        self.wheels.iter()
    }
}
