//! Six-way positional classifier.

use std::fmt;

/// Number of interleaved tracks.
pub const TRACK_COUNT: usize = 6;

/// One of the six interleaved position classes.
///
/// The track of an index is `(i mod 2) * 3 + (i mod 3)`, which depends only
/// on `i mod 6`.
///
/// # Example
///
/// ```
/// use wheelforge_core::Track;
///
/// assert_eq!(Track::of(0).index(), 0);
/// assert_eq!(Track::of(1).index(), 4);
/// assert_eq!(Track::of(5).index(), 5);
/// assert_eq!(Track::of(6), Track::of(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track(u8);

impl Track {
    /// Classifies a ciphertext position.
    #[inline]
    pub fn of(index: usize) -> Track {
        Track(((index % 2) * 3 + index % 3) as u8)
    }

    /// Creates a track from its raw number, if it is in `0..6`.
    pub fn from_raw(raw: usize) -> Option<Track> {
        (raw < TRACK_COUNT).then_some(Track(raw as u8))
    }

    /// Returns the track number (0–5).
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterates over all six tracks in ascending order.
    pub fn all() -> impl Iterator<Item = Track> {
        (0..TRACK_COUNT as u8).map(Track)
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "track {}", self.0)
    }
}
