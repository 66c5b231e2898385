//! The fixed 26-letter alphabet.

use std::fmt;

use crate::error::{Result, WheelforgeError};

/// Number of symbols in the alphabet. Residues live in `0..ALPHABET_LEN`.
pub const ALPHABET_LEN: u8 = 26;

/// A single uppercase letter `A`–`Z`, stored as its offset from `A`.
///
/// # Example
///
/// ```
/// use wheelforge_core::Letter;
///
/// let e = Letter::from_char('E').unwrap();
/// assert_eq!(e.index(), 4);
/// assert_eq!(e.to_char(), 'E');
/// assert_eq!(Letter::from_index(30), e);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "char", try_from = "char"))]
pub struct Letter(u8);

impl Letter {
    /// Converts an uppercase ASCII letter. Anything else yields `None`.
    pub fn from_char(ch: char) -> Option<Self> {
        if ch.is_ascii_uppercase() {
            Some(Letter(ch as u8 - b'A'))
        } else {
            None
        }
    }

    /// Builds a letter from any integer offset, reduced modulo 26.
    pub fn from_index(value: u8) -> Self {
        Letter(value % ALPHABET_LEN)
    }

    /// Returns the offset from `A` (0–25).
    #[inline]
    pub fn index(self) -> u8 {
        self.0
    }

    /// Returns the uppercase character.
    pub fn to_char(self) -> char {
        (b'A' + self.0) as char
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl From<Letter> for char {
    fn from(letter: Letter) -> char {
        letter.to_char()
    }
}

impl TryFrom<char> for Letter {
    type Error = WheelforgeError;

    fn try_from(ch: char) -> Result<Self> {
        Letter::from_char(ch)
            .ok_or_else(|| WheelforgeError::InvalidInput(format!("'{ch}' is not a letter A-Z")))
    }
}

/// Parses an uppercase `A`–`Z` string into letters.
///
/// Fails with [`WheelforgeError::InvalidInput`] naming the first offending
/// position.
pub fn parse_letters(text: &str) -> Result<Vec<Letter>> {
    text.chars()
        .enumerate()
        .map(|(pos, ch)| {
            Letter::from_char(ch).ok_or_else(|| {
                WheelforgeError::InvalidInput(format!(
                    "symbol '{ch}' at position {pos} is not a letter A-Z"
                ))
            })
        })
        .collect()
}
