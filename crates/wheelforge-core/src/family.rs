//! Cipher families.
//!
//! Each family is one decrypt relation between a ciphertext letter `c`,
//! a plaintext letter `p` and a key residue `r` (all mod 26):
//!
//! | Family            | Decrypt         | Residue from a known pair |
//! |-------------------|-----------------|---------------------------|
//! | `Additive`        | `p = c - r`     | `r = c - p`               |
//! | `Subtractive`     | `p = r - c`     | `r = p + c`               |
//! | `AdditiveVariant` | `p = c + r`     | `r = p - c`               |

use std::fmt;

use crate::alphabet::{Letter, ALPHABET_LEN};

/// The closed set of periodic substitution families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Family {
    /// Vigenère.
    #[cfg_attr(feature = "serde", serde(alias = "vigenere"))]
    Additive,

    /// Variant Beaufort.
    #[cfg_attr(feature = "serde", serde(alias = "variant_beaufort"))]
    AdditiveVariant,

    /// Beaufort.
    #[cfg_attr(feature = "serde", serde(alias = "beaufort"))]
    Subtractive,
}

impl Family {
    /// Search priority order. Earlier families win ranking ties.
    pub const PRIORITY: [Family; 3] = [
        Family::Additive,
        Family::AdditiveVariant,
        Family::Subtractive,
    ];

    /// Position of this family in [`Family::PRIORITY`].
    pub fn priority(self) -> usize {
        match self {
            Family::Additive => 0,
            Family::AdditiveVariant => 1,
            Family::Subtractive => 2,
        }
    }

    /// Residue a wheel slot must hold so that `cipher` decrypts to `plain`.
    ///
    /// ```
    /// use wheelforge_core::{Family, Letter};
    ///
    /// let c = Letter::from_char('F').unwrap();
    /// let p = Letter::from_char('E').unwrap();
    /// assert_eq!(Family::Additive.required_residue(c, p), 1);
    /// assert_eq!(Family::AdditiveVariant.required_residue(c, p), 25);
    /// assert_eq!(Family::Subtractive.required_residue(c, p), 9);
    /// ```
    pub fn required_residue(self, cipher: Letter, plain: Letter) -> u8 {
        let c = cipher.index();
        let p = plain.index();
        match self {
            Family::Additive => (c + ALPHABET_LEN - p) % ALPHABET_LEN,
            Family::Subtractive => (p + c) % ALPHABET_LEN,
            Family::AdditiveVariant => (p + ALPHABET_LEN - c) % ALPHABET_LEN,
        }
    }

    /// Forward decrypt relation.
    pub fn decrypt(self, cipher: Letter, residue: u8) -> Letter {
        let c = cipher.index();
        let r = residue % ALPHABET_LEN;
        let p = match self {
            Family::Additive => c + ALPHABET_LEN - r,
            Family::Subtractive => r + ALPHABET_LEN - c,
            Family::AdditiveVariant => c + r,
        };
        Letter::from_index(p)
    }

    /// Inverse of [`Family::decrypt`] for a fixed residue.
    pub fn encrypt(self, plain: Letter, residue: u8) -> Letter {
        let p = plain.index();
        let r = residue % ALPHABET_LEN;
        let c = match self {
            Family::Additive => p + r,
            Family::Subtractive => r + ALPHABET_LEN - p,
            Family::AdditiveVariant => p + ALPHABET_LEN - r,
        };
        Letter::from_index(c)
    }

    /// Whether the anti-null-key (Option-A) rule applies to this family.
    ///
    /// Beaufort is exempt as a fixed project policy.
    pub fn enforces_option_a(self) -> bool {
        !matches!(self, Family::Subtractive)
    }

    /// Short lowercase name used in logs and reports.
    pub fn name(self) -> &'static str {
        match self {
            Family::Additive => "additive",
            Family::AdditiveVariant => "additive_variant",
            Family::Subtractive => "subtractive",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
