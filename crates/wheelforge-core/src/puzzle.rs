//! Puzzle model: ciphertext plus known-plaintext spans.

use std::fmt;

use crate::alphabet::{parse_letters, Letter};
use crate::error::{Result, WheelforgeError};
use crate::track::Track;

/// Immutable ciphertext.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ciphertext(Vec<Letter>);

impl Ciphertext {
    /// Parses an uppercase `A`–`Z` string.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(Self(parse_letters(text)?))
    }

    pub fn from_letters(letters: Vec<Letter>) -> Self {
        Self(letters)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Letter> {
        self.0.get(index).copied()
    }

    pub fn letters(&self) -> &[Letter] {
        &self.0
    }

    /// Indices belonging to `track`, ascending.
    pub fn indices_of(&self, track: Track) -> impl Iterator<Item = usize> + '_ {
        (0..self.0.len()).filter(move |&i| Track::of(i) == track)
    }
}

impl fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|l| write!(f, "{l}"))
    }
}

/// Where a known-plaintext span comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SpanKind {
    /// Publicly known plaintext. Subject to the Option-A rule.
    Anchor,
    /// Additional hypothesised plaintext, solved like an anchor.
    Tail,
}

/// A contiguous index span with known plaintext. `end` is inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub kind: SpanKind,
    pub start: usize,
    pub end: usize,
    pub plaintext: Vec<Letter>,
}

impl Span {
    /// Creates a span, checking that the plaintext fills `start..=end`.
    ///
    /// ```
    /// use wheelforge_core::{Span, SpanKind};
    ///
    /// let east = Span::anchor(21, 24, "EAST").unwrap();
    /// assert_eq!(east.len(), 4);
    /// assert!(east.contains(24));
    /// assert!(Span::anchor(21, 24, "EASTERN").is_err());
    /// ```
    pub fn new(kind: SpanKind, start: usize, end: usize, plaintext: &str) -> Result<Self> {
        let span = Self {
            kind,
            start,
            end,
            plaintext: parse_letters(plaintext)?,
        };
        span.check_extent()?;
        Ok(span)
    }

    /// Checks that `start..=end` is non-empty and the plaintext fills it.
    ///
    /// # Errors
    ///
    /// - [`WheelforgeError::InvalidInput`] when `end` precedes `start`
    /// - [`WheelforgeError::LengthMismatch`] when the plaintext is shorter
    ///   or longer than the span
    pub fn check_extent(&self) -> Result<()> {
        let (start, end) = (self.start, self.end);
        if end < start {
            return Err(WheelforgeError::InvalidInput(format!(
                "span end {end} precedes start {start}"
            )));
        }
        let expected = end - start + 1;
        if self.plaintext.len() != expected {
            return Err(WheelforgeError::LengthMismatch {
                context: format!("span [{start},{end}] plaintext"),
                expected,
                actual: self.plaintext.len(),
            });
        }
        Ok(())
    }

    pub fn anchor(start: usize, end: usize, plaintext: &str) -> Result<Self> {
        Self::new(SpanKind::Anchor, start, end, plaintext)
    }

    pub fn tail(start: usize, end: usize, plaintext: &str) -> Result<Self> {
        Self::new(SpanKind::Tail, start, end, plaintext)
    }

    pub fn len(&self) -> usize {
        self.plaintext.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plaintext.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }

    /// Known letter at an absolute index inside the span.
    pub fn letter_at(&self, index: usize) -> Option<Letter> {
        if self.contains(index) {
            self.plaintext.get(index - self.start).copied()
        } else {
            None
        }
    }

    /// `(index, letter)` pairs in order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, Letter)> + '_ {
        self.plaintext
            .iter()
            .enumerate()
            .map(move |(offset, &l)| (self.start + offset, l))
    }

    /// Short label like `EAST@[21,24]`.
    pub fn label(&self) -> String {
        let text: String = self.plaintext.iter().map(|l| l.to_char()).collect();
        format!("{text}@[{},{}]", self.start, self.end)
    }
}

/// A single known-plaintext requirement, used while solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraint {
    pub index: usize,
    pub cipher: Letter,
    pub plaintext: Letter,
    /// `true` when the index lies within an anchor span.
    pub in_anchor: bool,
}

impl Constraint {
    pub fn track(&self) -> Track {
        Track::of(self.index)
    }
}

/// Ciphertext plus every known-plaintext span.
///
/// Construction validates the spans and flattens them into one
/// [`Constraint`] per index, sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    ciphertext: Ciphertext,
    spans: Vec<Span>,
    constraints: Vec<Constraint>,
}

impl Puzzle {
    /// Builds a puzzle from a ciphertext and its known spans.
    ///
    /// # Errors
    ///
    /// - [`WheelforgeError::LengthMismatch`] when a span reaches past the
    ///   end of the ciphertext, or its plaintext does not fill it
    /// - [`WheelforgeError::InvalidInput`] when a span is reversed or
    ///   overlapping spans disagree
    pub fn new(ciphertext: Ciphertext, spans: Vec<Span>) -> Result<Self> {
        let mut known: Vec<Option<(Letter, bool)>> = vec![None; ciphertext.len()];

        for span in &spans {
            span.check_extent()?;
            if span.end >= ciphertext.len() {
                return Err(WheelforgeError::LengthMismatch {
                    context: format!("span {} against ciphertext", span.label()),
                    expected: ciphertext.len(),
                    actual: span.end + 1,
                });
            }
            let is_anchor = span.kind == SpanKind::Anchor;
            for (index, letter) in span.pairs() {
                match known[index] {
                    Some((existing, _)) if existing != letter => {
                        return Err(WheelforgeError::InvalidInput(format!(
                            "spans disagree at index {index}: {existing} vs {letter}"
                        )));
                    }
                    Some((_, anchored)) => known[index] = Some((letter, anchored || is_anchor)),
                    None => known[index] = Some((letter, is_anchor)),
                }
            }
        }

        let constraints = known
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let (plaintext, in_anchor) = (*entry)?;
                Some(Constraint {
                    index,
                    cipher: ciphertext.get(index)?,
                    plaintext,
                    in_anchor,
                })
            })
            .collect();

        Ok(Self {
            ciphertext,
            spans,
            constraints,
        })
    }

    /// Checks the ciphertext against a fixed expected length.
    pub fn with_expected_length(self, expected: usize) -> Result<Self> {
        if self.ciphertext.len() != expected {
            return Err(WheelforgeError::LengthMismatch {
                context: "ciphertext".to_string(),
                expected,
                actual: self.ciphertext.len(),
            });
        }
        Ok(self)
    }

    pub fn ciphertext(&self) -> &Ciphertext {
        &self.ciphertext
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Every constraint, ascending by index.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Constraints whose index maps to `track`.
    pub fn constraints_for(&self, track: Track) -> impl Iterator<Item = &Constraint> + '_ {
        self.constraints.iter().filter(move |c| c.track() == track)
    }

    /// Known plaintext at `index`, if any span covers it.
    pub fn known_letter(&self, index: usize) -> Option<Letter> {
        self.constraints
            .binary_search_by_key(&index, |c| c.index)
            .ok()
            .map(|pos| self.constraints[pos].plaintext)
    }

    /// Number of ciphertext indices that map to `track`.
    pub fn track_len(&self, track: Track) -> usize {
        self.ciphertext.indices_of(track).count()
    }
}
