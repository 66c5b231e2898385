//! Synthetic 97-letter puzzle.
//!
//! The ciphertext was produced from [`PLAINTEXT`] with one period-17 wheel
//! per track. Index 26 (track 2, inside `NORTHEAST`) enciphers to itself,
//! so only the subtractive family can explain track 2 without a zero
//! anchor residue. No other index has equal cipher and plain letters.

use wheelforge_core::{Ciphertext, Configuration, Family, Puzzle, Span, TRACK_COUNT};

pub const CIPHERTEXT: &str = "LTIKZEAGWOQXKPYXJUUBAXFUDPOKQKIZEWKKBJKSQJVPUBNVDFEFAZYGNWIKBZJSBJJEUQFVQPCGLQMSBXPRIQSHTVWPCUGZZ";

pub const PLAINTEXT: &str = "SLOWLYDESPARATLYSLOWLEASTNORTHEASTPASSAGEDEBRISTHATENCUMBEREDTHBERLINCLOCKFTHEDOORWAYWEREREMOVEDW";

pub const LENGTH: usize = 97;

/// `(start, end, plaintext)` of the four anchors, end inclusive.
pub const ANCHORS: [(usize, usize, &str); 4] = [
    (21, 24, "EAST"),
    (25, 33, "NORTHEAST"),
    (63, 68, "BERLIN"),
    (69, 73, "CLOCK"),
];

/// Index ranges not covered by an anchor.
pub const TAIL_RANGES: [(usize, usize); 3] = [(0, 20), (34, 62), (74, 96)];

/// Period every track converges on.
pub const ACCEPTED_PERIOD: usize = 17;

/// The anchor index whose cipher and plain letters are equal.
pub const SELF_ENCIPHERED_INDEX: usize = 26;

pub fn anchor_spans() -> Vec<Span> {
    ANCHORS
        .iter()
        .map(|&(start, end, text)| Span::anchor(start, end, text).unwrap())
        .collect()
}

/// Spans covering every non-anchor index with the known plaintext.
pub fn tail_spans() -> Vec<Span> {
    TAIL_RANGES
        .iter()
        .map(|&(start, end)| Span::tail(start, end, &PLAINTEXT[start..=end]).unwrap())
        .collect()
}

pub fn ciphertext() -> Ciphertext {
    Ciphertext::parse(CIPHERTEXT).unwrap()
}

/// The puzzle with only its four anchors known.
pub fn puzzle_with_anchors() -> Puzzle {
    Puzzle::new(ciphertext(), anchor_spans())
        .unwrap()
        .with_expected_length(LENGTH)
        .unwrap()
}

/// The puzzle with the whole plaintext known (anchors plus tail spans).
pub fn puzzle_with_full_plaintext() -> Puzzle {
    let mut spans = anchor_spans();
    spans.extend(tail_spans());
    Puzzle::new(ciphertext(), spans)
        .unwrap()
        .with_expected_length(LENGTH)
        .unwrap()
}

/// Historically accepted configuration per track: additive everywhere
/// except subtractive on track 2, period 17, phase 0.
pub fn accepted_configurations() -> [Configuration; TRACK_COUNT] {
    let family = |track: usize| {
        if track == 2 {
            Family::Subtractive
        } else {
            Family::Additive
        }
    };
    std::array::from_fn(|track| Configuration::new(family(track), ACCEPTED_PERIOD, 0).unwrap())
}
