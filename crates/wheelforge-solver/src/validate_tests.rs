//! Tests for derivation and validation.

use crate::constraint::ConstraintSolver;
use crate::derive::{decrypt, placeholder_preview, DerivedPlaintext};
use crate::validate::{validate, ContentDigest};
use crate::wheel_set::WheelSet;
use wheelforge_core::{Letter, WheelforgeError};
use wheelforge_test::puzzle::{
    accepted_configurations, puzzle_with_anchors, puzzle_with_full_plaintext, LENGTH, PLAINTEXT,
};

const PLAINTEXT_SHA256: &str = "80b09020fc73b020714b9f38a72b05b9499b54abeb7f870582f052753a30ad1e";

fn accepted_wheels_from_anchors() -> WheelSet {
    let puzzle = puzzle_with_anchors();
    ConstraintSolver::new(&puzzle)
        .solve_configuration(&accepted_configurations())
        .unwrap()
}

#[test]
fn test_full_derivation_validates() {
    let puzzle = puzzle_with_full_plaintext();
    let wheels = ConstraintSolver::new(&puzzle)
        .solve_configuration(&accepted_configurations())
        .unwrap();

    let derived = decrypt(puzzle.ciphertext(), &wheels);
    assert_eq!(derived.to_string(), PLAINTEXT);
    assert!(derived.unknown_indices().is_empty());

    let report = validate(&puzzle, &derived).unwrap();
    assert!(report.passed());
    assert!(report.ensure_passed().is_ok());
    assert_eq!(report.spans.len(), 7);
    assert_eq!(report.spans[0].label, "EAST@[21,24]");
    assert!(report.digest.matches(PLAINTEXT_SHA256));
    assert!(report.digest.matches(&PLAINTEXT_SHA256.to_uppercase()));
}

#[test]
fn test_derivation_is_idempotent() {
    let puzzle = puzzle_with_anchors();
    let wheels = accepted_wheels_from_anchors();

    let first = decrypt(puzzle.ciphertext(), &wheels);
    let second = decrypt(puzzle.ciphertext(), &wheels);
    assert_eq!(first, second);
    assert_eq!(ContentDigest::of(&first), ContentDigest::of(&second));
}

#[test]
fn test_anchor_solution_passes_anchors_only() {
    let wheels = accepted_wheels_from_anchors();
    let anchors = puzzle_with_anchors();
    let derived = decrypt(anchors.ciphertext(), &wheels);

    assert_eq!(derived.segment(21, 24), "EAST");
    assert!(validate(&anchors, &derived).unwrap().passed());
    assert!(!derived.unknown_indices().is_empty());
}

#[test]
fn test_unknown_positions_are_reported_as_mismatches() {
    let wheels = accepted_wheels_from_anchors();
    let full = puzzle_with_full_plaintext();
    let derived = decrypt(full.ciphertext(), &wheels);

    let report = validate(&full, &derived).unwrap();
    assert!(!report.passed());

    let unknown = derived.unknown_indices();
    assert_eq!(report.mismatched_indices(), unknown);
    let mismatch = report
        .spans
        .iter()
        .flat_map(|s| &s.mismatches)
        .find(|m| m.index == unknown[0])
        .unwrap();
    assert_eq!(mismatch.derived, None);
    assert_eq!(
        Some(mismatch.expected),
        Letter::from_char(PLAINTEXT.as_bytes()[unknown[0]] as char)
    );

    // anchor spans still pass
    assert!(report.spans[..4].iter().all(|s| s.passed()));

    assert_eq!(
        report.ensure_passed().unwrap_err(),
        WheelforgeError::ValidationMismatch { indices: unknown }
    );
}

#[test]
fn test_wrong_letters_are_reported() {
    let puzzle = puzzle_with_anchors();
    let mut symbols: Vec<Option<Letter>> = PLAINTEXT.chars().map(Letter::from_char).collect();
    symbols[22] = Letter::from_char('Z');
    let derived = DerivedPlaintext::new(symbols);

    let report = validate(&puzzle, &derived).unwrap();
    assert_eq!(report.mismatched_indices(), vec![22]);
    assert!(!report.spans[0].passed());
    assert!(report.spans[1].passed());
}

#[test]
fn test_length_mismatch() {
    let puzzle = puzzle_with_anchors();
    let derived = DerivedPlaintext::new(vec![None; 5]);
    assert!(matches!(
        validate(&puzzle, &derived),
        Err(WheelforgeError::LengthMismatch { expected: LENGTH, actual: 5, .. })
    ));
}

#[test]
fn test_digest_changes_with_unknowns() {
    let wheels = accepted_wheels_from_anchors();
    let derived = decrypt(puzzle_with_anchors().ciphertext(), &wheels);
    let digest = ContentDigest::of(&derived);
    assert!(!digest.matches(PLAINTEXT_SHA256));
    assert_eq!(digest, ContentDigest::of_text(&derived.to_string()));
    assert_eq!(digest.as_str().len(), 64);
}

#[test]
fn test_placeholder_preview_is_separate_from_derivation() {
    let wheels = accepted_wheels_from_anchors();
    let puzzle = puzzle_with_anchors();
    let derived = decrypt(puzzle.ciphertext(), &wheels);
    let preview = placeholder_preview(puzzle.ciphertext(), &wheels);

    assert_eq!(preview.placeholder_indices, derived.unknown_indices());
    assert_eq!(preview.text.len(), LENGTH);
    for (i, ch) in preview.text.chars().enumerate() {
        if let Some(letter) = derived.get(i) {
            assert_eq!(ch, letter.to_char());
        }
    }
}
