//! Tests for single-configuration solving.

use crate::constraint::{ConstraintSolver, Rejection};
use crate::derive::{decrypt, encipher};
use crate::wheel_set::WheelSet;
use wheelforge_core::{
    Ciphertext, Configuration, Family, Letter, Puzzle, Span, Track, WheelforgeError, TRACK_COUNT,
};
use wheelforge_test::puzzle::{
    accepted_configurations, puzzle_with_anchors, puzzle_with_full_plaintext, ACCEPTED_PERIOD,
    LENGTH, PLAINTEXT, SELF_ENCIPHERED_INDEX,
};
use wheelforge_test::random::random_wheels;

fn all_a(len: usize) -> Ciphertext {
    Ciphertext::parse(&"A".repeat(len)).unwrap()
}

fn uniform(family: Family, period: usize) -> [Configuration; TRACK_COUNT] {
    [Configuration::new(family, period, 0).unwrap(); TRACK_COUNT]
}

#[test]
fn test_canonical_configuration_has_no_rejections() {
    let puzzle = puzzle_with_full_plaintext();
    let solver = ConstraintSolver::new(&puzzle);
    let configurations = accepted_configurations();

    assert!(solver.audit(&configurations).unwrap().is_empty());

    let wheels = solver.solve_configuration(&configurations).unwrap();
    assert_eq!(wheels.configurations(), configurations.to_vec());
    assert!(wheels.wheel(Track::of(0)).is_complete());
    for track in Track::all().skip(1) {
        assert_eq!(wheels.wheel(track).unknown_slots(), 1);
    }
    let coverage = wheels.coverage();
    assert_eq!(coverage.total, TRACK_COUNT * ACCEPTED_PERIOD);
    assert_eq!(coverage.known, LENGTH);
}

#[test]
fn test_disagreeing_anchors_yield_one_conflict() {
    // index 0 and 60 are both track 0, slot 0 at period 10
    let puzzle = Puzzle::new(
        all_a(97),
        vec![Span::anchor(0, 0, "B").unwrap(), Span::anchor(60, 60, "C").unwrap()],
    )
    .unwrap();
    let solver = ConstraintSolver::new(&puzzle);
    let configurations = uniform(Family::Additive, 10);

    let rejections = solver.audit(&configurations).unwrap();
    assert_eq!(rejections.len(), 1);
    match &rejections[0] {
        Rejection::SlotConflict(conflict) => {
            assert_eq!(conflict.track, Track::of(0));
            assert_eq!(conflict.slot, 0);
            assert_eq!(conflict.existing, 25);
            assert_eq!(conflict.requested, 24);
            assert_eq!(conflict.indices, vec![0, 60]);
        }
        other => panic!("expected slot conflict, got {other:?}"),
    }
    assert_eq!(rejections[0].indices(), vec![0, 60]);
}

#[test]
fn test_conflict_is_fatal_for_configuration_test() {
    let puzzle = Puzzle::new(
        all_a(97),
        vec![Span::anchor(0, 0, "B").unwrap(), Span::tail(60, 60, "C").unwrap()],
    )
    .unwrap();
    let solver = ConstraintSolver::new(&puzzle);

    let err = solver
        .solve_configuration(&uniform(Family::Additive, 10))
        .unwrap_err();
    assert!(matches!(err, WheelforgeError::SlotConflict(ref c) if c.indices == vec![0, 60]));
    assert!(err.is_candidate_rejection());

    // period 11 separates the two indices
    assert!(solver.solve_configuration(&uniform(Family::Additive, 11)).is_ok());
}

#[test]
fn test_wrong_configuration_count_is_invalid() {
    let puzzle = puzzle_with_anchors();
    let solver = ConstraintSolver::new(&puzzle);
    let configurations = uniform(Family::Additive, 10);

    for count in [0, TRACK_COUNT - 1] {
        let short = &configurations[..count];
        assert!(matches!(
            solver.audit(short),
            Err(WheelforgeError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            solver.solve_configuration(short),
            Err(WheelforgeError::InvalidConfiguration(_))
        ));
    }

    let mut long = configurations.to_vec();
    long.push(configurations[0]);
    assert!(matches!(
        solver.audit(&long),
        Err(WheelforgeError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_zero_anchor_residue_rejects_additive_families() {
    let puzzle = Puzzle::new(all_a(12), vec![Span::anchor(0, 0, "A").unwrap()]).unwrap();
    let solver = ConstraintSolver::new(&puzzle);

    for family in [Family::Additive, Family::AdditiveVariant] {
        let config = Configuration::new(family, 10, 0).unwrap();
        let rejection = solver.solve_track(Track::of(0), config).unwrap_err();
        assert_eq!(
            rejection,
            Rejection::OptionAViolation(wheelforge_core::OptionAViolation {
                track: Track::of(0),
                index: 0,
                family,
            })
        );
    }

    let config = Configuration::new(Family::Subtractive, 10, 0).unwrap();
    let wheel = solver.solve_track(Track::of(0), config).unwrap();
    assert_eq!(wheel.residue_for_index(0), Some(0));
}

#[test]
fn test_zero_residue_outside_anchors_is_accepted() {
    let puzzle = Puzzle::new(all_a(12), vec![Span::tail(0, 0, "A").unwrap()]).unwrap();
    let solver = ConstraintSolver::new(&puzzle);
    let config = Configuration::new(Family::Additive, 10, 0).unwrap();
    let wheel = solver.solve_track(Track::of(0), config).unwrap();
    assert_eq!(wheel.residue_for_index(0), Some(0));
}

#[test]
fn test_self_enciphered_anchor_forces_subtractive_on_track_two() {
    let puzzle = puzzle_with_anchors();
    let solver = ConstraintSolver::new(&puzzle);
    let track = Track::of(SELF_ENCIPHERED_INDEX);
    assert_eq!(track.index(), 2);

    for period in 10..=22 {
        for family in [Family::Additive, Family::AdditiveVariant] {
            let config = Configuration::new(family, period, 0).unwrap();
            assert!(solver.solve_track(track, config).is_err());
        }
    }
}

#[test]
fn test_period_longer_than_track_leaves_slots_unknown() {
    let plaintext = &PLAINTEXT[..12];
    let puzzle = Puzzle::new(all_a(12), vec![Span::tail(0, 11, plaintext).unwrap()]).unwrap();
    let solver = ConstraintSolver::new(&puzzle);

    // track 0 owns indices 0 and 6 only
    let config = Configuration::new(Family::Subtractive, 10, 0).unwrap();
    let wheel = solver.solve_track(Track::of(0), config).unwrap();
    assert_eq!(wheel.coverage_stats().known, 2);
    assert!(wheel.coverage() < 1.0);
}

#[test]
fn test_rejected_attempt_leaves_no_state() {
    let puzzle = Puzzle::new(
        all_a(97),
        vec![Span::anchor(0, 0, "B").unwrap(), Span::anchor(60, 60, "C").unwrap()],
    )
    .unwrap();
    let solver = ConstraintSolver::new(&puzzle);
    let track = Track::of(0);

    let conflicting = Configuration::new(Family::Additive, 10, 0).unwrap();
    let clean = Configuration::new(Family::Additive, 11, 0).unwrap();

    let before = solver.solve_track(track, clean).unwrap();
    assert!(solver.solve_track(track, conflicting).is_err());
    let after = solver.solve_track(track, clean).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_random_wheels_round_trip_through_solver() {
    let plaintext: Vec<Letter> = PLAINTEXT.chars().filter_map(Letter::from_char).collect();

    for seed in [1, 2, 3, 1989] {
        let wheels = WheelSet::new(random_wheels(seed, ACCEPTED_PERIOD)).unwrap();
        let cipher: Vec<Letter> = encipher(&plaintext, &wheels)
            .into_iter()
            .map(|l| l.unwrap())
            .collect();
        let ciphertext = Ciphertext::from_letters(cipher);

        let derived = decrypt(&ciphertext, &wheels);
        assert_eq!(derived.to_string(), PLAINTEXT);

        let puzzle = Puzzle::new(
            ciphertext,
            vec![Span::tail(0, LENGTH - 1, PLAINTEXT).unwrap()],
        )
        .unwrap();
        let solved = ConstraintSolver::new(&puzzle)
            .solve_configuration(&wheels.configurations())
            .unwrap();
        for index in 0..LENGTH {
            assert_eq!(
                solved.wheel_for_index(index).residue_for_index(index),
                wheels.wheel_for_index(index).residue_for_index(index),
            );
        }
    }
}
