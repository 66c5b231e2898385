//! End-to-end pipeline tests on the synthetic 97-letter puzzle.

use wheelforge::prelude::*;
use wheelforge::{ConfigError, ContentDigest, PuzzleConfig, SpanConfig};
use wheelforge_test::puzzle::{
    puzzle_with_anchors, puzzle_with_full_plaintext, ANCHORS, CIPHERTEXT, PLAINTEXT,
};

#[test]
fn test_full_plaintext_pipeline() {
    let config = SearchConfig::new().with_tolerance(1);
    let outcome = run_search(&puzzle_with_full_plaintext(), &config).unwrap();

    assert_eq!(outcome.derived.to_string(), PLAINTEXT);
    assert!(outcome.report.passed());
    assert_eq!(outcome.report.digest, ContentDigest::of_text(PLAINTEXT));
    assert!(outcome
        .wheels
        .configurations()
        .iter()
        .all(|c| c.period == 17));
}

#[test]
fn test_anchors_only_pipeline_derives_anchor_text() {
    let outcome = run_search(&puzzle_with_anchors(), &SearchConfig::new()).unwrap();

    for (start, end, text) in ANCHORS {
        assert_eq!(outcome.derived.segment(start, end), text);
    }
    assert!(outcome.report.passed());
    assert!(outcome.derived.coverage().unknown() > 0);
}

#[test]
fn test_tolerance_failure_is_reported() {
    let config = SearchConfig::new().with_tolerance(2);
    let err = run_search(&puzzle_with_anchors(), &config).unwrap_err();
    assert!(matches!(err, WheelforgeError::InsufficientCoverage { .. }));
}

#[test]
fn test_malformed_config_is_rejected_before_search() {
    let config = SearchConfig::new().with_period_range(5, 4);
    let err = run_search(&puzzle_with_anchors(), &config).unwrap_err();
    assert!(matches!(err, WheelforgeError::InvalidConfiguration(_)));
}

#[test]
fn test_parallel_pipeline_matches_sequential() {
    let puzzle = puzzle_with_anchors();
    let sequential = run_search(&puzzle, &SearchConfig::new()).unwrap();
    let parallel = run_search(
        &puzzle,
        &SearchConfig::new().with_thread_count(ThreadCount::Auto),
    )
    .unwrap();

    assert_eq!(sequential.wheels, parallel.wheels);
    assert_eq!(sequential.report.digest, parallel.report.digest);
    assert_eq!(sequential.search.tracks, parallel.search.tracks);
}

#[test]
fn test_run_configured_from_toml() {
    let anchors = ANCHORS
        .iter()
        .map(|(start, end, text)| {
            format!("{{ start = {start}, end = {end}, plaintext = \"{text}\" }}")
        })
        .collect::<Vec<_>>()
        .join(", ");
    let toml = format!(
        r#"
        unfilled_slot_tolerance = 8

        [puzzle]
        ciphertext = "{CIPHERTEXT}"
        expected_length = 97
        anchors = [{anchors}]
        "#
    );

    let config = SearchConfig::from_toml_str(&toml).unwrap();
    let outcome = run_configured(&config).unwrap();
    assert_eq!(outcome.derived.segment(21, 24), "EAST");
    assert_eq!(outcome.derived.segment(63, 68), "BERLIN");
}

#[test]
fn test_run_configured_needs_puzzle() {
    let err = run_configured(&SearchConfig::new()).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_run_configured_surfaces_length_mismatch() {
    let mut config = SearchConfig::new();
    config.puzzle = Some(PuzzleConfig {
        ciphertext: CIPHERTEXT[..96].to_string(),
        expected_length: Some(97),
        anchors: vec![SpanConfig {
            start: 21,
            end: 24,
            plaintext: "EAST".to_string(),
        }],
        tail: Vec::new(),
    });

    let err = run_configured(&config).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Puzzle(WheelforgeError::LengthMismatch { expected: 97, actual: 96, .. })
    ));
}
