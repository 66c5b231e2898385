//! Tests for search configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        unfilled_slot_tolerance = 1
        thread_count = "auto"
        diagnostics = "detailed"
        max_ranked = 5

        [period_range]
        min = 15
        max = 19

        [families]
        mode = "fixed"
        families = ["additive", "beaufort", "subtractive", "vigenere", "additive_variant", "variant_beaufort"]
    "#;

    let config = SearchConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.unfilled_slot_tolerance, Some(1));
    assert_eq!(config.thread_count, ThreadCount::Auto);
    assert_eq!(config.diagnostics, DiagnosticsLevel::Detailed);
    assert_eq!(config.max_ranked, Some(5));
    assert_eq!(config.period_range.periods(), 15..=19);
    assert_eq!(config.families_for(1), vec![Family::Subtractive]);
    assert_eq!(config.families_for(5), vec![Family::AdditiveVariant]);
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        period_range:
          min: 10
          max: 22
        thread_count: auto
        puzzle:
          ciphertext: ABCDEFGHIJKL
          expected_length: 12
          anchors:
            - start: 0
              end: 1
              plaintext: XY
          tail:
            - start: 10
              end: 11
              plaintext: QR
    "#;

    let config = SearchConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.thread_count, ThreadCount::Auto);
    let puzzle = config.puzzle.unwrap().to_puzzle().unwrap();
    assert_eq!(puzzle.constraints().len(), 4);
    assert!(puzzle.constraints()[0].in_anchor);
    assert!(!puzzle.constraints()[3].in_anchor);
}

#[test]
fn test_thread_count_table() {
    let config = SearchConfig::from_toml_str("thread_count = { count = 4 }").unwrap();
    assert_eq!(config.thread_count, ThreadCount::Count(4));

    let err = SearchConfig::from_toml_str("thread_count = { count = 0 }").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_defaults() {
    let config = SearchConfig::from_toml_str("").unwrap();
    assert_eq!(config.period_range, PeriodRange { min: 10, max: 22 });
    assert_eq!(config.families, FamilyRequest::Search);
    assert_eq!(config.families_for(0), Family::PRIORITY.to_vec());
    assert_eq!(config.unfilled_slot_tolerance, None);
    assert_eq!(config.thread_count, ThreadCount::None);
    assert!(!config.thread_count.is_parallel());
    assert_eq!(config.diagnostics, DiagnosticsLevel::Summary);
}

#[test]
fn test_builder() {
    let config = SearchConfig::new()
        .with_period_range(17, 17)
        .with_tolerance(3)
        .with_thread_count(ThreadCount::Count(2))
        .with_diagnostics(DiagnosticsLevel::Detailed)
        .with_fixed_families([Family::Additive; TRACK_COUNT]);

    assert!(config.validate().is_ok());
    assert_eq!(config.unfilled_slot_tolerance, Some(3));
    assert!(config.thread_count.is_parallel());
    assert_eq!(config.families_for(4), vec![Family::Additive]);
}

#[test]
fn test_invalid_period_range() {
    let err = SearchConfig::from_toml_str("[period_range]\nmin = 20\nmax = 10\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = SearchConfig::from_toml_str("[period_range]\nmin = 0\nmax = 10\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_fixed_families_need_six_entries() {
    let toml = r#"
        [families]
        mode = "fixed"
        families = ["additive", "subtractive"]
    "#;
    let err = SearchConfig::from_toml_str(toml).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_puzzle_length_mismatch_surfaces() {
    let puzzle = PuzzleConfig {
        ciphertext: "ABCDE".to_string(),
        expected_length: Some(97),
        ..PuzzleConfig::default()
    };
    let err = puzzle.to_puzzle().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Puzzle(WheelforgeError::LengthMismatch { expected: 97, actual: 5, .. })
    ));
}

#[test]
fn test_puzzle_rejects_bad_symbols() {
    let puzzle = PuzzleConfig::from_toml_str("ciphertext = \"AB-CD\"").unwrap();
    assert!(matches!(
        puzzle.to_puzzle(),
        Err(ConfigError::Puzzle(WheelforgeError::InvalidInput(_)))
    ));
}
