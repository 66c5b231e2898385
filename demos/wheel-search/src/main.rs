//! Wheel Search Example
//!
//! Reads a puzzle and a search configuration, searches every track for its
//! best wheel, then prints the ranked wheels and the derived plaintext.
//!
//! ```text
//! cargo run -p wheel-search -- [puzzle.toml] [search.toml]
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use wheelforge::prelude::*;
use wheelforge::{placeholder_preview, ConfigError, PuzzleConfig};

fn demo_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(name)
}

/// Loads `path`, falling back to defaults only when the file does not exist.
fn load_search_config(path: &Path) -> Result<SearchConfig, ConfigError> {
    match SearchConfig::load(path) {
        Err(ConfigError::Io(err)) if err.kind() == ErrorKind::NotFound => {
            Ok(SearchConfig::default())
        }
        other => other,
    }
}

fn main() -> Result<(), ConfigError> {
    wheelforge::init_console();

    let mut args = std::env::args().skip(1);
    let puzzle_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| demo_file("puzzle.toml"));
    let search_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| demo_file("search.toml"));

    let puzzle = PuzzleConfig::from_toml_file(&puzzle_path)?.to_puzzle()?;
    let config = load_search_config(&search_path)?;

    println!(
        "Puzzle: {} symbols, {} known positions",
        puzzle.ciphertext().len(),
        puzzle.constraints().len()
    );
    println!(
        "Periods {}..={}\n",
        config.period_range.min, config.period_range.max
    );

    let outcome = run_search(&puzzle, &config)?;

    println!("\nRanked wheels:");
    for result in &outcome.search.tracks {
        println!(
            "  {} ({} accepted of {})",
            result.track, result.accepted, result.evaluated
        );
        for candidate in &result.ranked {
            println!(
                "    #{} {:<22} {} ({}/{} slots)",
                candidate.rank,
                candidate.configuration.to_string(),
                candidate.wheel.key_string(),
                candidate.coverage.known,
                candidate.coverage.total,
            );
        }
        if !result.rejections.is_empty() {
            println!(
                "    rejected: {} slot conflicts, {} option-a violations",
                result.rejections.slot_conflicts, result.rejections.option_a_violations
            );
        }
    }

    let coverage = outcome.derived.coverage();
    println!(
        "\nDerived plaintext ({}/{} determined):",
        coverage.known, coverage.total
    );
    println!("  {}", outcome.derived);

    let preview = placeholder_preview(puzzle.ciphertext(), &outcome.wheels);
    println!(
        "\nPlaceholder preview (residue 0 at {} positions, not a solution):",
        preview.placeholder_indices.len()
    );
    println!("  {}", preview.text);

    println!("\nsha256 {}", outcome.report.digest);
    Ok(())
}
