//! Shared test fixtures for WheelForge crates.
//!
//! This crate provides puzzle data and pure helper functions for testing.
//! It depends only on `wheelforge-core` so the solver can use it as a
//! dev-dependency without a cycle.
//!
//! - [`puzzle`] - the synthetic 97-letter puzzle with its four anchors
//! - [`random`] - seeded random wheels and plaintext
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! wheelforge-test = { workspace = true }
//! ```
//!
//! ```ignore
//! use wheelforge_test::puzzle::{puzzle_with_anchors, ACCEPTED_PERIOD};
//! use wheelforge_test::random::random_wheels;
//! ```

pub mod puzzle;
pub mod random;

pub use puzzle::{
    accepted_configurations, anchor_spans, puzzle_with_anchors, puzzle_with_full_plaintext,
    ACCEPTED_PERIOD, CIPHERTEXT, PLAINTEXT,
};
pub use random::{random_plaintext, random_wheels};
