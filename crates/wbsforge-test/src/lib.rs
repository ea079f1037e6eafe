//! Shared test fixtures for WBSForge crates.
//!
//! This crate provides ready-made staffing instances for testing.
//! It does NOT depend on `wbsforge-solver` to avoid circular dependencies.
//!
//! - [`problems`] - Validated `StaffingProblem` instances
//! - [`settings`] - The same instances as parsed `Settings`
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! wbsforge-test = { workspace = true }
//! ```

pub mod problems;
pub mod settings;

pub use problems::{capped, problem, solo_employee, two_by_two};
pub use settings::{two_by_two_settings, TWO_BY_TWO_YAML};

/// Asserts that two floats differ by at most `tolerance`.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} within {} of {}",
        actual,
        tolerance,
        expected
    );
}
