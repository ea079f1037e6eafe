//! WBSForge Core - the staffing model
//!
//! This crate provides the mathematical model behind WBSForge:
//! - Domain types for employees, projects and eligibility overrides
//! - The row-major assignment and bounds matrices
//! - The penalty function scoring a candidate assignment
//! - Non-fatal diagnostics about the problem instance

pub mod bounds;
pub mod diagnostic;
pub mod domain;
pub mod error;
pub mod matrix;
pub mod penalty;

#[cfg(test)]
mod penalty_tests;

pub use bounds::{BoundsMatrix, CellBound};
pub use diagnostic::{Diagnostic, FTE_MISMATCH_THRESHOLD};
pub use domain::{Eligibility, Employee, Project, StaffingProblem};
pub use error::{Result, WbsError};
pub use matrix::AssignmentMatrix;
pub use penalty::{PenaltyBreakdown, PenaltyModel};
