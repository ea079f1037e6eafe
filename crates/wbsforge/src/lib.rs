//! WBSForge - FTE Allocation in Rust
//!
//! Spreads employees' time across projects so that everyone works about
//! one full-time equivalent and every project gets the FTE it asks for.
//!
//! # Example
//!
//! ```rust
//! use wbsforge::prelude::*;
//!
//! let settings = Settings::new()
//!     .with_employee("alice")
//!     .with_employee("bob")
//!     .with_project("apollo", 1.0)
//!     .with_project("gemini", 1.0);
//!
//! let (problem, solution) = wbsforge::solve_settings(&settings).unwrap();
//! assert_eq!(problem.variable_count(), 4);
//! assert!(solution.penalty < 1e-6);
//! ```

// Model types
pub use wbsforge_core::{
    AssignmentMatrix, BoundsMatrix, CellBound, Diagnostic, Eligibility, Employee,
    PenaltyBreakdown, PenaltyModel, Project, StaffingProblem, WbsError,
};

// Configuration
pub use wbsforge_config::{ConfigError, Settings, SolverConfig};

// Solving
pub use wbsforge_solver::{
    optimize, optimize_with, optimize_with_channel, optimize_with_config, MinimizeStatus,
    Solution, SolverError,
};

#[cfg(feature = "console")]
pub use wbsforge_console as console;

mod solver;
pub use solver::{solve_file, solve_settings, solve_settings_with_channel};

pub mod prelude {
    pub use super::{
        optimize, solve_file, solve_settings, AssignmentMatrix, CellBound, Diagnostic,
        Eligibility, Employee, Project, Settings, Solution, SolverConfig, StaffingProblem,
    };
}
