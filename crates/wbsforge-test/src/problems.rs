//! Staffing problem fixtures.
//!
//! # Example
//!
//! ```
//! use wbsforge_test::problems::{problem, two_by_two};
//!
//! let problem = two_by_two();
//! assert_eq!(problem.variable_count(), 4);
//!
//! let wide = wbsforge_test::problems::problem(&["alice"], &[("apollo", 0.5), ("gemini", 0.5)]);
//! assert_eq!(wide.total_fte(), 1.0);
//! ```

use std::collections::BTreeMap;

use wbsforge_core::{Eligibility, Employee, Project, StaffingProblem};

/// Builds an unconstrained problem from identifiers and FTE targets.
///
/// # Panics
///
/// Panics if the identifiers are not unique or a target is invalid.
pub fn problem(employees: &[&str], projects: &[(&str, f64)]) -> StaffingProblem {
    StaffingProblem::new(
        employees.iter().map(|id| Employee::new(*id)).collect(),
        projects
            .iter()
            .map(|(id, fte)| Project::new(*id, *fte))
            .collect(),
        BTreeMap::new(),
    )
    .expect("fixture problem must be valid")
}

/// Two employees, two projects of 1.0 FTE each. A perfect split exists.
pub fn two_by_two() -> StaffingProblem {
    problem(&["alice", "bob"], &[("apollo", 1.0), ("gemini", 1.0)])
}

/// One employee facing 2.0 FTE of demand. Triggers the mismatch warning.
pub fn solo_employee() -> StaffingProblem {
    problem(&["alice"], &[("apollo", 1.0), ("gemini", 1.0)])
}

/// Like [`two_by_two`], but alice may give apollo at most 0.25 and bob
/// must give gemini at least 0.5.
pub fn capped() -> StaffingProblem {
    let mut eligibility = BTreeMap::new();
    eligibility.insert(
        "alice".to_string(),
        Eligibility::overrides([("apollo", 0.0, 0.25)]),
    );
    eligibility.insert(
        "bob".to_string(),
        Eligibility::overrides([("gemini", 0.5, 2.0)]),
    );

    StaffingProblem::new(
        vec![Employee::new("alice"), Employee::new("bob")],
        vec![Project::new("apollo", 1.0), Project::new("gemini", 1.0)],
        eligibility,
    )
    .expect("fixture problem must be valid")
}
