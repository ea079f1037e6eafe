//! Optimization driver for staffing problems.
//!
//! Turns a [`StaffingProblem`] into a bounded minimization over the flat
//! assignment vector, runs a minimizer from the all-zero assignment and
//! reshapes the result into a [`Solution`].
//!
//! Logging levels:
//! - **INFO**: Solve start/end, problem scale
//! - **WARN**: Instance diagnostics, non-converged runs

use tokio::sync::mpsc;
use tracing::{info, warn};
use wbsforge_config::SolverConfig;
use wbsforge_core::{AssignmentMatrix, Diagnostic, StaffingProblem};

use crate::builder::MinimizerBuilder;
use crate::error::Result;
use crate::minimizer::{BoundedMinimizer, MinimizeStatus};
use crate::statistics::SolverStatistics;

/// Outcome of optimizing a staffing problem.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Final allocations, rows are employees and columns projects.
    pub assignment: AssignmentMatrix,
    /// Penalty at `assignment`.
    pub penalty: f64,
    pub status: MinimizeStatus,
    pub statistics: SolverStatistics,
    /// Observations about the instance, independent of the run.
    pub diagnostics: Vec<Diagnostic>,
}

impl Solution {
    /// Returns true if the minimizer stopped at a local minimum.
    pub fn is_converged(&self) -> bool {
        self.status.is_success()
    }

    pub fn iterations(&self) -> u64 {
        self.statistics.step_count
    }

    pub fn evaluations(&self) -> u64 {
        self.statistics.score_calculation_count
    }

    /// Total allocation of one employee.
    pub fn employee_load(&self, employee: usize) -> f64 {
        self.assignment.row_sum(employee)
    }

    /// Total allocation received by one project.
    pub fn project_received(&self, project: usize) -> f64 {
        self.assignment.column_sum(project)
    }
}

/// Optimizes a problem with default settings.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use wbsforge_core::{Employee, Project, StaffingProblem};
///
/// let problem = StaffingProblem::new(
///     vec![Employee::new("alice"), Employee::new("bob")],
///     vec![Project::new("apollo", 1.0), Project::new("gemini", 1.0)],
///     BTreeMap::new(),
/// )
/// .unwrap();
///
/// let solution = wbsforge_solver::optimize(&problem).unwrap();
/// assert!(solution.penalty < 1e-6);
/// ```
pub fn optimize(problem: &StaffingProblem) -> Result<Solution> {
    optimize_with_config(problem, &SolverConfig::default())
}

/// Optimizes a problem with a minimizer built from `config`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn optimize_with_config(problem: &StaffingProblem, config: &SolverConfig) -> Result<Solution> {
    let mut minimizer = MinimizerBuilder::build(config)?;
    optimize_with(problem, &mut minimizer)
}

/// Optimizes a problem with a caller-supplied minimizer.
pub fn optimize_with<M: BoundedMinimizer>(
    problem: &StaffingProblem,
    minimizer: &mut M,
) -> Result<Solution> {
    let diagnostics = problem.diagnostics();
    for diagnostic in &diagnostics {
        warn!(event = "diagnostic", "{}", diagnostic);
    }

    let rows = problem.employee_count();
    let cols = problem.project_count();
    info!(
        event = "solve_start",
        employee_count = rows,
        project_count = cols,
        variable_count = problem.variable_count(),
        minimizer = minimizer.minimizer_type_name(),
    );

    let model = problem.penalty_model();
    let bounds = problem.bounds();
    let result = minimizer.minimize(&model, bounds.as_slice(), vec![0.0; rows * cols])?;

    if !result.success() {
        warn!(event = "not_converged", status = %result.status);
    }
    info!(
        event = "solve_end",
        penalty = result.fun,
        iterations = result.statistics.step_count,
        evaluations = result.statistics.score_calculation_count,
        status = %result.status,
    );

    Ok(Solution {
        assignment: AssignmentMatrix::from_flat(rows, cols, result.x)?,
        penalty: result.fun,
        status: result.status,
        statistics: result.statistics,
        diagnostics,
    })
}

/// Optimizes a problem, streaming each improved assignment on `sender`.
///
/// Sends stop silently once the receiver is dropped.
pub fn optimize_with_channel(
    problem: &StaffingProblem,
    config: &SolverConfig,
    sender: mpsc::UnboundedSender<(AssignmentMatrix, f64)>,
) -> Result<Solution> {
    let rows = problem.employee_count();
    let cols = problem.project_count();

    let stream = move |point: &[f64], score: f64| {
        if let Ok(matrix) = AssignmentMatrix::from_flat(rows, cols, point.to_vec()) {
            let _ = sender.send((matrix, score));
        }
    };
    let mut minimizer =
        MinimizerBuilder::build(config)?.with_best_solution_callback(Box::new(stream));
    optimize_with(problem, &mut minimizer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolverError;
    use crate::minimizer::ProjectedGradientMinimizer;
    use crate::termination::StepCountTermination;
    use wbsforge_config::MinimizerConfig;
    use wbsforge_test::{assert_close, capped, problem, solo_employee, two_by_two};

    #[test]
    fn test_balanced_problem_reaches_zero() {
        let solution = optimize(&two_by_two()).unwrap();

        assert!(solution.is_converged(), "{}", solution.status);
        assert!(solution.penalty < 1e-6, "penalty {}", solution.penalty);
        assert!(solution.diagnostics.is_empty());
        for i in 0..2 {
            assert_close(solution.employee_load(i), 1.0, 1e-3);
            assert_close(solution.project_received(i), 1.0, 1e-3);
        }
    }

    #[test]
    fn test_overloaded_employee_splits_evenly() {
        let solution = optimize(&solo_employee()).unwrap();

        assert_eq!(solution.diagnostics.len(), 1);
        assert_eq!(
            solution.diagnostics[0].to_string(),
            "2.00 ftes for 1 employees"
        );
        assert!(solution.penalty > 0.0);
        assert_close(solution.penalty, 1.0 / 3.0, 1e-6);
        assert_close(solution.assignment.get(0, 0), 2.0 / 3.0, 1e-3);
        assert_close(solution.assignment.get(0, 1), 2.0 / 3.0, 1e-3);
    }

    #[test]
    fn test_overrides_are_respected() {
        let instance = capped();
        let solution = optimize(&instance).unwrap();

        assert!(solution.assignment.get(0, 0) <= 0.25 + 1e-12);
        assert!(solution.assignment.get(1, 1) >= 0.5 - 1e-12);
        assert!(instance
            .bounds()
            .contains(solution.assignment.as_slice(), 1e-12));
        assert!(solution.penalty > 0.0);
    }

    #[test]
    fn test_solution_shape_follows_problem() {
        let team = problem(
            &["alice", "bob", "carol"],
            &[("apollo", 1.5), ("gemini", 0.5), ("mercury", 1.0)],
        );
        let solution = optimize(&team).unwrap();

        assert_eq!(solution.assignment.rows(), 3);
        assert_eq!(solution.assignment.cols(), 3);
        assert!(team.bounds().contains(solution.assignment.as_slice(), 1e-12));
        assert_close(
            solution.penalty,
            team.penalty_model().evaluate_matrix(&solution.assignment),
            1e-12,
        );
    }

    #[test]
    fn test_empty_problem() {
        let solution = optimize(&problem(&[], &[])).unwrap();
        assert_eq!(solution.penalty, 0.0);
        assert_eq!(solution.iterations(), 0);
        assert!(solution.is_converged());
    }

    #[test]
    fn test_custom_minimizer_status_is_surfaced() {
        let mut minimizer = ProjectedGradientMinimizer::new(StepCountTermination::new(1));
        let solution = optimize_with(&two_by_two(), &mut minimizer).unwrap();

        assert_eq!(solution.iterations(), 1);
        assert!(solution.evaluations() >= 2);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SolverConfig::new().with_minimizer(MinimizerConfig {
            max_line_search_steps: Some(0),
            ..MinimizerConfig::default()
        });
        assert!(matches!(
            optimize_with_config(&two_by_two(), &config),
            Err(SolverError::Config(_))
        ));
    }

    #[test]
    fn test_channel_streams_improvements() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let solution =
            optimize_with_channel(&two_by_two(), &SolverConfig::default(), sender).unwrap();

        let mut received = Vec::new();
        while let Ok(update) = receiver.try_recv() {
            received.push(update);
        }

        assert!(!received.is_empty());
        assert_eq!(received[0].1, 4.0);
        assert!(received.windows(2).all(|w| w[1].1 < w[0].1));
        let (last, penalty) = received.last().unwrap();
        assert_eq!(last, &solution.assignment);
        assert_eq!(*penalty, solution.penalty);
    }

    #[test]
    fn test_dropped_receiver_does_not_fail() {
        let (sender, receiver) = mpsc::unbounded_channel();
        drop(receiver);
        let solution = optimize_with_channel(&solo_employee(), &SolverConfig::default(), sender);
        assert!(solution.is_ok());
    }
}
