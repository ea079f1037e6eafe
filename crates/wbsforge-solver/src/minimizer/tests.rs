//! Tests for bounded minimizers.

use std::sync::{Arc, Mutex};

use wbsforge_core::{CellBound, PenaltyModel};

use super::*;
use crate::objective::FnObjective;
use crate::termination::{OrTermination, ScoreCalculationCountTermination, StepCountTermination};

fn default_minimizer() -> ProjectedGradientMinimizer<StepCountTermination> {
    ProjectedGradientMinimizer::new(StepCountTermination::new(15_000))
}

#[test]
fn test_bounded_quadratic_hits_the_box() {
    // minimize (x - 3)^2 + (y + 1)^2 on [0, 2] x [0, 2] -> (2, 0)
    let objective = FnObjective::new(2, |x: &[f64]| (x[0] - 3.0).powi(2) + (x[1] + 1.0).powi(2));
    let bounds = [CellBound::DEFAULT; 2];

    let result = default_minimizer()
        .minimize(&objective, &bounds, vec![1.0, 1.0])
        .unwrap();

    assert!(result.success(), "{}", result.status);
    assert!((result.x[0] - 2.0).abs() < 1e-6);
    assert!(result.x[1].abs() < 1e-6);
    assert!((result.fun - 2.0).abs() < 1e-6);
}

#[test]
fn test_interior_minimum_of_penalty() {
    // One employee, two projects of 1.0 FTE: optimum at 2/3 each, penalty 1/3.
    let model = PenaltyModel::new(1, vec![1.0, 1.0]);
    let result = default_minimizer()
        .minimize(&model, &[CellBound::DEFAULT; 2], vec![0.0; 2])
        .unwrap();

    assert!(result.success(), "{}", result.status);
    assert!((result.fun - 1.0 / 3.0).abs() < 1e-6, "penalty {}", result.fun);
    for value in &result.x {
        assert!((value - 2.0 / 3.0).abs() < 1e-3, "value {}", value);
    }
}

#[test]
fn test_starting_point_is_projected() {
    let objective = FnObjective::new(1, |x: &[f64]| x[0] * x[0]);
    let result = default_minimizer()
        .minimize(&objective, &[CellBound::new(0.5, 1.0)], vec![-4.0])
        .unwrap();

    assert!(result.success());
    assert_eq!(result.x, vec![0.5]);
    assert_eq!(result.fun, 0.25);
}

#[test]
fn test_empty_problem_converges_immediately() {
    let model = PenaltyModel::new(2, vec![]);
    let result = default_minimizer().minimize(&model, &[], vec![]).unwrap();

    assert_eq!(result.status, MinimizeStatus::ProjectedGradientConverged);
    assert_eq!(result.fun, 2.0);
    assert_eq!(result.statistics.step_count, 0);
    assert_eq!(result.statistics.score_calculation_count, 1);
}

#[test]
fn test_termination_stops_early_within_bounds() {
    let model = PenaltyModel::new(3, vec![1.0, 1.0, 1.0]);
    let bounds = [CellBound::DEFAULT; 9];
    let mut minimizer = ProjectedGradientMinimizer::new(OrTermination::new((
        StepCountTermination::new(1),
        ScoreCalculationCountTermination::new(1_000),
    )));

    let result = minimizer.minimize(&model, &bounds, vec![0.0; 9]).unwrap();

    assert_eq!(result.status, MinimizeStatus::TerminationReached);
    assert!(!result.success());
    assert_eq!(result.statistics.step_count, 1);
    assert!(result.x.iter().all(|v| CellBound::DEFAULT.contains(*v)));
    assert!(result.fun < model.evaluate(&[0.0; 9]));
}

#[test]
fn test_non_finite_objective_is_reported() {
    let objective = FnObjective::new(1, |_: &[f64]| f64::NAN);
    let result = default_minimizer()
        .minimize(&objective, &[CellBound::DEFAULT], vec![0.0])
        .unwrap();

    assert_eq!(result.status, MinimizeStatus::NonFiniteObjective);
    assert!(!result.success());
}

#[test]
fn test_input_validation() {
    let model = PenaltyModel::new(1, vec![1.0, 1.0]);

    let err = default_minimizer()
        .minimize(&model, &[CellBound::DEFAULT], vec![0.0; 2])
        .unwrap_err();
    assert!(matches!(
        err,
        SolverError::DimensionMismatch {
            what: "bounds",
            expected: 2,
            actual: 1
        }
    ));

    let err = default_minimizer()
        .minimize(&model, &[CellBound::DEFAULT; 2], vec![0.0])
        .unwrap_err();
    assert!(matches!(
        err,
        SolverError::DimensionMismatch {
            what: "starting values",
            ..
        }
    ));

    let err = default_minimizer()
        .minimize(
            &model,
            &[CellBound::DEFAULT, CellBound::new(1.0, 0.0)],
            vec![0.0; 2],
        )
        .unwrap_err();
    assert!(matches!(err, SolverError::InvalidBounds { index: 1, .. }));
}

#[test]
fn test_callback_sees_decreasing_penalties() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let model = PenaltyModel::new(2, vec![1.0, 1.0]);

    let mut minimizer = default_minimizer().with_best_solution_callback(Box::new(
        move |point: &[f64], score: f64| {
            assert_eq!(point.len(), 4);
            sink.lock().unwrap().push(score);
        },
    ));
    let result = minimizer
        .minimize(&model, &[CellBound::DEFAULT; 4], vec![0.0; 4])
        .unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.first(), Some(&4.0));
    assert!(seen.windows(2).all(|w| w[1] < w[0]));
    assert_eq!(seen.last(), Some(&result.fun));
    assert_eq!(result.statistics.improvement_count(), seen.len());
}

#[test]
fn test_status_messages() {
    assert!(MinimizeStatus::ProjectedGradientConverged.is_success());
    assert!(MinimizeStatus::RelativeReductionConverged.is_success());
    assert!(!MinimizeStatus::LineSearchFailed.is_success());
    assert_eq!(
        MinimizeStatus::TerminationReached.to_string(),
        "stopped: termination limit reached"
    );
}
