//! Tests for the penalty model.

use crate::penalty::{load_term, overtime_surcharge, PenaltyBreakdown, PenaltyModel};
use crate::AssignmentMatrix;

// Deterministic pseudo-random points in [lo, hi).
fn sample_points(dimension: usize, count: usize, lo: f64, hi: f64) -> Vec<Vec<f64>> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (state >> 11) as f64 / (1u64 << 53) as f64
    };
    (0..count)
        .map(|_| (0..dimension).map(|_| lo + (hi - lo) * next()).collect())
        .collect()
}

#[test]
fn test_penalty_is_non_negative() {
    let model = PenaltyModel::new(3, vec![1.0, 0.5, 1.5]);
    for point in sample_points(model.dimension(), 200, -1.0, 2.5) {
        assert!(model.evaluate(&point) >= 0.0, "negative penalty at {:?}", point);
    }
}

#[test]
fn test_penalty_is_deterministic() {
    let model = PenaltyModel::new(4, vec![0.75, 1.25, 2.0]);
    for point in sample_points(model.dimension(), 20, 0.0, 2.0) {
        let first = model.evaluate(&point);
        for _ in 0..5 {
            assert_eq!(model.evaluate(&point).to_bits(), first.to_bits());
        }
    }
}

#[test]
fn test_balanced_assignment_has_zero_penalty() {
    // Rows sum to 1.0 and columns sum to their targets.
    let model = PenaltyModel::new(2, vec![1.5, 0.5]);
    let point = [0.75, 0.25, 0.75, 0.25];
    assert_eq!(model.evaluate(&point), 0.0);

    let matrix = AssignmentMatrix::from_flat(2, 2, point.to_vec()).unwrap();
    assert_eq!(model.evaluate_matrix(&matrix), 0.0);
}

#[test]
fn test_zero_point_penalty() {
    // Every employee at load 0 and every project starved.
    let model = PenaltyModel::new(2, vec![1.0, 0.5]);
    let breakdown = model.breakdown(&[0.0; 4]);
    assert_eq!(breakdown.employee, 2.0);
    assert_eq!(breakdown.overtime, 0.0);
    assert_eq!(breakdown.project, 1.25);
    assert_eq!(model.evaluate(&[0.0; 4]), 3.25);
}

#[test]
fn test_no_surcharge_up_to_double_load() {
    let model = PenaltyModel::new(1, vec![2.0]);
    let breakdown = model.breakdown(&[2.0]);
    assert_eq!(breakdown.employee, 1.0);
    assert_eq!(breakdown.overtime, 0.0);
    assert_eq!(breakdown.project, 0.0);

    assert_eq!(overtime_surcharge(1.99), 0.0);
    assert_eq!(overtime_surcharge(0.0), 0.0);
}

#[test]
fn test_surcharge_compounds_on_base_term() {
    // load 3.0: term = 4.0, surcharge = 3.0 on top
    let model = PenaltyModel::new(1, vec![3.0]);
    let breakdown = model.breakdown(&[3.0]);
    assert_eq!(breakdown.employee, 4.0);
    assert_eq!(breakdown.overtime, 3.0);
    assert_eq!(breakdown.project, 0.0);
    assert_eq!(model.evaluate(&[3.0]), 7.0);

    let term = load_term(2.5);
    assert_eq!(overtime_surcharge(2.5), term - 1.0);
}

#[test]
fn test_surcharge_spans_split_rows() {
    // One employee spread over two projects with a total load of 2.5.
    let model = PenaltyModel::new(1, vec![1.25, 1.25]);
    let breakdown = model.breakdown(&[1.25, 1.25]);
    assert_eq!(breakdown.employee, 2.25);
    assert_eq!(breakdown.overtime, 1.25);
    assert_eq!(breakdown.project, 0.0);
}

#[test]
fn test_negative_load_triggers_surcharge() {
    // load -0.5: term = 2.25, surcharge = 1.25
    assert_eq!(overtime_surcharge(-0.5), 1.25);

    let model = PenaltyModel::new(1, vec![0.0]);
    let breakdown = model.breakdown(&[-0.5]);
    assert_eq!(breakdown.overtime, 1.25);
    assert_eq!(breakdown.total(), 2.25 + 1.25 + 0.25);
}

#[test]
fn test_empty_dimensions() {
    let no_employees = PenaltyModel::new(0, vec![1.0, 0.5]);
    assert_eq!(no_employees.evaluate(&[]), 1.25);

    let no_projects = PenaltyModel::new(3, vec![]);
    assert_eq!(no_projects.evaluate(&[]), 3.0);
}

#[test]
#[should_panic(expected = "model expects 2x2")]
fn test_wrong_dimension_panics() {
    PenaltyModel::new(2, vec![1.0, 1.0]).evaluate(&[0.0; 3]);
}

#[test]
fn test_gradient_matches_finite_differences() {
    let model = PenaltyModel::new(3, vec![1.0, 0.5, 1.5]);
    let h = 1e-6;
    for point in sample_points(model.dimension(), 10, 0.0, 0.6) {
        let mut grad = vec![0.0; point.len()];
        model.gradient(&point, &mut grad);

        for i in 0..point.len() {
            let mut plus = point.clone();
            let mut minus = point.clone();
            plus[i] += h;
            minus[i] -= h;
            let numeric = (model.evaluate(&plus) - model.evaluate(&minus)) / (2.0 * h);
            assert!(
                (numeric - grad[i]).abs() < 1e-5,
                "component {}: analytic {} vs numeric {}",
                i,
                grad[i],
                numeric
            );
        }
    }
}

#[test]
fn test_gradient_doubles_past_overtime_kink() {
    let model = PenaltyModel::new(1, vec![3.0]);
    let mut grad = [0.0];
    model.gradient(&[3.0], &mut grad);
    // row slope 2 * (3 - 1) = 4, doubled to 8; column slope 0
    assert_eq!(grad[0], 8.0);
}

#[test]
fn test_breakdown_display() {
    let breakdown = PenaltyBreakdown {
        employee: 1.0,
        overtime: 0.5,
        project: 0.25,
    };
    assert_eq!(
        breakdown.to_string(),
        "1.7500 (employee 1.0000, overtime 0.5000, project 0.2500)"
    );
}
