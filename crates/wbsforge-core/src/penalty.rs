//! Penalty (objective) function for candidate assignments.
//!
//! The penalty is a sum of squared deviations:
//! - per employee, `(1 - load)^2` around a target load of 1.0
//! - an overtime surcharge of `term - 1` whenever that term exceeds 1
//! - per project, `(received - fte)^2`
//!
//! It carries no hard constraints; feasibility lives entirely in the
//! bounds matrix, so the surface stays smooth enough for gradient methods.

use std::fmt;

use crate::matrix::AssignmentMatrix;

/// The penalty split by source.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PenaltyBreakdown {
    /// Sum of `(1 - load)^2` over employees.
    pub employee: f64,
    /// Sum of overtime surcharges over employees.
    pub overtime: f64,
    /// Sum of `(received - fte)^2` over projects.
    pub project: f64,
}

impl PenaltyBreakdown {
    pub fn total(&self) -> f64 {
        (self.employee + self.overtime) + self.project
    }
}

impl fmt::Display for PenaltyBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.4} (employee {:.4}, overtime {:.4}, project {:.4})",
            self.total(),
            self.employee,
            self.overtime,
            self.project
        )
    }
}

/// Scores a flattened N×M assignment.
///
/// Pure and deterministic: the model holds only the shape and the FTE
/// targets, so it can be shared across threads freely.
///
/// # Examples
///
/// ```
/// use wbsforge_core::PenaltyModel;
///
/// // 2 employees, 2 projects of 1.0 FTE each
/// let model = PenaltyModel::new(2, vec![1.0, 1.0]);
/// assert_eq!(model.evaluate(&[0.5, 0.5, 0.5, 0.5]), 0.0);
/// assert_eq!(model.evaluate(&[0.0; 4]), 4.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PenaltyModel {
    employee_count: usize,
    targets: Vec<f64>,
}

impl PenaltyModel {
    /// Creates a model for `employee_count` rows and one column per target.
    pub fn new(employee_count: usize, targets: Vec<f64>) -> Self {
        Self {
            employee_count,
            targets,
        }
    }

    #[inline]
    pub fn employee_count(&self) -> usize {
        self.employee_count
    }

    #[inline]
    pub fn project_count(&self) -> usize {
        self.targets.len()
    }

    /// Length of the flat vector this model accepts.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.employee_count * self.targets.len()
    }

    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    /// Returns the scalar penalty for a flat row-major point.
    ///
    /// # Panics
    ///
    /// Panics if `point.len()` differs from [`dimension`](Self::dimension).
    pub fn evaluate(&self, point: &[f64]) -> f64 {
        self.breakdown(point).total()
    }

    /// Returns the penalty of a matrix.
    pub fn evaluate_matrix(&self, matrix: &AssignmentMatrix) -> f64 {
        self.evaluate(matrix.as_slice())
    }

    /// Returns the penalty split into its employee, overtime and project parts.
    pub fn breakdown(&self, point: &[f64]) -> PenaltyBreakdown {
        self.check_dimension(point.len());
        let mut breakdown = PenaltyBreakdown::default();

        for load in self.loads(point) {
            breakdown.employee += load_term(load);
        }
        for load in self.loads(point) {
            breakdown.overtime += overtime_surcharge(load);
        }
        for (received, target) in self.received(point).zip(&self.targets) {
            breakdown.project += (received - target).powi(2);
        }

        breakdown
    }

    /// Writes the gradient of the penalty at `point` into `grad`.
    ///
    /// The overtime surcharge has a kink where its term crosses 1; past it
    /// the employee derivative doubles.
    pub fn gradient(&self, point: &[f64], grad: &mut [f64]) {
        self.check_dimension(point.len());
        assert_eq!(grad.len(), point.len(), "gradient buffer length mismatch");
        let cols = self.targets.len();

        let column_slopes: Vec<f64> = self
            .received(point)
            .zip(&self.targets)
            .map(|(received, target)| 2.0 * (received - target))
            .collect();

        for (row, load) in self.loads(point).enumerate() {
            let mut row_slope = 2.0 * (load - 1.0);
            if load_term(load) > 1.0 {
                row_slope *= 2.0;
            }
            let out = &mut grad[row * cols..(row + 1) * cols];
            for (g, col_slope) in out.iter_mut().zip(&column_slopes) {
                *g = row_slope + col_slope;
            }
        }
    }

    // Row sums of a flat point.
    fn loads<'a>(&'a self, point: &'a [f64]) -> impl Iterator<Item = f64> + 'a {
        let cols = self.targets.len();
        (0..self.employee_count).map(move |row| {
            point[row * cols..(row + 1) * cols]
                .iter()
                .sum::<f64>()
        })
    }

    // Column sums of a flat point.
    fn received<'a>(&'a self, point: &'a [f64]) -> impl Iterator<Item = f64> + 'a {
        let cols = self.targets.len();
        (0..cols).map(move |col| {
            (0..self.employee_count)
                .map(|row| point[row * cols + col])
                .sum::<f64>()
        })
    }

    fn check_dimension(&self, len: usize) {
        assert_eq!(
            len,
            self.dimension(),
            "point has {} values, model expects {}x{}",
            len,
            self.employee_count,
            self.targets.len()
        );
    }
}

/// Base employee term `(1 - load)^2`.
#[inline]
pub fn load_term(load: f64) -> f64 {
    (1.0 - load).powi(2)
}

/// Extra penalty for an employee load: `term - 1` when `term > 1`, else 0.
///
/// The condition is kept literal, so a negative load (reachable only with
/// negative bound overrides) also triggers it.
///
/// # Examples
///
/// ```
/// use wbsforge_core::penalty::overtime_surcharge;
///
/// assert_eq!(overtime_surcharge(1.5), 0.0);
/// assert_eq!(overtime_surcharge(2.0), 0.0);
/// assert_eq!(overtime_surcharge(3.0), 3.0);
/// ```
#[inline]
pub fn overtime_surcharge(load: f64) -> f64 {
    let term = load_term(load);
    if term > 1.0 {
        term - 1.0
    } else {
        0.0
    }
}
