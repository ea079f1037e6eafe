//! Objective functions for bounded minimization.

use std::fmt::{self, Debug};

use rayon::prelude::*;
use wbsforge_core::PenaltyModel;

/// Relative step for central differences.
const FD_STEP: f64 = 1.0e-7;

/// A scalar function of a flat vector.
///
/// Implementations must be pure: the same point always gives the same
/// value. `Sync` is required because the default gradient probes the
/// function from several threads.
pub trait Objective: Send + Sync {
    /// Number of variables.
    fn dimension(&self) -> usize;

    /// Returns the value at `point`.
    fn value(&self, point: &[f64]) -> f64;

    /// Writes the gradient at `point` into `grad`.
    ///
    /// Defaults to parallel central differences.
    fn gradient(&self, point: &[f64], grad: &mut [f64]) {
        central_difference_gradient(self, point, grad);
    }
}

/// Estimates a gradient by central differences, one variable per task.
pub fn central_difference_gradient<O: Objective + ?Sized>(
    objective: &O,
    point: &[f64],
    grad: &mut [f64],
) {
    grad.par_iter_mut().enumerate().for_each(|(i, g)| {
        let h = FD_STEP * point[i].abs().max(1.0);
        let mut probe = point.to_vec();
        probe[i] = point[i] + h;
        let forward = objective.value(&probe);
        probe[i] = point[i] - h;
        let backward = objective.value(&probe);
        *g = (forward - backward) / (2.0 * h);
    });
}

impl Objective for PenaltyModel {
    fn dimension(&self) -> usize {
        PenaltyModel::dimension(self)
    }

    fn value(&self, point: &[f64]) -> f64 {
        self.evaluate(point)
    }

    fn gradient(&self, point: &[f64], grad: &mut [f64]) {
        PenaltyModel::gradient(self, point, grad);
    }
}

/// Adapts a closure into an [`Objective`] with a numeric gradient.
///
/// # Example
///
/// ```
/// use wbsforge_solver::objective::{FnObjective, Objective};
///
/// let sphere = FnObjective::new(2, |x: &[f64]| x[0] * x[0] + x[1] * x[1]);
/// assert_eq!(sphere.value(&[3.0, 4.0]), 25.0);
/// ```
pub struct FnObjective<F> {
    dimension: usize,
    function: F,
}

impl<F> FnObjective<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    pub fn new(dimension: usize, function: F) -> Self {
        Self {
            dimension,
            function,
        }
    }
}

impl<F> Debug for FnObjective<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnObjective")
            .field("dimension", &self.dimension)
            .finish()
    }
}

impl<F> Objective for FnObjective<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn value(&self, point: &[f64]) -> f64 {
        (self.function)(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_gradient_of_quadratic() {
        let objective = FnObjective::new(3, |x: &[f64]| {
            x.iter().enumerate().map(|(i, v)| (i as f64 + 1.0) * v * v).sum()
        });
        let mut grad = vec![0.0; 3];
        objective.gradient(&[1.0, -2.0, 0.5], &mut grad);

        let expected = [2.0, -8.0, 3.0];
        for (g, e) in grad.iter().zip(expected) {
            assert!((g - e).abs() < 1e-5, "{} vs {}", g, e);
        }
    }

    #[test]
    fn test_penalty_model_uses_analytic_gradient() {
        let model = PenaltyModel::new(2, vec![1.0, 1.0]);
        let point = [0.2, 0.1, 0.4, 0.3];

        let mut analytic = vec![0.0; 4];
        Objective::gradient(&model, &point, &mut analytic);
        let mut numeric = vec![0.0; 4];
        central_difference_gradient(&model, &point, &mut numeric);

        for (a, n) in analytic.iter().zip(&numeric) {
            assert!((a - n).abs() < 1e-5);
        }
        assert_eq!(Objective::dimension(&model), 4);
        assert_eq!(model.value(&point), model.evaluate(&point));
    }
}
