//! Bounded minimizers.
//!
//! A minimizer takes an [`Objective`], one [`CellBound`] per variable and a
//! starting point, and returns a local minimum that respects the bounds.

mod projected_gradient;

use std::fmt;

use wbsforge_core::CellBound;

use crate::error::{Result, SolverError};
use crate::objective::Objective;
use crate::statistics::SolverStatistics;

pub use projected_gradient::{BestSolutionCallback, ProjectedGradientMinimizer};

/// Why a minimizer run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinimizeStatus {
    /// The projected gradient fell below tolerance.
    ProjectedGradientConverged,
    /// The relative penalty reduction of a step fell below tolerance.
    RelativeReductionConverged,
    /// A termination condition (iterations, evaluations, time, target) fired.
    TerminationReached,
    /// No sufficient decrease was found along the search direction.
    LineSearchFailed,
    /// The objective returned NaN or infinity.
    NonFiniteObjective,
}

impl MinimizeStatus {
    /// Returns true if the run stopped at a local minimum.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            MinimizeStatus::ProjectedGradientConverged
                | MinimizeStatus::RelativeReductionConverged
        )
    }

    pub fn message(&self) -> &'static str {
        match self {
            MinimizeStatus::ProjectedGradientConverged => {
                "converged: norm of projected gradient <= tolerance"
            }
            MinimizeStatus::RelativeReductionConverged => {
                "converged: relative reduction of penalty <= tolerance"
            }
            MinimizeStatus::TerminationReached => "stopped: termination limit reached",
            MinimizeStatus::LineSearchFailed => "abnormal termination in line search",
            MinimizeStatus::NonFiniteObjective => "abnormal termination: non-finite penalty",
        }
    }
}

impl fmt::Display for MinimizeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of a minimizer run.
#[derive(Debug, Clone)]
pub struct MinimizeResult {
    /// Final point, within bounds.
    pub x: Vec<f64>,
    /// Objective value at `x`.
    pub fun: f64,
    pub status: MinimizeStatus,
    pub statistics: SolverStatistics,
}

impl MinimizeResult {
    pub fn success(&self) -> bool {
        self.status.is_success()
    }
}

/// A local minimizer honoring per-variable box constraints.
pub trait BoundedMinimizer: Send {
    /// Minimizes `objective` from `x0` within `bounds`.
    ///
    /// # Errors
    ///
    /// Returns an error if `bounds` or `x0` don't match the objective's
    /// dimension, or if a bound is not finite or has `min > max`.
    fn minimize<O: Objective + ?Sized>(
        &mut self,
        objective: &O,
        bounds: &[CellBound],
        x0: Vec<f64>,
    ) -> Result<MinimizeResult>;

    /// Returns the minimizer name for logging.
    fn minimizer_type_name(&self) -> &'static str;
}

/// Validates bounds and starting point against the objective's dimension.
pub(crate) fn check_inputs(dimension: usize, bounds: &[CellBound], x0: &[f64]) -> Result<()> {
    if bounds.len() != dimension {
        return Err(SolverError::DimensionMismatch {
            what: "bounds",
            expected: dimension,
            actual: bounds.len(),
        });
    }
    if x0.len() != dimension {
        return Err(SolverError::DimensionMismatch {
            what: "starting values",
            expected: dimension,
            actual: x0.len(),
        });
    }
    if let Some((index, bound)) = bounds.iter().enumerate().find(|(_, b)| !b.is_valid()) {
        return Err(SolverError::InvalidBounds {
            index,
            min: bound.min,
            max: bound.max,
        });
    }
    Ok(())
}

/// Projects `point` onto the box in place.
pub(crate) fn project(point: &mut [f64], bounds: &[CellBound]) {
    for (x, bound) in point.iter_mut().zip(bounds) {
        *x = bound.clamp(*x);
    }
}

/// Infinity norm of the projected gradient step `P(x - g) - x`.
pub(crate) fn projected_gradient_norm(point: &[f64], grad: &[f64], bounds: &[CellBound]) -> f64 {
    point
        .iter()
        .zip(grad)
        .zip(bounds)
        .map(|((x, g), bound)| (bound.clamp(x - g) - x).abs())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests;
