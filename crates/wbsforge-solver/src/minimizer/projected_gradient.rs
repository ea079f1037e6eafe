//! Spectral projected gradient minimizer.
//!
//! Each iteration moves along `d = P(x - step * g) - x`, where `P` clamps
//! onto the box, and backtracks until the Armijo condition holds. The step
//! length is the Barzilai-Borwein ratio `s's / s'y` of the last move, which
//! gives quasi-Newton-like progress on quadratic surfaces without storing
//! curvature pairs.

use std::fmt::{self, Debug};
use std::time::{Duration, Instant};

use tracing::{debug, trace};
use wbsforge_core::CellBound;

use super::{
    check_inputs, project, projected_gradient_norm, BoundedMinimizer, MinimizeResult,
    MinimizeStatus,
};
use crate::error::Result;
use crate::objective::Objective;
use crate::scope::MinimizerScope;
use crate::termination::Termination;

/// Default tolerance on the projected gradient's largest component.
pub const DEFAULT_PROJECTED_GRADIENT_TOLERANCE: f64 = 1.0e-5;

/// Default tolerance on the relative penalty reduction of one step.
pub const DEFAULT_RELATIVE_REDUCTION_TOLERANCE: f64 = 1.0e7 * f64::EPSILON;

/// Default maximum backtracking steps per line search.
pub const DEFAULT_MAX_LINE_SEARCH_STEPS: usize = 20;

const SUFFICIENT_DECREASE: f64 = 1.0e-4;
const MIN_SPECTRAL_STEP: f64 = 1.0e-10;
const MAX_SPECTRAL_STEP: f64 = 1.0e10;
const PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

/// Callback receiving each new best point and its penalty.
pub type BestSolutionCallback = Box<dyn Fn(&[f64], f64) + Send + Sync>;

/// Bounded local minimizer using spectral projected gradient steps.
///
/// # Example
///
/// ```
/// use wbsforge_core::CellBound;
/// use wbsforge_solver::minimizer::{BoundedMinimizer, ProjectedGradientMinimizer};
/// use wbsforge_solver::objective::FnObjective;
/// use wbsforge_solver::termination::StepCountTermination;
///
/// // minimize (x - 3)^2 subject to 0 <= x <= 2
/// let objective = FnObjective::new(1, |x: &[f64]| (x[0] - 3.0).powi(2));
/// let mut minimizer = ProjectedGradientMinimizer::new(StepCountTermination::new(100));
/// let result = minimizer
///     .minimize(&objective, &[CellBound::new(0.0, 2.0)], vec![0.0])
///     .unwrap();
///
/// assert!(result.success());
/// assert!((result.x[0] - 2.0).abs() < 1e-9);
/// ```
pub struct ProjectedGradientMinimizer<T> {
    termination: T,
    projected_gradient_tolerance: f64,
    relative_reduction_tolerance: f64,
    max_line_search_steps: usize,
    best_solution_callback: Option<BestSolutionCallback>,
}

impl<T: Debug> Debug for ProjectedGradientMinimizer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectedGradientMinimizer")
            .field("termination", &self.termination)
            .field(
                "projected_gradient_tolerance",
                &self.projected_gradient_tolerance,
            )
            .field(
                "relative_reduction_tolerance",
                &self.relative_reduction_tolerance,
            )
            .field("max_line_search_steps", &self.max_line_search_steps)
            .finish()
    }
}

impl<T: Termination> ProjectedGradientMinimizer<T> {
    /// Creates a minimizer with default tolerances.
    pub fn new(termination: T) -> Self {
        Self {
            termination,
            projected_gradient_tolerance: DEFAULT_PROJECTED_GRADIENT_TOLERANCE,
            relative_reduction_tolerance: DEFAULT_RELATIVE_REDUCTION_TOLERANCE,
            max_line_search_steps: DEFAULT_MAX_LINE_SEARCH_STEPS,
            best_solution_callback: None,
        }
    }

    pub fn with_projected_gradient_tolerance(mut self, tolerance: f64) -> Self {
        self.projected_gradient_tolerance = tolerance;
        self
    }

    pub fn with_relative_reduction_tolerance(mut self, tolerance: f64) -> Self {
        self.relative_reduction_tolerance = tolerance;
        self
    }

    pub fn with_max_line_search_steps(mut self, steps: usize) -> Self {
        self.max_line_search_steps = steps.max(1);
        self
    }

    /// Sets a callback invoked with every new best point and its penalty.
    pub fn with_best_solution_callback(mut self, callback: BestSolutionCallback) -> Self {
        self.best_solution_callback = Some(callback);
        self
    }

    pub fn termination(&self) -> &T {
        &self.termination
    }

    fn evaluate<O: Objective + ?Sized>(
        &self,
        objective: &O,
        point: &[f64],
        scope: &mut MinimizerScope,
    ) -> f64 {
        scope.record_score_calculation();
        objective.value(point)
    }

    fn evaluate_gradient<O: Objective + ?Sized>(
        &self,
        objective: &O,
        point: &[f64],
        grad: &mut [f64],
        scope: &mut MinimizerScope,
    ) {
        scope.record_gradient_calculation();
        objective.gradient(point, grad);
    }

    fn improve(&self, scope: &mut MinimizerScope, point: &[f64], score: f64) {
        if scope.update_best_score(score) {
            if let Some(callback) = &self.best_solution_callback {
                callback(point, score);
            }
        }
    }

    // Backtracks along `direction` from `point`. On success `trial` holds
    // the accepted point and its value is returned.
    #[allow(clippy::too_many_arguments)]
    fn line_search<O: Objective + ?Sized>(
        &self,
        objective: &O,
        bounds: &[CellBound],
        point: &[f64],
        score: f64,
        direction: &[f64],
        slope: f64,
        trial: &mut [f64],
        scope: &mut MinimizerScope,
    ) -> Option<f64> {
        let mut lambda = 1.0;
        for _ in 0..self.max_line_search_steps {
            for (((t, x), d), bound) in trial.iter_mut().zip(point).zip(direction).zip(bounds) {
                *t = bound.clamp(x + lambda * d);
            }
            let trial_score = self.evaluate(objective, trial, scope);
            if trial_score.is_finite() && trial_score <= score + SUFFICIENT_DECREASE * lambda * slope
            {
                return Some(trial_score);
            }

            scope.record_backtrack();
            lambda = if trial_score.is_finite() {
                // Safeguarded minimizer of the quadratic through f(0), f'(0), f(lambda).
                let curvature = trial_score - score - lambda * slope;
                let candidate = -slope * lambda * lambda / (2.0 * curvature);
                candidate.clamp(0.1 * lambda, 0.5 * lambda)
            } else {
                0.5 * lambda
            };
        }
        None
    }

    fn finish(
        &self,
        x: Vec<f64>,
        fun: f64,
        status: MinimizeStatus,
        scope: MinimizerScope,
    ) -> MinimizeResult {
        MinimizeResult {
            x,
            fun,
            status,
            statistics: scope.into_statistics(),
        }
    }
}

impl<T: Termination> BoundedMinimizer for ProjectedGradientMinimizer<T> {
    fn minimize<O: Objective + ?Sized>(
        &mut self,
        objective: &O,
        bounds: &[CellBound],
        x0: Vec<f64>,
    ) -> Result<MinimizeResult> {
        let n = objective.dimension();
        check_inputs(n, bounds, &x0)?;

        let mut scope = MinimizerScope::new();
        scope.start_solving();

        // Starting points outside the box are clamped onto it.
        let mut x = x0;
        project(&mut x, bounds);

        let mut f = self.evaluate(objective, &x, &mut scope);
        if !f.is_finite() {
            return Ok(self.finish(x, f, MinimizeStatus::NonFiniteObjective, scope));
        }
        self.improve(&mut scope, &x, f);

        let mut g = vec![0.0; n];
        self.evaluate_gradient(objective, &x, &mut g, &mut scope);

        let initial_norm = projected_gradient_norm(&x, &g, bounds);
        let mut step = if initial_norm > 0.0 {
            (1.0 / initial_norm).clamp(MIN_SPECTRAL_STEP, MAX_SPECTRAL_STEP)
        } else {
            1.0
        };

        let mut direction = vec![0.0; n];
        let mut trial = vec![0.0; n];
        let mut g_trial = vec![0.0; n];
        let mut last_progress = Instant::now();

        let status = loop {
            if projected_gradient_norm(&x, &g, bounds) <= self.projected_gradient_tolerance {
                break MinimizeStatus::ProjectedGradientConverged;
            }
            if self.termination.is_terminated(&scope) {
                break MinimizeStatus::TerminationReached;
            }

            let mut slope = 0.0;
            for (((d, xi), gi), bound) in direction.iter_mut().zip(&x).zip(&g).zip(bounds) {
                *d = bound.clamp(xi - step * gi) - xi;
                slope += *d * gi;
            }
            if slope >= 0.0 || !slope.is_finite() {
                break MinimizeStatus::LineSearchFailed;
            }

            let Some(f_trial) = self.line_search(
                objective,
                bounds,
                &x,
                f,
                &direction,
                slope,
                &mut trial,
                &mut scope,
            ) else {
                break MinimizeStatus::LineSearchFailed;
            };

            self.evaluate_gradient(objective, &trial, &mut g_trial, &mut scope);

            let mut sts = 0.0;
            let mut sty = 0.0;
            for i in 0..n {
                let s = trial[i] - x[i];
                let y = g_trial[i] - g[i];
                sts += s * s;
                sty += s * y;
            }
            step = if sty > 0.0 {
                (sts / sty).clamp(MIN_SPECTRAL_STEP, MAX_SPECTRAL_STEP)
            } else {
                MAX_SPECTRAL_STEP
            };

            let reduction = (f - f_trial) / f.abs().max(f_trial.abs()).max(1.0);
            std::mem::swap(&mut x, &mut trial);
            std::mem::swap(&mut g, &mut g_trial);
            f = f_trial;

            let step_index = scope.increment_step_count();
            trace!(event = "step", step = step_index, score = f);
            self.improve(&mut scope, &x, f);

            if last_progress.elapsed() >= PROGRESS_INTERVAL {
                debug!(
                    event = "progress",
                    steps = step_index,
                    calcs = scope.score_calculation_count(),
                    score = f,
                );
                last_progress = Instant::now();
            }

            if reduction <= self.relative_reduction_tolerance {
                break MinimizeStatus::RelativeReductionConverged;
            }
        };

        Ok(self.finish(x, f, status, scope))
    }

    fn minimizer_type_name(&self) -> &'static str {
        "ProjectedGradient"
    }
}
