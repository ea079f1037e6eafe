//! Builder module for constructing minimizers from configuration
//!
//! This module provides the wiring between configuration types and
//! the actual minimizer implementation.

use wbsforge_config::{MinimizerType, SolverConfig, TerminationConfig};

use crate::error::Result;
use crate::minimizer::ProjectedGradientMinimizer;
use crate::termination::{
    BestScoreTermination, OrTermination, ScoreCalculationCountTermination, StepCountTermination,
    TimeTermination,
};

/// Iteration limit when none is configured.
pub const DEFAULT_STEP_COUNT_LIMIT: u64 = 15_000;

/// Penalty evaluation limit when none is configured.
pub const DEFAULT_SCORE_CALCULATION_COUNT_LIMIT: u64 = 15_000;

/// Termination assembled from a [`TerminationConfig`].
///
/// Step and evaluation limits are always present; time and target-score
/// limits only when configured.
pub type ConfiguredTermination = OrTermination<(
    StepCountTermination,
    ScoreCalculationCountTermination,
    Option<TimeTermination>,
    Option<BestScoreTermination>,
)>;

/// Builder for constructing minimizers from configuration.
pub struct MinimizerBuilder;

impl MinimizerBuilder {
    /// Builds the termination condition for a run.
    pub fn termination(config: Option<&TerminationConfig>) -> ConfiguredTermination {
        let step_limit = config
            .and_then(|c| c.step_count_limit)
            .unwrap_or(DEFAULT_STEP_COUNT_LIMIT);
        let calc_limit = config
            .and_then(|c| c.score_calculation_count_limit)
            .unwrap_or(DEFAULT_SCORE_CALCULATION_COUNT_LIMIT);

        OrTermination::new((
            StepCountTermination::new(step_limit),
            ScoreCalculationCountTermination::new(calc_limit),
            config.and_then(|c| c.time_limit()).map(TimeTermination::new),
            config
                .and_then(|c| c.best_score_limit)
                .map(BestScoreTermination::new),
        ))
    }

    /// Builds a minimizer from solver configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn build(config: &SolverConfig) -> Result<ProjectedGradientMinimizer<ConfiguredTermination>> {
        config.validate()?;

        let termination = Self::termination(config.termination.as_ref());
        let mut minimizer = ProjectedGradientMinimizer::new(termination);

        if let Some(minimizer_config) = &config.minimizer {
            match minimizer_config.minimizer_type {
                MinimizerType::ProjectedGradient => {}
            }
            if let Some(tolerance) = minimizer_config.projected_gradient_tolerance {
                minimizer = minimizer.with_projected_gradient_tolerance(tolerance);
            }
            if let Some(tolerance) = minimizer_config.relative_reduction_tolerance {
                minimizer = minimizer.with_relative_reduction_tolerance(tolerance);
            }
            if let Some(steps) = minimizer_config.max_line_search_steps {
                minimizer = minimizer.with_max_line_search_steps(steps);
            }
        }

        Ok(minimizer)
    }
}
