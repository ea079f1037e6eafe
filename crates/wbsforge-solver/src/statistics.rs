//! Run statistics.
//!
//! Counts and timings of one minimizer run, plus the penalty progression.

use std::time::Duration;

/// Record of a penalty improvement.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreImprovement {
    /// Time since solving started when the improvement occurred.
    pub time_offset: Duration,
    /// Iteration at which the improvement occurred.
    pub step_count: u64,
    /// The new (lower) penalty.
    pub score: f64,
}

/// Complete statistics for a minimizer run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverStatistics {
    /// Total time spent solving.
    pub total_duration: Duration,
    /// Iterations taken.
    pub step_count: u64,
    /// Penalty evaluations performed.
    pub score_calculation_count: u64,
    /// Gradient evaluations performed.
    pub gradient_calculation_count: u64,
    /// Line search step reductions.
    pub backtrack_count: u64,
    /// History of penalty improvements.
    pub score_history: Vec<ScoreImprovement>,
}

impl SolverStatistics {
    /// Returns the best penalty (last in history, or None).
    pub fn best_score(&self) -> Option<f64> {
        self.score_history.last().map(|s| s.score)
    }

    /// Returns the number of improvements recorded.
    pub fn improvement_count(&self) -> usize {
        self.score_history.len()
    }

    /// Returns the average time per iteration.
    pub fn avg_time_per_step(&self) -> Duration {
        if self.step_count == 0 {
            Duration::ZERO
        } else {
            self.total_duration / self.step_count as u32
        }
    }

    /// Returns penalty evaluations per second.
    pub fn score_calculation_speed(&self) -> u64 {
        let secs = self.total_duration.as_secs_f64();
        if secs > 0.0 {
            (self.score_calculation_count as f64 / secs) as u64
        } else {
            0
        }
    }
}
