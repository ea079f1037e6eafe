//! Minimizer-level scope.

use std::time::{Duration, Instant};

use crate::statistics::{ScoreImprovement, SolverStatistics};

/// Working state of one minimizer run.
///
/// Terminations read from it; the minimizer records iterations, penalty
/// evaluations and improvements into it.
#[derive(Debug, Default)]
pub struct MinimizerScope {
    start_time: Option<Instant>,
    step_count: u64,
    score_calculation_count: u64,
    gradient_calculation_count: u64,
    backtrack_count: u64,
    best_score: Option<f64>,
    score_history: Vec<ScoreImprovement>,
}

impl MinimizerScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_solving(&mut self) {
        self.start_time = Some(Instant::now());
        self.step_count = 0;
        self.score_calculation_count = 0;
        self.gradient_calculation_count = 0;
        self.backtrack_count = 0;
        self.best_score = None;
        self.score_history.clear();
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    pub fn increment_step_count(&mut self) -> u64 {
        self.step_count += 1;
        self.step_count
    }

    pub fn total_step_count(&self) -> u64 {
        self.step_count
    }

    pub fn record_score_calculation(&mut self) {
        self.score_calculation_count += 1;
    }

    pub fn score_calculation_count(&self) -> u64 {
        self.score_calculation_count
    }

    pub fn record_gradient_calculation(&mut self) {
        self.gradient_calculation_count += 1;
    }

    pub fn record_backtrack(&mut self) {
        self.backtrack_count += 1;
    }

    pub fn best_score(&self) -> Option<f64> {
        self.best_score
    }

    /// Records `score` if it beats the best so far. Returns true if it did.
    pub fn update_best_score(&mut self, score: f64) -> bool {
        let is_better = match self.best_score {
            None => true,
            Some(best) => score < best,
        };
        if is_better {
            self.best_score = Some(score);
            self.score_history.push(ScoreImprovement {
                time_offset: self.elapsed().unwrap_or_default(),
                step_count: self.step_count,
                score,
            });
        }
        is_better
    }

    /// Consumes the scope into run statistics.
    pub fn into_statistics(self) -> SolverStatistics {
        SolverStatistics {
            total_duration: self.elapsed().unwrap_or_default(),
            step_count: self.step_count,
            score_calculation_count: self.score_calculation_count,
            gradient_calculation_count: self.gradient_calculation_count,
            backtrack_count: self.backtrack_count,
            score_history: self.score_history,
        }
    }
}
