//! Score-based termination.

use super::Termination;
use crate::scope::MinimizerScope;

/// Terminates when the best penalty reaches or drops below a target.
///
/// # Example
///
/// ```
/// use wbsforge_solver::termination::BestScoreTermination;
///
/// let term = BestScoreTermination::new(1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct BestScoreTermination {
    target_score: f64,
}

impl BestScoreTermination {
    pub fn new(target_score: f64) -> Self {
        Self { target_score }
    }
}

impl Termination for BestScoreTermination {
    fn is_terminated(&self, scope: &MinimizerScope) -> bool {
        scope
            .best_score()
            .map(|score| score <= self.target_score)
            .unwrap_or(false)
    }
}
