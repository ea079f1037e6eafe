//! Penalty evaluation count termination.

use super::Termination;
use crate::scope::MinimizerScope;

/// Terminates after a number of penalty evaluations.
#[derive(Debug, Clone)]
pub struct ScoreCalculationCountTermination {
    limit: u64,
}

impl ScoreCalculationCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for ScoreCalculationCountTermination {
    fn is_terminated(&self, scope: &MinimizerScope) -> bool {
        scope.score_calculation_count() >= self.limit
    }
}
