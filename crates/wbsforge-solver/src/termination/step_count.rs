//! Step count termination.

use super::Termination;
use crate::scope::MinimizerScope;

/// Terminates after an iteration count.
///
/// # Example
///
/// ```
/// use wbsforge_solver::termination::StepCountTermination;
///
/// // Terminate after 1000 iterations
/// let term = StepCountTermination::new(1000);
/// ```
#[derive(Debug, Clone)]
pub struct StepCountTermination {
    limit: u64,
}

impl StepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for StepCountTermination {
    fn is_terminated(&self, scope: &MinimizerScope) -> bool {
        scope.total_step_count() >= self.limit
    }
}
