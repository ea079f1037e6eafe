//! Termination conditions for minimizer runs.

mod best_score;
mod composite;
mod score_calculation_count;
mod step_count;
mod time;

use std::fmt::Debug;

use crate::scope::MinimizerScope;

pub use best_score::BestScoreTermination;
pub use composite::OrTermination;
pub use score_calculation_count::ScoreCalculationCountTermination;
pub use step_count::StepCountTermination;
pub use time::TimeTermination;

/// Trait for determining when to stop minimizing.
pub trait Termination: Send + Debug {
    /// Returns true if the run should stop.
    fn is_terminated(&self, scope: &MinimizerScope) -> bool;
}

/// An absent termination never fires.
impl<T: Termination> Termination for Option<T> {
    fn is_terminated(&self, scope: &MinimizerScope) -> bool {
        self.as_ref().is_some_and(|t| t.is_terminated(scope))
    }
}
