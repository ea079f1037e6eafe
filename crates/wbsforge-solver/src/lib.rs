//! WBSForge Solver Engine
//!
//! This crate provides the optimization side of WBSForge:
//! - The `Objective` trait and its implementation for the penalty model
//! - Bounded minimizers (spectral projected gradient)
//! - Termination conditions
//! - Minimizer scope and run statistics
//! - The optimization driver producing a `Solution`
//! - Configuration wiring (builder module)
//!
//! Logging levels:
//! - **INFO**: Solve start/end, problem scale
//! - **DEBUG**: Progress updates (about once per second)
//! - **TRACE**: Individual iterations

pub mod builder;
pub mod driver;
pub mod error;
pub mod minimizer;
pub mod objective;
pub mod scope;
pub mod statistics;
pub mod termination;

pub use builder::{ConfiguredTermination, MinimizerBuilder};
pub use driver::{optimize, optimize_with, optimize_with_channel, optimize_with_config, Solution};
pub use error::SolverError;
pub use minimizer::{
    BoundedMinimizer, MinimizeResult, MinimizeStatus, ProjectedGradientMinimizer,
};
pub use objective::{central_difference_gradient, FnObjective, Objective};
pub use scope::MinimizerScope;
pub use statistics::{ScoreImprovement, SolverStatistics};
pub use termination::{
    BestScoreTermination, OrTermination, ScoreCalculationCountTermination, StepCountTermination,
    Termination, TimeTermination,
};
