//! Settings-driven entry points.

use std::path::Path;

use tokio::sync::mpsc;
use wbsforge_config::Settings;
use wbsforge_core::{AssignmentMatrix, StaffingProblem};
use wbsforge_solver::{optimize_with_channel, optimize_with_config, Solution, SolverError};

/// Builds the problem described by `settings` and optimizes it.
///
/// Employees and projects are ordered by identifier. The `solver` section
/// of the settings, if any, configures the minimizer.
///
/// # Errors
///
/// Returns an error if the settings describe an invalid problem or an
/// invalid solver configuration.
pub fn solve_settings(settings: &Settings) -> Result<(StaffingProblem, Solution), SolverError> {
    #[cfg(feature = "console")]
    wbsforge_console::init();

    let problem = settings.to_problem()?;
    let solution = optimize_with_config(&problem, &settings.solver_config())?;
    Ok((problem, solution))
}

/// Like [`solve_settings`], streaming improved assignments on `sender`.
pub fn solve_settings_with_channel(
    settings: &Settings,
    sender: mpsc::UnboundedSender<(AssignmentMatrix, f64)>,
) -> Result<(StaffingProblem, Solution), SolverError> {
    #[cfg(feature = "console")]
    wbsforge_console::init();

    let problem = settings.to_problem()?;
    let solution = optimize_with_channel(&problem, &settings.solver_config(), sender)?;
    Ok((problem, solution))
}

/// Loads a settings file (YAML, or TOML for `.toml` paths) and solves it.
pub fn solve_file(path: impl AsRef<Path>) -> Result<(StaffingProblem, Solution), SolverError> {
    let settings = Settings::load(path)?;
    solve_settings(&settings)
}
