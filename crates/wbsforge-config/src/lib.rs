//! Configuration system for WBSForge.
//!
//! Load staffing settings (employees, eligibility overrides, project FTE
//! targets) and optional solver tuning from YAML or TOML files.
//!
//! # Examples
//!
//! Load settings from a YAML string:
//!
//! ```
//! use wbsforge_config::Settings;
//!
//! let settings = Settings::from_yaml_str(r#"
//!     employees:
//!       alice: null
//!       bob:
//!         apollo: [0.0, 0.5]
//!     projects:
//!       apollo: 1.0
//!       gemini: 1.0
//! "#).unwrap();
//!
//! let problem = settings.to_problem().unwrap();
//! assert_eq!(problem.employee_count(), 2);
//! assert_eq!(problem.project_count(), 2);
//! ```
//!
//! Use default solver config when file is missing:
//!
//! ```
//! use wbsforge_config::SolverConfig;
//!
//! let config = SolverConfig::load("solver.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wbsforge_core::{CellBound, Eligibility, Employee, Project, StaffingProblem, WbsError};

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid settings: {0}")]
    Model(#[from] WbsError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Bound overrides for one employee, keyed by project.
pub type OverrideMap = BTreeMap<String, (f64, f64)>;

/// A staffing settings file.
///
/// `employees` maps each employee to `null` (no overrides) or a map from
/// project to a `[min, max]` pair. `projects` maps each project to its FTE
/// target. Maps are ordered, so employees and projects come out sorted by
/// identifier.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Settings {
    /// Employees and their optional eligibility overrides.
    pub employees: BTreeMap<String, Option<OverrideMap>>,

    /// Projects and their FTE targets.
    pub projects: BTreeMap<String, f64>,

    /// Optional solver tuning.
    #[serde(default)]
    pub solver: Option<SolverConfig>,
}

impl Settings {
    /// Creates empty settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads settings from a file, picking the format from its extension.
    ///
    /// `.toml` files are parsed as TOML, anything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns error if the file can't be read or doesn't parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            _ => Self::from_yaml_file(path),
        }
    }

    /// Loads settings from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses settings from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Loads settings from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses settings from a TOML string.
    ///
    /// TOML has no null; an empty table (`alice = {}`) means no overrides.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Adds an employee without overrides.
    pub fn with_employee(mut self, id: impl Into<String>) -> Self {
        self.employees.insert(id.into(), None);
        self
    }

    /// Adds a bound override for an employee on a project.
    pub fn with_override(
        mut self,
        employee: impl Into<String>,
        project: impl Into<String>,
        min: f64,
        max: f64,
    ) -> Self {
        self.employees
            .entry(employee.into())
            .or_default()
            .get_or_insert_with(BTreeMap::new)
            .insert(project.into(), (min, max));
        self
    }

    /// Adds a project with its FTE target.
    pub fn with_project(mut self, id: impl Into<String>, fte: f64) -> Self {
        self.projects.insert(id.into(), fte);
        self
    }

    /// Sets the solver configuration.
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = Some(solver);
        self
    }

    /// Returns the solver configuration, or the default.
    pub fn solver_config(&self) -> SolverConfig {
        self.solver.clone().unwrap_or_default()
    }

    /// Converts the settings into a validated problem.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Model`] if an override names an unknown
    /// project, a bound pair is inverted, or an FTE target is negative.
    pub fn to_problem(&self) -> Result<StaffingProblem, ConfigError> {
        let employees = self.employees.keys().map(Employee::new).collect();
        let projects = self
            .projects
            .iter()
            .map(|(id, fte)| Project::new(id, *fte))
            .collect();
        let eligibility = self
            .employees
            .iter()
            .map(|(id, overrides)| {
                let eligibility = match overrides {
                    None => Eligibility::Unconstrained,
                    Some(map) => Eligibility::Overrides(
                        map.iter()
                            .map(|(project, bound)| (project.clone(), CellBound::from(*bound)))
                            .collect(),
                    ),
                };
                (id.clone(), eligibility)
            })
            .collect();

        Ok(StaffingProblem::new(employees, projects, eligibility)?)
    }
}

/// Main solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    /// Minimizer configuration.
    #[serde(default)]
    pub minimizer: Option<MinimizerConfig>,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the iteration limit.
    pub fn with_step_count_limit(mut self, steps: u64) -> Self {
        self.termination = Some(TerminationConfig {
            step_count_limit: Some(steps),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the minimizer configuration.
    pub fn with_minimizer(mut self, minimizer: MinimizerConfig) -> Self {
        self.minimizer = Some(minimizer);
        self
    }

    /// Returns the termination time limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wbsforge_config::SolverConfig;
    /// use std::time::Duration;
    ///
    /// let config = SolverConfig::from_toml_str(r#"
    ///     [termination]
    ///     seconds_spent_limit = 30
    /// "#).unwrap();
    ///
    /// assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
    /// ```
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Checks value ranges that serde can't express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(minimizer) = &self.minimizer {
            for (name, value) in [
                (
                    "projected_gradient_tolerance",
                    minimizer.projected_gradient_tolerance,
                ),
                (
                    "relative_reduction_tolerance",
                    minimizer.relative_reduction_tolerance,
                ),
            ] {
                if let Some(v) = value {
                    if !v.is_finite() || v < 0.0 {
                        return Err(ConfigError::Invalid(format!(
                            "{} must be a non-negative number, got {}",
                            name, v
                        )));
                    }
                }
            }
            if minimizer.max_line_search_steps == Some(0) {
                return Err(ConfigError::Invalid(
                    "max_line_search_steps must be at least 1".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Termination configuration.
///
/// Every limit is optional; the solver stops at whichever is hit first.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum minutes to spend solving.
    pub minutes_spent_limit: Option<u64>,

    /// Maximum number of minimizer iterations.
    pub step_count_limit: Option<u64>,

    /// Maximum number of penalty evaluations.
    pub score_calculation_count_limit: Option<u64>,

    /// Stop once the best penalty is at or below this value.
    pub best_score_limit: Option<f64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let seconds =
            self.seconds_spent_limit.unwrap_or(0) + self.minutes_spent_limit.unwrap_or(0) * 60;
        if seconds > 0 {
            Some(Duration::from_secs(seconds))
        } else {
            None
        }
    }
}

/// Minimizer configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MinimizerConfig {
    /// Minimizer algorithm.
    #[serde(default)]
    pub minimizer_type: MinimizerType,

    /// Converged once the projected gradient's largest component is below this.
    pub projected_gradient_tolerance: Option<f64>,

    /// Converged once the relative penalty reduction of a step is below this.
    pub relative_reduction_tolerance: Option<f64>,

    /// Maximum backtracking steps per line search.
    pub max_line_search_steps: Option<usize>,
}

/// Minimizer algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MinimizerType {
    /// Spectral projected gradient with backtracking line search.
    #[default]
    ProjectedGradient,
}
