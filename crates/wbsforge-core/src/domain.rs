//! Domain types: employees, projects and eligibility overrides.

use std::collections::{BTreeMap, HashSet};

use crate::bounds::{BoundsMatrix, CellBound};
use crate::diagnostic::Diagnostic;
use crate::error::{Result, WbsError};
use crate::penalty::PenaltyModel;

/// A person who can be assigned to projects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Employee {
    pub id: String,
}

impl Employee {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// A project and the total assignment mass it should receive.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Project {
    pub id: String,
    /// Full-time-equivalent target, summed over all employees.
    pub fte: f64,
}

impl Project {
    pub fn new(id: impl Into<String>, fte: f64) -> Self {
        Self { id: id.into(), fte }
    }
}

/// Per-employee eligibility.
///
/// `Unconstrained` keeps the permissive default bound on every project.
/// `Overrides` replaces the bound only for the listed projects; projects
/// missing from the map stay at the default, they are NOT excluded.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Eligibility {
    #[default]
    Unconstrained,
    Overrides(BTreeMap<String, CellBound>),
}

impl Eligibility {
    /// Builds an override map from `(project, min, max)` triples.
    ///
    /// # Examples
    ///
    /// ```
    /// use wbsforge_core::{CellBound, Eligibility};
    ///
    /// let e = Eligibility::overrides([("apollo", 0.0, 0.5)]);
    /// assert_eq!(e.bound_for("apollo"), Some(CellBound::new(0.0, 0.5)));
    /// assert_eq!(e.bound_for("gemini"), None);
    /// ```
    pub fn overrides<'a>(entries: impl IntoIterator<Item = (&'a str, f64, f64)>) -> Self {
        Eligibility::Overrides(
            entries
                .into_iter()
                .map(|(project, min, max)| (project.to_string(), CellBound::new(min, max)))
                .collect(),
        )
    }

    /// Returns the explicit bound for a project, if one is set.
    pub fn bound_for(&self, project: &str) -> Option<CellBound> {
        match self {
            Eligibility::Unconstrained => None,
            Eligibility::Overrides(map) => map.get(project).copied(),
        }
    }
}

static UNCONSTRAINED: Eligibility = Eligibility::Unconstrained;

/// A validated, immutable staffing instance.
///
/// Employees and projects keep the order they were given in; that order
/// defines the rows and columns of every matrix derived from the problem.
#[derive(Debug, Clone)]
pub struct StaffingProblem {
    employees: Vec<Employee>,
    projects: Vec<Project>,
    eligibility: BTreeMap<String, Eligibility>,
}

impl StaffingProblem {
    /// Creates a problem, failing fast on malformed input.
    ///
    /// Employees without an eligibility entry are `Unconstrained`.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate identifiers, negative or non-finite FTE
    /// targets, eligibility entries for unknown employees or projects, and
    /// bound pairs that are not finite or have `min > max`.
    pub fn new(
        employees: Vec<Employee>,
        projects: Vec<Project>,
        eligibility: BTreeMap<String, Eligibility>,
    ) -> Result<Self> {
        let mut employee_ids = HashSet::with_capacity(employees.len());
        for employee in &employees {
            if !employee_ids.insert(employee.id.as_str()) {
                return Err(WbsError::DuplicateId {
                    kind: "employee",
                    id: employee.id.clone(),
                });
            }
        }

        let mut project_ids = HashSet::with_capacity(projects.len());
        for project in &projects {
            if !project_ids.insert(project.id.as_str()) {
                return Err(WbsError::DuplicateId {
                    kind: "project",
                    id: project.id.clone(),
                });
            }
            if !project.fte.is_finite() || project.fte < 0.0 {
                return Err(WbsError::InvalidFte {
                    project: project.id.clone(),
                    fte: project.fte,
                });
            }
        }

        for (employee, entry) in &eligibility {
            if !employee_ids.contains(employee.as_str()) {
                return Err(WbsError::UnknownEmployee(employee.clone()));
            }
            let Eligibility::Overrides(map) = entry else {
                continue;
            };
            for (project, bound) in map {
                if !project_ids.contains(project.as_str()) {
                    return Err(WbsError::UnknownProject {
                        employee: employee.clone(),
                        project: project.clone(),
                    });
                }
                if !bound.is_valid() {
                    return Err(WbsError::InvalidBound {
                        employee: employee.clone(),
                        project: project.clone(),
                        min: bound.min,
                        max: bound.max,
                    });
                }
            }
        }

        Ok(Self {
            employees,
            projects,
            eligibility,
        })
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Number of employees (matrix rows).
    pub fn employee_count(&self) -> usize {
        self.employees.len()
    }

    /// Number of projects (matrix columns).
    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    /// Length of the flattened decision vector.
    pub fn variable_count(&self) -> usize {
        self.employee_count() * self.project_count()
    }

    /// Sum of all project FTE targets.
    pub fn total_fte(&self) -> f64 {
        self.projects.iter().fold(0.0, |acc, p| acc + p.fte)
    }

    /// Returns the eligibility of an employee, `Unconstrained` when absent.
    pub fn eligibility_of(&self, employee: &str) -> &Eligibility {
        self.eligibility.get(employee).unwrap_or(&UNCONSTRAINED)
    }

    /// Derives the per-cell bounds for this problem.
    pub fn bounds(&self) -> BoundsMatrix {
        BoundsMatrix::build(&self.employees, &self.projects, &self.eligibility)
    }

    /// Creates the penalty model for this problem.
    pub fn penalty_model(&self) -> PenaltyModel {
        PenaltyModel::new(
            self.employee_count(),
            self.projects.iter().map(|p| p.fte).collect(),
        )
    }

    /// Returns non-fatal observations about the instance.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        Diagnostic::fte_mismatch(self.total_fte(), self.employee_count())
            .into_iter()
            .collect()
    }
}
