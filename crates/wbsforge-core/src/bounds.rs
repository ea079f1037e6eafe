//! Per-cell bound constraints.

use std::collections::BTreeMap;

use crate::domain::{Eligibility, Employee, Project};

/// Inclusive `(min, max)` range for one assignment cell.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellBound {
    pub min: f64,
    pub max: f64,
}

impl CellBound {
    /// The permissive default: up to double load on any project.
    pub const DEFAULT: CellBound = CellBound { min: 0.0, max: 2.0 };

    #[inline]
    pub const fn new(min: f64, max: f64) -> Self {
        CellBound { min, max }
    }

    /// Returns true if both ends are finite and `min <= max`.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    /// Projects a value onto this range.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for CellBound {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<(f64, f64)> for CellBound {
    fn from((min, max): (f64, f64)) -> Self {
        CellBound::new(min, max)
    }
}

/// Row-major matrix of cell bounds, parallel to the assignment matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundsMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<CellBound>,
}

impl BoundsMatrix {
    /// Creates a matrix where every cell has the default bound.
    pub fn uniform(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![CellBound::DEFAULT; rows * cols],
        }
    }

    /// Derives bounds from eligibility overrides.
    ///
    /// Every cell starts at [`CellBound::DEFAULT`]. For each employee with
    /// `Overrides`, only the listed projects are overwritten. Employees with
    /// no entry, or `Unconstrained`, keep the default on every project.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use wbsforge_core::{BoundsMatrix, CellBound, Eligibility, Employee, Project};
    ///
    /// let employees = vec![Employee::new("alice"), Employee::new("bob")];
    /// let projects = vec![Project::new("apollo", 1.0), Project::new("gemini", 1.0)];
    /// let mut eligibility = BTreeMap::new();
    /// eligibility.insert("bob".to_string(), Eligibility::overrides([("gemini", 0.0, 0.5)]));
    ///
    /// let bounds = BoundsMatrix::build(&employees, &projects, &eligibility);
    /// assert_eq!(bounds.get(0, 1), CellBound::DEFAULT);
    /// assert_eq!(bounds.get(1, 0), CellBound::DEFAULT);
    /// assert_eq!(bounds.get(1, 1), CellBound::new(0.0, 0.5));
    /// ```
    pub fn build(
        employees: &[Employee],
        projects: &[Project],
        eligibility: &BTreeMap<String, Eligibility>,
    ) -> Self {
        let mut bounds = Self::uniform(employees.len(), projects.len());
        for (row, employee) in employees.iter().enumerate() {
            let Some(Eligibility::Overrides(map)) = eligibility.get(&employee.id) else {
                continue;
            };
            for (col, project) in projects.iter().enumerate() {
                if let Some(bound) = map.get(&project.id) {
                    bounds.cells[row * bounds.cols + col] = *bound;
                }
            }
        }
        bounds
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> CellBound {
        self.cells[row * self.cols + col]
    }

    /// Returns the flat row-major view, aligned with the decision vector.
    pub fn as_slice(&self) -> &[CellBound] {
        &self.cells
    }

    /// Returns true if every value of `point` lies in its cell's range
    /// within `tolerance`.
    pub fn contains(&self, point: &[f64], tolerance: f64) -> bool {
        point.len() == self.cells.len()
            && point
                .iter()
                .zip(&self.cells)
                .all(|(x, b)| *x >= b.min - tolerance && *x <= b.max + tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (Vec<Employee>, Vec<Project>) {
        (
            vec![Employee::new("alice"), Employee::new("bob")],
            vec![
                Project::new("apollo", 1.0),
                Project::new("gemini", 0.5),
                Project::new("mercury", 0.5),
            ],
        )
    }

    #[test]
    fn test_unconstrained_employee_gets_default_everywhere() {
        let (employees, projects) = fixture();
        let mut eligibility = BTreeMap::new();
        eligibility.insert("alice".to_string(), Eligibility::Unconstrained);

        let bounds = BoundsMatrix::build(&employees, &projects, &eligibility);
        for row in 0..2 {
            for col in 0..3 {
                assert_eq!(bounds.get(row, col), CellBound::new(0.0, 2.0));
            }
        }
    }

    #[test]
    fn test_partial_override_changes_only_listed_cells() {
        let (employees, projects) = fixture();
        let mut eligibility = BTreeMap::new();
        eligibility.insert(
            "alice".to_string(),
            Eligibility::overrides([("gemini", 0.25, 0.75)]),
        );

        let bounds = BoundsMatrix::build(&employees, &projects, &eligibility);
        assert_eq!(bounds.get(0, 0), CellBound::DEFAULT);
        assert_eq!(bounds.get(0, 1), CellBound::new(0.25, 0.75));
        assert_eq!(bounds.get(0, 2), CellBound::DEFAULT);
        assert!(bounds.as_slice()[3..].iter().all(|b| *b == CellBound::DEFAULT));
    }

    #[test]
    fn test_empty_override_map_keeps_defaults() {
        let (employees, projects) = fixture();
        let mut eligibility = BTreeMap::new();
        eligibility.insert("bob".to_string(), Eligibility::Overrides(BTreeMap::new()));

        let bounds = BoundsMatrix::build(&employees, &projects, &eligibility);
        assert_eq!(bounds, BoundsMatrix::uniform(2, 3));
    }

    #[test]
    fn test_clamp_and_contains() {
        let bound = CellBound::new(0.25, 0.75);
        assert_eq!(bound.clamp(1.0), 0.75);
        assert_eq!(bound.clamp(-1.0), 0.25);
        assert_eq!(bound.clamp(0.5), 0.5);
        assert!(bound.contains(0.25));
        assert!(!bound.contains(0.8));

        let bounds = BoundsMatrix::uniform(1, 2);
        assert!(bounds.contains(&[0.0, 2.0], 0.0));
        assert!(!bounds.contains(&[0.0, 2.1], 1e-9));
        assert!(!bounds.contains(&[0.0], 0.0));
    }
}
