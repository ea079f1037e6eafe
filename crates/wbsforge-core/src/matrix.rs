//! Row-major assignment matrix.

use std::fmt;

use crate::error::{Result, WbsError};

/// Fractional allocation of each employee (row) to each project (column).
///
/// Stored row-major so the backing slice is exactly the flat vector a
/// bounded minimizer works on. Row sums are employee loads, column sums are
/// the FTE each project receives.
///
/// # Examples
///
/// ```
/// use wbsforge_core::AssignmentMatrix;
///
/// let m = AssignmentMatrix::from_flat(2, 2, vec![0.5, 0.5, 0.25, 0.75]).unwrap();
/// assert_eq!(m.row_sum(0), 1.0);
/// assert_eq!(m.column_sum(1), 1.25);
/// ```
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl AssignmentMatrix {
    /// Creates the all-zero matrix (no assignment).
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Reshapes a flat row-major vector into a matrix.
    pub fn from_flat(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        let expected = rows * cols;
        if data.len() != expected {
            return Err(WbsError::DimensionMismatch {
                rows,
                cols,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the allocation of employee `row` to project `col`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    /// Returns one employee's allocations.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Total load of one employee. An empty row sums to `+0.0`.
    pub fn row_sum(&self, row: usize) -> f64 {
        self.row(row).iter().fold(0.0, |acc, v| acc + v)
    }

    /// Total FTE received by one project. An empty column sums to `+0.0`.
    pub fn column_sum(&self, col: usize) -> f64 {
        (0..self.rows).fold(0.0, |acc, row| acc + self.get(row, col))
    }

    /// Returns the flat row-major view.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn into_flat(self) -> Vec<f64> {
        self.data
    }
}

impl fmt::Debug for AssignmentMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for row in 0..self.rows {
            list.entry(&self.row(row));
        }
        list.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flat_rejects_wrong_length() {
        let err = AssignmentMatrix::from_flat(2, 3, vec![0.0; 5]).unwrap_err();
        assert_eq!(
            err,
            WbsError::DimensionMismatch {
                rows: 2,
                cols: 3,
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn test_row_and_column_sums() {
        let m = AssignmentMatrix::from_flat(2, 3, vec![0.1, 0.2, 0.3, 1.0, 0.0, 0.5]).unwrap();
        assert!((m.row_sum(0) - 0.6).abs() < 1e-12);
        assert!((m.row_sum(1) - 1.5).abs() < 1e-12);
        assert!((m.column_sum(0) - 1.1).abs() < 1e-12);
        assert!((m.column_sum(2) - 0.8).abs() < 1e-12);
        assert_eq!(m.row(1), &[1.0, 0.0, 0.5]);
    }

    #[test]
    fn test_empty_sums_are_positive_zero() {
        let m = AssignmentMatrix::zeros(1, 0);
        assert!(m.row_sum(0).is_sign_positive());
        assert_eq!(format!("{:.2}", m.row_sum(0)), "0.00");

        let m = AssignmentMatrix::zeros(0, 1);
        assert!(m.column_sum(0).is_sign_positive());
    }

    #[test]
    fn test_zeros_and_set() {
        let mut m = AssignmentMatrix::zeros(2, 2);
        assert_eq!(m.as_slice(), &[0.0; 4]);
        m.set(1, 0, 0.75);
        assert_eq!(m.get(1, 0), 0.75);
        assert_eq!(m.into_flat(), vec![0.0, 0.0, 0.75, 0.0]);
    }
}
