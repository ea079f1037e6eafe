//! Non-fatal observations about a staffing problem.

use std::fmt;

/// Absolute difference between total FTE and headcount that triggers
/// [`Diagnostic::FteMismatch`].
pub const FTE_MISMATCH_THRESHOLD: f64 = 0.5;

/// A warning about the problem instance. Never aborts a run.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// Project demand does not match the available workforce.
    FteMismatch { total_fte: f64, employee_count: usize },
}

impl Diagnostic {
    /// Returns a mismatch diagnostic when `|total_fte - employee_count|`
    /// reaches [`FTE_MISMATCH_THRESHOLD`].
    ///
    /// # Examples
    ///
    /// ```
    /// use wbsforge_core::Diagnostic;
    ///
    /// assert!(Diagnostic::fte_mismatch(2.4, 2).is_none());
    /// assert!(Diagnostic::fte_mismatch(2.0, 1).is_some());
    /// ```
    pub fn fte_mismatch(total_fte: f64, employee_count: usize) -> Option<Self> {
        if (total_fte - employee_count as f64).abs() >= FTE_MISMATCH_THRESHOLD {
            Some(Diagnostic::FteMismatch {
                total_fte,
                employee_count,
            })
        } else {
            None
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::FteMismatch {
                total_fte,
                employee_count,
            } => write!(f, "{:.2} ftes for {} employees", total_fte, employee_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        assert!(Diagnostic::fte_mismatch(2.5, 2).is_some());
        assert!(Diagnostic::fte_mismatch(1.5, 2).is_some());
        assert!(Diagnostic::fte_mismatch(2.49, 2).is_none());
        assert!(Diagnostic::fte_mismatch(0.0, 0).is_none());
    }

    #[test]
    fn test_display() {
        let d = Diagnostic::fte_mismatch(2.0, 1).unwrap();
        assert_eq!(d.to_string(), "2.00 ftes for 1 employees");
    }
}
