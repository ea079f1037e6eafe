//! Plain-text result table.
//!
//! ```text
//!                      apollo     gemini
//! alice      (1.00)    0.50       0.50
//! bob        (1.00)    0.50       0.50
//! Penalty: 0.00
//! ```
//!
//! Values are left-justified in ten-character cells; padding is kept on
//! the right, so lines may end in spaces.

use std::fmt::Write;

use wbsforge_core::{Diagnostic, StaffingProblem};
use wbsforge_solver::Solution;

const LABEL_WIDTH: usize = 20;
const CELL_WIDTH: usize = 10;

/// Renders the allocation table followed by the penalty line.
///
/// Rows follow the problem's employee order and columns its project order.
pub fn render_report(problem: &StaffingProblem, solution: &Solution) -> String {
    let mut out = String::new();

    let header = problem
        .projects()
        .iter()
        .map(|p| format!("{:<width$}", p.id, width = CELL_WIDTH))
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(out, "{} {}", " ".repeat(LABEL_WIDTH), header);

    for (i, employee) in problem.employees().iter().enumerate() {
        let label = format!(
            "{:<width$} ({:.2})",
            employee.id,
            solution.employee_load(i),
            width = CELL_WIDTH
        );
        let cells = solution
            .assignment
            .row(i)
            .iter()
            .map(|value| format!("{:<width$}", format!("{:.2}", value), width = CELL_WIDTH))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(out, "{:<width$} {}", label, cells, width = LABEL_WIDTH);
    }

    let _ = writeln!(out, "Penalty: {:.2}", solution.penalty);
    out
}

/// Renders a diagnostic as a `warning:` line, without a trailing newline.
pub fn render_diagnostic(diagnostic: &Diagnostic) -> String {
    format!("warning: {}", diagnostic)
}
