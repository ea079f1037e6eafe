//! Colorful console output for WBSForge runs.
//!
//! Provides a custom `tracing` layer that formats solver events with colors,
//! and the plain-text result table in [`report`].
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (solve start/end)
//! - **WARN**: Non-converged runs. Instance diagnostics are left to the
//!   `warning:` line of [`report::render_diagnostic`].
//! - **DEBUG**: Progress updates (about once per second)
//! - **TRACE**: Individual minimizer steps

pub mod report;

use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub use report::{render_diagnostic, render_report};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "wbsforge_solver=info";

/// Initializes console logging.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner to stderr and sets up tracing. Log lines go to
/// stderr so the report on stdout stays clean.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SolverConsoleLayer)
            .try_init();
    });
}

// Marks the start of solving for elapsed time tracking.
fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since solve start.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 _    _ ____  ____  _____
| |  | | __ )/ ___||  ___|__  _ __ __ _  ___
| |/\| |  _ \\___ \| |_ / _ \| '__/ _` |/ _ \
\  /\  / |_) |___) |  _| (_) | | | (_| |  __/
 \/  \/|____/|____/|_|  \___/|_|  \__, |\___|
                                  |___/
"#;

    let version_line = format!("            v{} - FTE Allocation Optimizer\n", VERSION);

    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "{}", banner.bright_cyan());
    let _ = writeln!(stderr, "{}", version_line.bright_white().bold());
    let _ = stderr.flush();
}

/// A tracing layer that formats solver events with colors.
pub struct SolverConsoleLayer;

impl<S: Subscriber> Layer<S> for SolverConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();

        if !target.starts_with("wbsforge_solver") && !target.starts_with("wbsforge::") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    status: Option<String>,
    minimizer: Option<String>,
    score: Option<f64>,
    penalty: Option<f64>,
    step: Option<u64>,
    steps: Option<u64>,
    calcs: Option<u64>,
    iterations: Option<u64>,
    evaluations: Option<u64>,
    employee_count: Option<u64>,
    project_count: Option<u64>,
    variable_count: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        let s = s.trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "status" => self.status = Some(s),
            "minimizer" => self.minimizer = Some(s),
            _ => {}
        }
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "score" => self.score = Some(value),
            "penalty" => self.penalty = Some(value),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "step" => self.step = Some(value),
            "steps" => self.steps = Some(value),
            "calcs" => self.calcs = Some(value),
            "iterations" => self.iterations = Some(value),
            "evaluations" => self.evaluations = Some(value),
            "employee_count" => self.employee_count = Some(value),
            "project_count" => self.project_count = Some(value),
            "variable_count" => self.variable_count = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "status" => self.status = Some(value.to_string()),
            "minimizer" => self.minimizer = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "progress" => format_progress(v),
        "step" => format_step(v, level),
        "not_converged" => format_warning(v.status.as_deref().unwrap_or("not converged")),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    let employees = v.employee_count.unwrap_or(0);
    let projects = v.project_count.unwrap_or(0);
    let variables = v.variable_count.unwrap_or(0);

    let mut output = format!(
        "{} {} Solving │ {} employees │ {} projects │ {} variables",
        format_elapsed(),
        "▶".bright_green().bold(),
        employees.bright_yellow(),
        projects.bright_yellow(),
        variables.bright_yellow(),
    );

    if let Some(minimizer) = &v.minimizer {
        output.push_str(&format!(" │ {}", minimizer.bright_magenta()));
    }

    output
}

fn format_solve_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("");
    let converged = status.starts_with("converged");

    let label = if converged {
        "CONVERGED".bright_green().bold().to_string()
    } else {
        "NOT CONVERGED".bright_red().bold().to_string()
    };

    format!(
        "{} {} Solving complete │ penalty {} │ {} iterations │ {} evaluations │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_penalty(v.penalty),
        v.iterations.unwrap_or(0).white(),
        v.evaluations.unwrap_or(0).white(),
        label
    )
}

fn format_progress(v: &EventVisitor) -> String {
    format!(
        "{} {} {:>10} steps │ {:>10} evaluations │ penalty {}",
        format_elapsed(),
        "⚡".bright_cyan(),
        v.steps.unwrap_or(0).white(),
        v.calcs.unwrap_or(0).bright_magenta(),
        format_penalty(v.score)
    )
}

fn format_step(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }

    format!(
        "{} {} Step {:>10} │ {}",
        format_elapsed(),
        "·".bright_black(),
        v.step.unwrap_or(0).bright_black(),
        format_penalty(v.score)
    )
}

fn format_warning(message: &str) -> String {
    format!(
        "{} {} {}",
        format_elapsed(),
        "⚠".bright_yellow().bold(),
        message.yellow()
    )
}

fn format_penalty(penalty: Option<f64>) -> String {
    match penalty {
        None => "N/A".white().to_string(),
        Some(p) if p.abs() < 1e-9 => format!("{:.6}", p).bright_green().to_string(),
        Some(p) => format!("{:.6}", p).yellow().to_string(),
    }
}
