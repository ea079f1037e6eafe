//! `wbs` - allocate employees' FTE across projects from a settings file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;
use wbsforge_console::{render_diagnostic, render_report};

/// Allocate employees' FTE across projects.
#[derive(Parser, Debug)]
#[command(name = "wbs")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Settings file (YAML, or TOML when the name ends in `.toml`).
    settings: PathBuf,

    /// Skip the banner and solver log lines.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if !cli.quiet {
        wbsforge_console::init();
    }

    let settings = match wbsforge::Settings::load(&cli.settings) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!(
                "{} {}: {}",
                "error:".bright_red().bold(),
                cli.settings.display(),
                err
            );
            return ExitCode::FAILURE;
        }
    };

    match wbsforge::solve_settings(&settings) {
        Ok((problem, solution)) => {
            for diagnostic in &solution.diagnostics {
                eprintln!("{}", render_diagnostic(diagnostic).yellow());
            }
            print!("{}", render_report(&problem, &solution));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} {}", "error:".bright_red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_single_settings_argument() {
        let cli = Cli::try_parse_from(["wbs", "team.yml"]).unwrap();
        assert_eq!(cli.settings, PathBuf::from("team.yml"));
        assert!(!cli.quiet);
    }

    #[test]
    fn test_quiet_flag() {
        let cli = Cli::try_parse_from(["wbs", "--quiet", "team.toml"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_missing_settings_is_usage_error() {
        let err = Cli::try_parse_from(["wbs"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_extra_argument_is_usage_error() {
        let err = Cli::try_parse_from(["wbs", "a.yml", "b.yml"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }
}
