//! CLI argument parsing via `clap`.
//!
//! clap's generated help and version flags are disabled: `--help` prints the
//! static `HELP` text and `--version` prints the bare package version.

use crate::reporters::ReporterChoice;
use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(
    name = "hint",
    disable_help_flag = true,
    disable_version_flag = true
)]
/// Raw command-line surface.
pub struct Cli {
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,
    #[arg(long, action = ArgAction::SetTrue)]
    pub help: bool,
    #[arg(long, action = ArgAction::SetTrue)]
    pub version: bool,
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,
    #[arg(long, value_name = "PATH")]
    pub reporter: Option<String>,
    #[arg(long = "jslint-reporter", action = ArgAction::SetTrue)]
    pub jslint_reporter: bool,
    #[arg(long = "show-non-errors", action = ArgAction::SetTrue)]
    pub show_non_errors: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A lint run requested on the command line.
pub struct LintRequest {
    pub files: Vec<String>,
    pub config: Option<String>,
    pub reporter: ReporterChoice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// What the invocation should do.
pub enum Mode {
    Help,
    Version,
    Lint(LintRequest),
}

impl Cli {
    /// `--version` wins, then `--help`; no files also means help.
    pub fn mode(self) -> Mode {
        if self.version {
            return Mode::Version;
        }
        if self.help || self.files.is_empty() {
            return Mode::Help;
        }
        let reporter = ReporterChoice::from_flags(
            self.reporter.as_deref(),
            self.jslint_reporter,
            self.show_non_errors,
        );
        Mode::Lint(LintRequest {
            files: self.files,
            config: self.config,
            reporter,
        })
    }
}
