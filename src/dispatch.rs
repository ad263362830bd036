//! Invocation driver: arguments in, rendered output and exit code out.
//!
//! Files are read and linted one at a time in target order. The first fatal
//! error (missing file, engine failure) aborts the run.

use crate::cli::{Cli, LintRequest, Mode};
use crate::config::{self, Environment, LintConfig};
use crate::engine::Linter;
use crate::error::{HintError, Result};
use crate::ignore;
use crate::models::Report;
use crate::reporters::ReporterRegistry;
use clap::Parser;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use tracing::debug;

/// Static text printed for `--help` or when no files are given.
pub const HELP: &str = include_str!("../HELP");

/// Exit code when no error or warning was reported.
pub const EXIT_CLEAN: i32 = 0;
/// Exit code when at least one error or warning was reported.
pub const EXIT_FINDINGS: i32 = 1;
/// Exit code for fatal errors.
pub const EXIT_FATAL: i32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Text for stdout and the process exit code.
pub struct Outcome {
    pub output: String,
    pub exit_code: i32,
}

/// `<version>\n` from the package metadata.
pub fn version_line() -> String {
    format!("{}\n", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone)]
/// Resolved inputs of a lint run.
pub struct Plan {
    pub config: LintConfig,
    pub targets: Vec<String>,
}

/// Resolve config and the ignore-filtered targets for `req`.
pub fn plan(req: &LintRequest, env: &Environment) -> Result<Plan> {
    let config = config::resolve(env, req.config.as_deref())?;
    let ignore = ignore::load(&env.cwd)?;
    let targets = ignore::collect_targets(&req.files, &ignore, &env.cwd);
    debug!(targets = targets.len(), "planned lint run");
    Ok(Plan { config, targets })
}

/// Lint every target in order and gather the findings.
pub fn lint_files(
    targets: &[String],
    config: &LintConfig,
    env: &Environment,
    linter: &dyn Linter,
) -> Result<Report> {
    let mut findings = Vec::new();
    for t in targets {
        let path = env.resolve(t);
        if !path.is_file() {
            return Err(HintError::MissingFile {
                what: "source file",
                path,
            });
        }
        let source = fs::read_to_string(&path).map_err(|e| HintError::io(&path, e))?;
        let found = linter.analyze(t, &source, config)?;
        debug!(file = %t, findings = found.len(), "linted");
        findings.extend(found);
    }
    Ok(Report::new(targets.to_vec(), findings))
}

/// Run a lint request through config resolution, linting and reporting.
pub fn run_lint(
    req: &LintRequest,
    env: &Environment,
    linter: &dyn Linter,
    registry: &ReporterRegistry,
) -> Result<Outcome> {
    let reporter = registry.resolve(&req.reporter, &env.cwd)?;
    let plan = plan(req, env)?;
    let report = lint_files(&plan.targets, &plan.config, env, linter)?;
    let output = reporter.render(&report)?;
    let exit_code = if report.has_failures() {
        EXIT_FINDINGS
    } else {
        EXIT_CLEAN
    };
    Ok(Outcome { output, exit_code })
}

/// Write the rendered output and flush.
///
/// A reader that went away (`hint ... | head`) is not an error; the exit
/// code still reflects the findings.
pub fn write_outcome<W: Write>(out: &mut W, outcome: &Outcome) -> io::Result<()> {
    match out
        .write_all(outcome.output.as_bytes())
        .and_then(|()| out.flush())
    {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

/// Interpret a full argument vector (program name first).
pub fn interpret<I, T>(
    args: I,
    env: &Environment,
    linter: &dyn Linter,
    registry: &ReporterRegistry,
) -> Result<Outcome>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args).map_err(|e| HintError::Usage(e.to_string()))?;
    match cli.mode() {
        Mode::Help => Ok(Outcome {
            output: HELP.to_string(),
            exit_code: EXIT_CLEAN,
        }),
        Mode::Version => Ok(Outcome {
            output: version_line(),
            exit_code: EXIT_CLEAN,
        }),
        Mode::Lint(req) => run_lint(&req, env, linter, registry),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RC_FILE;
    use crate::models::{Finding, Severity};
    use crate::reporters::Reporter;
    use serde_json::Value as Json;
    use std::cell::RefCell;
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use tempfile::{tempdir, TempDir};

    /// Records every call and reports one warning for files named `bad*.js`.
    #[derive(Default)]
    struct RecordingLinter {
        calls: RefCell<Vec<(String, String, LintConfig)>>,
    }

    impl Linter for RecordingLinter {
        fn analyze(&self, file: &str, source: &str, config: &LintConfig) -> Result<Vec<Finding>> {
            self.calls
                .borrow_mut()
                .push((file.to_string(), source.to_string(), config.clone()));
            if Path::new(file)
                .file_name()
                .is_some_and(|n| n.to_string_lossy().starts_with("bad"))
            {
                return Ok(vec![Finding {
                    file: file.to_string(),
                    line: 1,
                    column: Some(4),
                    message: "Missing semicolon.".into(),
                    severity: Severity::Warning,
                    code: Some("W033".into()),
                    evidence: None,
                }]);
            }
            Ok(Vec::new())
        }
    }

    impl RecordingLinter {
        fn files(&self) -> Vec<String> {
            self.calls.borrow().iter().map(|c| c.0.clone()).collect()
        }
        fn last_config(&self) -> LintConfig {
            self.calls.borrow().last().unwrap().2.clone()
        }
    }

    struct Capture {
        seen: Mutex<Option<Report>>,
    }

    impl Reporter for Capture {
        fn name(&self) -> &str {
            "capture"
        }
        fn render(&self, report: &Report) -> Result<String> {
            *self.seen.lock().unwrap() = Some(report.clone());
            Ok("captured\n".into())
        }
    }

    struct Sandbox {
        home: TempDir,
        cwd: TempDir,
    }

    impl Sandbox {
        fn new() -> Self {
            Sandbox {
                home: tempdir().unwrap(),
                cwd: tempdir().unwrap(),
            }
        }
        fn env(&self) -> Environment {
            Environment::new(Some(self.home.path().to_path_buf()), self.cwd.path())
        }
        fn write(&self, rel: &str, text: &str) {
            let p = self.cwd.path().join(rel);
            if let Some(parent) = p.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(p, text).unwrap();
        }
        fn run(&self, args: &[&str], linter: &RecordingLinter) -> Result<Outcome> {
            let reg = ReporterRegistry::with_builtins(false);
            interpret(args, &self.env(), linter, &reg)
        }
    }

    #[test]
    fn test_no_args_prints_help_exactly() {
        let sb = Sandbox::new();
        let linter = RecordingLinter::default();
        let out = sb.run(&["hint"], &linter).unwrap();
        assert_eq!(out.output, HELP);
        assert_eq!(out.exit_code, EXIT_CLEAN);
        assert!(linter.files().is_empty());
    }

    #[test]
    fn test_help_flag_skips_linting() {
        let sb = Sandbox::new();
        sb.write("file.js", "var a;");
        let linter = RecordingLinter::default();
        let out = sb.run(&["hint", "file.js", "--help"], &linter).unwrap();
        assert_eq!(out.output, HELP);
        assert!(linter.files().is_empty());
    }

    #[test]
    fn test_version_prints_package_version() {
        let sb = Sandbox::new();
        let linter = RecordingLinter::default();
        let out = sb.run(&["hint", "--version"], &linter).unwrap();
        assert_eq!(out.output, format!("{}\n", env!("CARGO_PKG_VERSION")));
        assert!(linter.files().is_empty());
    }

    #[test]
    fn test_project_rc_merged_into_engine_options() {
        let sb = Sandbox::new();
        sb.write(RC_FILE, r#"{"evil":true,"predef":["Monkeys","Elephants"]}"#);
        sb.write("file.js", "eval('1');");
        sb.write("file2.js", "var b;");
        let linter = RecordingLinter::default();
        sb.run(&["hint", "file.js", "file2.js"], &linter).unwrap();
        let cfg = linter.last_config();
        assert_eq!(cfg.option("evil"), Some(&Json::Bool(true)));
        assert!(cfg.predef.contains(&"Monkeys".to_string()));
        assert!(cfg.predef.contains(&"Elephants".to_string()));
    }

    #[test]
    fn test_explicit_config_beats_ambient_files() {
        let sb = Sandbox::new();
        fs::write(
            sb.home.path().join(RC_FILE),
            r#"{"evil": false, "predef": ["home"]}"#,
        )
        .unwrap();
        sb.write(RC_FILE, r#"{"evil": false, "predef": ["project"]}"#);
        sb.write("file.json", r#"{"evil": true, "predef": ["explicit"]}"#);
        sb.write("file.js", "");
        sb.write("file2.js", "");
        let linter = RecordingLinter::default();
        sb.run(
            &["hint", "file2.js", "file.js", "--config", "file.json"],
            &linter,
        )
        .unwrap();
        assert_eq!(linter.files(), vec!["file2.js", "file.js"]);
        let cfg = linter.last_config();
        assert_eq!(cfg.option("evil"), Some(&Json::Bool(true)));
        assert_eq!(cfg.predef, vec!["home", "project", "explicit"]);
    }

    #[test]
    fn test_ignore_file_excludes_targets_before_linting() {
        let sb = Sandbox::new();
        sb.write(ignore::IGNORE_FILE, "dir\nfile.js\n");
        sb.write("file.js", "");
        sb.write("dir/inner.js", "");
        sb.write("other.js", "");
        let linter = RecordingLinter::default();
        let req = LintRequest {
            files: vec!["file.js".into(), "dir".into(), "other.js".into()],
            config: None,
            reporter: crate::reporters::ReporterChoice::Default,
        };
        let p = plan(&req, &sb.env()).unwrap();
        assert_eq!(
            ignore::load(sb.cwd.path()).unwrap().entries(),
            ["dir", "file.js"]
        );
        assert_eq!(p.targets, vec!["other.js"]);
        sb.run(&["hint", "file.js", "dir", "other.js"], &linter)
            .unwrap();
        assert_eq!(linter.files(), vec!["other.js"]);
    }

    #[test]
    fn test_registered_reporter_receives_all_findings() {
        let sb = Sandbox::new();
        sb.write("bad.js", "a = 1");
        sb.write("good.js", "var a = 1;");
        let capture = Arc::new(Capture {
            seen: Mutex::new(None),
        });
        let mut reg = ReporterRegistry::with_builtins(false);
        reg.register(
            sb.cwd.path().join("my/reporter").to_string_lossy(),
            capture.clone(),
        );
        let linter = RecordingLinter::default();
        let out = interpret(
            ["hint", "bad.js", "good.js", "--reporter", "my/reporter", "--jslint-reporter"],
            &sb.env(),
            &linter,
            &reg,
        )
        .unwrap();
        assert_eq!(out.output, "captured\n");
        assert_eq!(out.exit_code, EXIT_FINDINGS);
        let seen = capture.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.files, vec!["bad.js", "good.js"]);
        assert_eq!(seen.findings.len(), 1);
        assert_eq!(seen.findings[0].file, "bad.js");
    }

    #[test]
    fn test_default_reporter_output_and_exit_codes() {
        let sb = Sandbox::new();
        sb.write("bad.js", "a = 1");
        sb.write("good.js", "");
        let linter = RecordingLinter::default();
        let out = sb.run(&["hint", "bad.js"], &linter).unwrap();
        assert_eq!(
            out.output,
            "bad.js: line 1, col 4, Missing semicolon.\n\n1 error\n"
        );
        assert_eq!(out.exit_code, EXIT_FINDINGS);
        let clean = sb.run(&["hint", "good.js"], &linter).unwrap();
        assert_eq!(clean.output, "");
        assert_eq!(clean.exit_code, EXIT_CLEAN);
    }

    #[test]
    fn test_source_text_is_passed_to_engine() {
        let sb = Sandbox::new();
        sb.write("a.js", "var answer = 42;\n");
        let linter = RecordingLinter::default();
        sb.run(&["hint", "a.js"], &linter).unwrap();
        assert_eq!(linter.calls.borrow()[0].1, "var answer = 42;\n");
    }

    #[test]
    fn test_missing_source_file_is_fatal() {
        let sb = Sandbox::new();
        sb.write("a.js", "");
        let linter = RecordingLinter::default();
        let err = sb.run(&["hint", "a.js", "missing.js"], &linter).unwrap_err();
        assert!(matches!(err, HintError::MissingFile { what: "source file", .. }));
    }

    #[test]
    fn test_missing_reporter_aborts_before_linting() {
        let sb = Sandbox::new();
        sb.write("a.js", "");
        let linter = RecordingLinter::default();
        let err = sb
            .run(&["hint", "a.js", "--reporter", "nope.sh"], &linter)
            .unwrap_err();
        assert!(matches!(err, HintError::MissingFile { what: "reporter", .. }));
        assert!(linter.files().is_empty());
    }

    struct FailingWriter(io::ErrorKind);

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(self.0, "closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_outcome_tolerates_closed_reader_only() {
        let outcome = Outcome {
            output: "a.js: line 1, col 1, Missing semicolon.\n".into(),
            exit_code: EXIT_FINDINGS,
        };
        let mut buf = Vec::new();
        write_outcome(&mut buf, &outcome).unwrap();
        assert_eq!(buf, outcome.output.as_bytes());
        assert!(write_outcome(&mut FailingWriter(io::ErrorKind::BrokenPipe), &outcome).is_ok());
        let err = write_outcome(&mut FailingWriter(io::ErrorKind::Other), &outcome).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
    }

    #[test]
    fn test_unknown_flag_is_usage_error() {
        let sb = Sandbox::new();
        let linter = RecordingLinter::default();
        let err = sb.run(&["hint", "a.js", "--nope"], &linter).unwrap_err();
        assert!(matches!(err, HintError::Usage(_)));
    }
}
