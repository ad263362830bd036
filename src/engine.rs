//! Bridge to the external lint engine.
//!
//! The engine is a separate program. For every target file it receives one
//! JSON request on stdin and answers with a JSON array of findings on
//! stdout:
//!
//! ```text
//! stdin:  {"file": "a.js", "source": "...", "options": {"evil": true, "predef": ["$"]}}
//! stdout: [{"line": 3, "character": 5, "reason": "Missing semicolon.", "code": "W033"}]
//! ```

use crate::config::LintConfig;
use crate::error::{HintError, Result};
use crate::models::{Finding, Severity};
use crate::process::run_piped;
use serde::Deserialize;
use serde_json::json;
use std::process::Command;
use tracing::debug;

/// Environment variable naming the engine command.
pub const ENGINE_ENV: &str = "HINT_ENGINE";

/// Engine command used when `HINT_ENGINE` is unset.
pub const DEFAULT_ENGINE: &str = "hint-engine";

/// The lint capability: analyze one file's source under the given options.
pub trait Linter {
    fn analyze(&self, file: &str, source: &str, config: &LintConfig) -> Result<Vec<Finding>>;
}

#[derive(Deserialize)]
struct RawFinding {
    line: usize,
    #[serde(default, alias = "character", alias = "col")]
    column: Option<usize>,
    #[serde(alias = "reason")]
    message: String,
    #[serde(default)]
    severity: Option<Severity>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    evidence: Option<String>,
}

impl RawFinding {
    fn into_finding(self, file: &str) -> Finding {
        let severity = self
            .severity
            .unwrap_or_else(|| Severity::from_code(self.code.as_deref()));
        Finding {
            file: file.to_string(),
            line: self.line,
            column: self.column,
            message: self.message,
            severity,
            code: self.code,
            evidence: self.evidence,
        }
    }
}

/// Parse an engine response into findings for `file`.
pub fn parse_findings(file: &str, stdout: &str) -> Result<Vec<Finding>> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    let raw: Vec<RawFinding> = serde_json::from_str(trimmed).map_err(|e| HintError::Engine {
        file: file.to_string(),
        message: format!("invalid engine output: {}", e),
    })?;
    Ok(raw.into_iter().map(|r| r.into_finding(file)).collect())
}

#[derive(Debug, Clone)]
/// Runs an external engine program once per file.
pub struct CommandLinter {
    program: String,
    args: Vec<String>,
}

impl CommandLinter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        CommandLinter {
            program: program.into(),
            args,
        }
    }

    /// Build from a whitespace-separated command line such as `node engine.js`.
    pub fn from_command_line(line: &str) -> Self {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next().unwrap_or_else(|| DEFAULT_ENGINE.to_string());
        CommandLinter::new(program, parts.collect())
    }

    /// Engine from `HINT_ENGINE`, falling back to `hint-engine`.
    pub fn from_env() -> Self {
        let line = std::env::var(ENGINE_ENV).unwrap_or_default();
        CommandLinter::from_command_line(&line)
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Linter for CommandLinter {
    fn analyze(&self, file: &str, source: &str, config: &LintConfig) -> Result<Vec<Finding>> {
        let engine_err = |message: String| HintError::Engine {
            file: file.to_string(),
            message,
        };
        let request = json!({
            "file": file,
            "source": source,
            "options": config.to_json(),
        });
        debug!(engine = %self.program, file = %file, "invoking engine");
        let output = run_piped(
            Command::new(&self.program).args(&self.args),
            request.to_string().into_bytes(),
        )
        .map_err(|e| engine_err(format!("cannot run '{}': {}", self.program, e)))?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        if !output.status.success() && stdout.trim().is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(engine_err(format!(
                "exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        parse_findings(file, &stdout)
    }
}
