//! Shared data models for lint findings and the report handed to reporters.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Severity attached to a finding by the lint engine.
pub enum Severity {
    Error,
    #[serde(alias = "warn")]
    Warning,
    Info,
}

impl Severity {
    /// Errors and warnings fail the run; informational findings do not.
    pub fn is_failure(self) -> bool {
        matches!(self, Severity::Error | Severity::Warning)
    }

    /// Infer severity from a jshint-style code (`E001`, `W033`, `I003`).
    pub fn from_code(code: Option<&str>) -> Self {
        match code.and_then(|c| c.chars().next()) {
            Some('W') => Severity::Warning,
            Some('I') => Severity::Info,
            _ => Severity::Error,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A single issue reported for one file.
pub struct Finding {
    pub file: String,
    pub line: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    pub message: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Aggregated counts used by reporters and the exit code.
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub files: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Everything a reporter sees: linted files in input order and their findings.
pub struct Report {
    pub files: Vec<String>,
    pub findings: Vec<Finding>,
    pub summary: Summary,
}

impl Report {
    pub fn new(files: Vec<String>, findings: Vec<Finding>) -> Self {
        let mut summary = Summary {
            files: files.len(),
            ..Summary::default()
        };
        for f in &findings {
            match f.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
                Severity::Info => summary.infos += 1,
            }
        }
        Report {
            files,
            findings,
            summary,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.summary.errors + self.summary.warnings > 0
    }

    /// Findings reported against `file`, in engine order.
    pub fn findings_for<'a>(&'a self, file: &'a str) -> impl Iterator<Item = &'a Finding> + 'a {
        self.findings.iter().filter(move |f| f.file == file)
    }

    /// Linted file names without repeats, in first-seen order. A file given
    /// twice is linted twice, but its findings are already all under one name.
    pub fn distinct_files(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for f in &self.files {
            if !seen.contains(&f.as_str()) {
                seen.push(f);
            }
        }
        seen
    }

    pub fn failures(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.severity.is_failure())
    }
}
