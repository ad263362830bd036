//! Reporter backed by an executable chosen with `--reporter <path>`.
//!
//! The report is written to the program's stdin as JSON; whatever it prints
//! on stdout is the rendered output.

use super::Reporter;
use crate::error::{HintError, Result};
use crate::models::Report;
use crate::process::run_piped;
use std::path::PathBuf;
use std::process::Command;

pub struct ExternalReporter {
    path: PathBuf,
    name: String,
}

impl ExternalReporter {
    pub fn new(path: PathBuf) -> Self {
        let name = path.to_string_lossy().to_string();
        ExternalReporter { path, name }
    }
}

impl Reporter for ExternalReporter {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, report: &Report) -> Result<String> {
        let fail = |message: String| HintError::Reporter {
            name: self.name.clone(),
            message,
        };
        let payload = serde_json::to_vec(report).map_err(|e| fail(e.to_string()))?;
        let output = run_piped(&mut Command::new(&self.path), payload)
            .map_err(|e| fail(format!("cannot run: {}", e)))?;
        if !output.status.success() {
            return Err(fail(format!(
                "exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
