//! Reporter that also shows informational findings and clean files.

use super::text::render_failures;
use super::{Reporter, NON_ERRORS};
use crate::error::Result;
use crate::models::{Report, Severity};
use owo_colors::OwoColorize;

pub struct NonErrorReporter {
    color: bool,
}

impl NonErrorReporter {
    pub fn new(color: bool) -> Self {
        NonErrorReporter { color }
    }
}

impl Reporter for NonErrorReporter {
    fn name(&self) -> &str {
        NON_ERRORS
    }

    fn render(&self, report: &Report) -> Result<String> {
        let mut out = render_failures(report, self.color);
        for file in report.distinct_files() {
            let mut any = false;
            let mut infos = String::new();
            for f in report.findings_for(file) {
                any = true;
                if f.severity == Severity::Info {
                    infos.push_str(&format!("\t{} (line {})\n", f.message, f.line));
                }
            }
            if !infos.is_empty() {
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push_str(&format!("{} :\n", file));
                out.push_str(&infos);
            } else if !any {
                let ok = format!("{}: no problems found", file);
                if self.color {
                    out.push_str(&ok.green().to_string());
                } else {
                    out.push_str(&ok);
                }
                out.push('\n');
            }
        }
        Ok(out)
    }
}
