//! Default reporter: one line per failing finding and an error count.

use super::{Reporter, DEFAULT};
use crate::error::Result;
use crate::models::{Finding, Report};
use owo_colors::OwoColorize;

pub struct DefaultReporter {
    color: bool,
}

impl DefaultReporter {
    pub fn new(color: bool) -> Self {
        DefaultReporter { color }
    }
}

/// `<file>: line <l>, col <c>, <message>`, with the column omitted when unknown.
pub(crate) fn finding_line(f: &Finding, color: bool) -> String {
    let file = if color {
        f.file.bold().to_string()
    } else {
        f.file.clone()
    };
    match f.column {
        Some(col) => format!("{}: line {}, col {}, {}\n", file, f.line, col, f.message),
        None => format!("{}: line {}, {}\n", file, f.line, f.message),
    }
}

/// Failure listing followed by the `N error(s)` trailer; empty when clean.
pub(crate) fn render_failures(report: &Report, color: bool) -> String {
    let mut out = String::new();
    let mut count = 0usize;
    for f in report.failures() {
        out.push_str(&finding_line(f, color));
        count += 1;
    }
    if count > 0 {
        let total = format!("{} error{}", count, if count == 1 { "" } else { "s" });
        out.push('\n');
        if color {
            out.push_str(&total.red().bold().to_string());
        } else {
            out.push_str(&total);
        }
        out.push('\n');
    }
    out
}

impl Reporter for DefaultReporter {
    fn name(&self) -> &str {
        DEFAULT
    }

    fn render(&self, report: &Report) -> Result<String> {
        Ok(render_failures(report, self.color))
    }
}
