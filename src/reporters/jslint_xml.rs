//! JSLint-compatible XML reporter.

use super::{Reporter, JSLINT};
use crate::error::Result;
use crate::models::Report;
use quick_xml::escape::escape;

pub struct JslintXmlReporter;

impl Reporter for JslintXmlReporter {
    fn name(&self) -> &str {
        JSLINT
    }

    fn render(&self, report: &Report) -> Result<String> {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<jslint>\n");
        for file in report.distinct_files() {
            let issues: Vec<_> = report
                .findings_for(file)
                .filter(|f| f.severity.is_failure())
                .collect();
            if issues.is_empty() {
                continue;
            }
            out.push_str(&format!("\t<file name=\"{}\">\n", escape(file)));
            for f in issues {
                out.push_str(&format!(
                    "\t\t<issue line=\"{}\" char=\"{}\" reason=\"{}\" evidence=\"{}\" />\n",
                    f.line,
                    f.column.unwrap_or(0),
                    escape(f.message.as_str()),
                    escape(f.evidence.as_deref().unwrap_or(""))
                ));
            }
            out.push_str("\t</file>\n");
        }
        out.push_str("</jslint>\n");
        Ok(out)
    }
}
