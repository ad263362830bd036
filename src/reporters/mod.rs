//! Reporter plugins and their registry.
//!
//! A reporter turns a `Report` into the text printed on stdout. Reporters are
//! looked up by key: built-ins are registered under `default`, `jslint` and
//! `non-errors`, embedders may register more, and `--reporter <path>` falls
//! back to running the file at `<path>` as an external reporter.

mod external;
mod jslint_xml;
mod non_error;
mod text;

pub use external::ExternalReporter;
pub use jslint_xml::JslintXmlReporter;
pub use non_error::NonErrorReporter;
pub use text::DefaultReporter;

use crate::error::{HintError, Result};
use crate::models::Report;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT: &str = "default";
pub const JSLINT: &str = "jslint";
pub const NON_ERRORS: &str = "non-errors";

/// Renders accumulated findings into user-facing output.
pub trait Reporter {
    fn name(&self) -> &str;
    fn render(&self, report: &Report) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Which reporter the command line asked for.
pub enum ReporterChoice {
    Default,
    NonErrors,
    JslintXml,
    /// `--reporter <path>`: a registry key or a path to an executable.
    Path(String),
}

impl ReporterChoice {
    /// Precedence: `--reporter` > `--jslint-reporter` > `--show-non-errors` > default.
    pub fn from_flags(reporter: Option<&str>, jslint: bool, non_errors: bool) -> Self {
        if let Some(p) = reporter {
            ReporterChoice::Path(p.to_string())
        } else if jslint {
            ReporterChoice::JslintXml
        } else if non_errors {
            ReporterChoice::NonErrors
        } else {
            ReporterChoice::Default
        }
    }
}

/// Reporters keyed by built-in name or path.
pub struct ReporterRegistry {
    entries: HashMap<String, Arc<dyn Reporter>>,
}

impl ReporterRegistry {
    /// Registry with nothing registered.
    pub fn empty() -> Self {
        ReporterRegistry {
            entries: HashMap::new(),
        }
    }

    /// Registry holding the three built-in reporters.
    pub fn with_builtins(color: bool) -> Self {
        let mut reg = ReporterRegistry::empty();
        reg.register(DEFAULT, Arc::new(DefaultReporter::new(color)));
        reg.register(NON_ERRORS, Arc::new(NonErrorReporter::new(color)));
        reg.register(JSLINT, Arc::new(JslintXmlReporter));
        reg
    }

    pub fn register(&mut self, key: impl Into<String>, reporter: Arc<dyn Reporter>) {
        self.entries.insert(key.into(), reporter);
    }

    pub fn get(&self, key: &str) -> Option<Arc<dyn Reporter>> {
        self.entries.get(key).cloned()
    }

    /// Pick exactly one reporter for this run.
    pub fn resolve(&self, choice: &ReporterChoice, cwd: &Path) -> Result<Arc<dyn Reporter>> {
        let builtin = |key: &str| {
            self.get(key).ok_or_else(|| HintError::Reporter {
                name: key.to_string(),
                message: "not registered".into(),
            })
        };
        match choice {
            ReporterChoice::Default => builtin(DEFAULT),
            ReporterChoice::NonErrors => builtin(NON_ERRORS),
            ReporterChoice::JslintXml => builtin(JSLINT),
            ReporterChoice::Path(p) => {
                if let Some(r) = self.get(p) {
                    return Ok(r);
                }
                let abs = cwd.join(p);
                if let Some(r) = self.get(&abs.to_string_lossy()) {
                    return Ok(r);
                }
                if !abs.is_file() {
                    return Err(HintError::MissingFile {
                        what: "reporter",
                        path: abs,
                    });
                }
                debug!(path = %abs.display(), "using external reporter");
                Ok(Arc::new(ExternalReporter::new(abs)))
            }
        }
    }
}
