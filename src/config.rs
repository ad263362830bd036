//! Configuration discovery and effective lint options resolution.
//!
//! Sources, lowest precedence first:
//! - `<home>/.jshintrc`
//! - `<cwd>/.jshintrc`
//! - the file passed with `--config`
//!
//! Later sources replace earlier ones key by key (shallow). `predef` is the
//! exception: the lists from every source are unioned in first-seen order.
//!
//! Ambient files that do not exist contribute nothing. Once a file exists,
//! it must parse; a malformed file aborts the run.

use crate::error::{HintError, Result};
use serde_json::{Map, Value as Json};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the config file looked up in the home and working directories.
pub const RC_FILE: &str = ".jshintrc";

const PREDEF_KEY: &str = "predef";

#[derive(Debug, Clone)]
/// Process environment the resolver depends on, passed in explicitly.
pub struct Environment {
    pub home: Option<PathBuf>,
    pub cwd: PathBuf,
}

impl Environment {
    pub fn new(home: Option<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Environment {
            home,
            cwd: cwd.into(),
        }
    }

    /// Capture the current directory and the user's home directory.
    pub fn from_process() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| HintError::io(".", e))?;
        Ok(Environment {
            home: dirs::home_dir(),
            cwd,
        })
    }

    /// Resolve a user-supplied path against the working directory.
    pub fn resolve(&self, p: &str) -> PathBuf {
        self.cwd.join(p)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Merged lint options handed to the engine.
pub struct LintConfig {
    pub options: Map<String, Json>,
    pub predef: Vec<String>,
}

impl LintConfig {
    /// Parse a config document. `path` is only used for error messages.
    pub fn parse(path: &Path, text: &str) -> Result<Self> {
        let malformed = |message: String| HintError::MalformedConfig {
            path: path.to_path_buf(),
            message,
        };
        let stripped = strip_comments(text);
        let value: Json = serde_json::from_str(&stripped).map_err(|e| malformed(e.to_string()))?;
        let Json::Object(mut options) = value else {
            return Err(malformed("top level must be an object".into()));
        };
        let mut predef = Vec::new();
        if let Some(raw) = options.remove(PREDEF_KEY) {
            let Json::Array(items) = raw else {
                return Err(malformed("\"predef\" must be an array of strings".into()));
            };
            for it in items {
                match it {
                    Json::String(s) => push_unique(&mut predef, s),
                    other => {
                        return Err(malformed(format!(
                            "\"predef\" entries must be strings, found {}",
                            other
                        )))
                    }
                }
            }
        }
        Ok(LintConfig { options, predef })
    }

    /// Layer `other` on top of `self`: keys from `other` win, `predef` is unioned.
    pub fn merge(&mut self, other: LintConfig) {
        for (k, v) in other.options {
            self.options.insert(k, v);
        }
        for name in other.predef {
            push_unique(&mut self.predef, name);
        }
    }

    #[cfg(test)]
    pub(crate) fn option(&self, key: &str) -> Option<&Json> {
        self.options.get(key)
    }

    /// Options as a single JSON object, `predef` included when non-empty.
    pub fn to_json(&self) -> Json {
        let mut out = self.options.clone();
        if !self.predef.is_empty() {
            out.insert(
                PREDEF_KEY.to_string(),
                Json::Array(self.predef.iter().cloned().map(Json::String).collect()),
            );
        }
        Json::Object(out)
    }
}

fn push_unique(list: &mut Vec<String>, name: String) {
    if !list.contains(&name) {
        list.push(name);
    }
}

/// Load an ambient config file if present.
///
/// Absent or unreadable files yield `None`; a file that reads but does not
/// parse is an error.
pub fn load_ambient(path: &Path) -> Result<Option<LintConfig>> {
    if !path.is_file() {
        return Ok(None);
    }
    let text = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            return Ok(None);
        }
    };
    debug!(path = %path.display(), "loaded config");
    LintConfig::parse(path, &text).map(Some)
}

/// Load a config file named explicitly on the command line.
pub fn load_explicit(path: &Path) -> Result<LintConfig> {
    if !path.exists() {
        return Err(HintError::MissingFile {
            what: "config file",
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path).map_err(|e| HintError::io(path, e))?;
    debug!(path = %path.display(), "loaded explicit config");
    LintConfig::parse(path, &text)
}

/// Resolve the effective config: home `.jshintrc`, then cwd `.jshintrc`,
/// then the explicit `--config` file.
pub fn resolve(env: &Environment, explicit: Option<&str>) -> Result<LintConfig> {
    let mut cfg = LintConfig::default();
    if let Some(home) = env.home.as_ref() {
        if let Some(c) = load_ambient(&home.join(RC_FILE))? {
            cfg.merge(c);
        }
    }
    if let Some(c) = load_ambient(&env.cwd.join(RC_FILE))? {
        cfg.merge(c);
    }
    if let Some(p) = explicit {
        cfg.merge(load_explicit(&env.resolve(p))?);
    }
    Ok(cfg)
}

/// Remove `//` line and `/* */` block comments outside string literals.
pub fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;
    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(n) = chars.next() {
                        out.push(n);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        let next = chars.peek().copied();
        match (c, next) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for n in chars.by_ref() {
                    if n == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for n in chars.by_ref() {
                    if prev == '*' && n == '/' {
                        break;
                    }
                    // keep line numbers stable for parse errors
                    if n == '\n' {
                        out.push('\n');
                    }
                    prev = n;
                }
            }
            _ => out.push(c),
        }
    }
    out
}
