//! `.jshintignore` loading and target collection.
//!
//! Each non-empty line of the ignore file is an entry. An entry excludes a
//! target when it equals the target path, when it is a leading directory of
//! it, or when it is a glob pattern that matches it. Paths are compared
//! relative to the working directory with `./` removed.

use crate::error::{HintError, Result};
use glob::Pattern;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Name of the ignore file looked up in the working directory.
pub const IGNORE_FILE: &str = ".jshintignore";

/// Extension of files picked up when a target is a directory.
pub const SOURCE_EXT: &str = "js";

#[derive(Debug, Clone, Default)]
/// Ordered ignore entries with their compiled glob form, when they have one.
pub struct IgnoreList {
    entries: Vec<String>,
    patterns: Vec<Option<Pattern>>,
}

impl IgnoreList {
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = IgnoreList::default();
        for e in entries {
            let e: String = e.into();
            let trimmed = e.trim();
            if trimmed.is_empty() {
                continue;
            }
            let pattern = if trimmed.contains(['*', '?', '[']) {
                Pattern::new(trimmed).ok()
            } else {
                None
            };
            list.entries.push(trimmed.to_string());
            list.patterns.push(pattern);
        }
        list
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `path` (absolute or relative to `cwd`) is excluded.
    pub fn is_ignored(&self, path: &Path, cwd: &Path) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        let rel = normalize(path, cwd);
        self.entries
            .iter()
            .zip(self.patterns.iter())
            .any(|(entry, pattern)| {
                let entry_path = normalize(Path::new(entry), cwd);
                if rel == entry_path || rel.starts_with(&entry_path) {
                    return true;
                }
                pattern.as_ref().is_some_and(|p| p.matches_path(&rel))
            })
    }
}

fn normalize(path: &Path, cwd: &Path) -> PathBuf {
    let rel = if path.is_absolute() {
        pathdiff::diff_paths(path, cwd).unwrap_or_else(|| path.to_path_buf())
    } else {
        path.to_path_buf()
    };
    rel.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Load `<cwd>/.jshintignore`. A missing file is an empty list.
pub fn load(cwd: &Path) -> Result<IgnoreList> {
    let path = cwd.join(IGNORE_FILE);
    if !path.is_file() {
        return Ok(IgnoreList::default());
    }
    let text = fs::read_to_string(&path).map_err(|e| HintError::io(&path, e))?;
    let list = IgnoreList::from_entries(text.lines());
    debug!(path = %path.display(), entries = list.entries.len(), "loaded ignore file");
    Ok(list)
}

/// Build the ordered target list from command-line paths.
///
/// Ignored paths are dropped. Directories are expanded to the `.js` files
/// beneath them, sorted. Other paths are kept as given, whether or not they
/// exist; reading them later reports missing files.
pub fn collect_targets(files: &[String], ignore: &IgnoreList, cwd: &Path) -> Vec<String> {
    let mut out = Vec::new();
    for f in files {
        let given = Path::new(f);
        if ignore.is_ignored(given, cwd) {
            debug!(file = %f, "ignored");
            continue;
        }
        let abs = cwd.join(given);
        if abs.is_dir() {
            for p in expand_dir(&abs) {
                let shown = match p.strip_prefix(&abs) {
                    Ok(rest) => given.join(rest),
                    Err(_) => p.clone(),
                };
                if ignore.is_ignored(&shown, cwd) {
                    debug!(file = %shown.display(), "ignored");
                    continue;
                }
                out.push(shown.to_string_lossy().to_string());
            }
        } else {
            out.push(f.clone());
        }
    }
    out
}

fn expand_dir(dir: &Path) -> Vec<PathBuf> {
    let pattern = format!(
        "{}/**/*.{}",
        Pattern::escape(&dir.to_string_lossy()),
        SOURCE_EXT
    );
    let mut found: Vec<PathBuf> = match glob::glob(&pattern) {
        Ok(paths) => paths.filter_map(|p| p.ok()).filter(|p| p.is_file()).collect(),
        Err(_) => Vec::new(),
    };
    found.sort();
    found
}
