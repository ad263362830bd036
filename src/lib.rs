//! hint core library.
//!
//! A command-line front-end for an external JavaScript lint engine. It
//! resolves options from `.jshintrc` files and flags, filters targets through
//! `.jshintignore`, lints files one by one and hands the findings to a
//! reporter.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: `.jshintrc` discovery and merging.
//! - `ignore`: `.jshintignore` handling and target collection.
//! - `engine`: the `Linter` capability and the external engine bridge.
//! - `reporters`: built-in and external reporters, and their registry.
//! - `dispatch`: invocation driver producing output and an exit code.
//! - `models`: findings and the report structure.
//! - `error`: error taxonomy.
//! - `utils`: terminal helpers.
//! - `process`: child processes fed on stdin (engine, external reporters).
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod ignore;
pub mod models;
mod process;
pub mod reporters;
pub mod utils;

pub use error::{HintError, Result};
