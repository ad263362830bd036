//! hint CLI binary entry point.
//! Builds the process environment, runs the invocation and exits with its code.

use hint::config::Environment;
use hint::dispatch::{self, EXIT_FATAL};
use hint::engine::CommandLinter;
use hint::reporters::ReporterRegistry;
use hint::utils;
use hint::HintError;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "HINT_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let code = match Environment::from_process().and_then(|env| {
        let linter = CommandLinter::from_env();
        let registry = ReporterRegistry::with_builtins(utils::use_colors());
        dispatch::interpret(std::env::args_os(), &env, &linter, &registry)
    }) {
        Ok(outcome) => {
            match dispatch::write_outcome(&mut std::io::stdout(), &outcome) {
                Ok(()) => outcome.exit_code,
                Err(e) => {
                    eprintln!("{} cannot write output: {}", utils::error_prefix(), e);
                    EXIT_FATAL
                }
            }
        }
        Err(HintError::Usage(msg)) => {
            eprintln!("{}", msg.trim_end());
            EXIT_FATAL
        }
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            EXIT_FATAL
        }
    };
    std::process::exit(code);
}
