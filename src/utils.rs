//! Terminal helpers shared by the binary and the reporters.

use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// Colors are used only on a terminal and only when `NO_COLOR` is unset.
pub fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

fn stderr_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
}

pub fn error_prefix() -> String {
    if stderr_colors() {
        "✖ error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}
