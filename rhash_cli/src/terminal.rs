//! Terminal detection

use is_terminal::IsTerminal;
use std::env;
use std::io::{stderr, stdout};

/// Detect if running in a CI environment
fn is_ci_environment() -> bool {
    let ci_vars = [
        "CI",
        "CONTINUOUS_INTEGRATION",
        "JENKINS_URL",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "BUILDKITE",
        "TF_BUILD",
    ];

    ci_vars.iter().any(|var| env::var(var).is_ok())
}

/// Whether progress bars can be drawn on stderr
pub fn should_show_progress() -> bool {
    if !stderr().is_terminal() || is_ci_environment() {
        return false;
    }
    let term = env::var("TERM").unwrap_or_default();
    cfg!(windows) || !(term.is_empty() || term == "dumb")
}

/// Whether stdout is attached to a terminal, so colored output is readable
pub fn stdout_is_terminal() -> bool {
    stdout().is_terminal()
}
