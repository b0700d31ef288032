//! Run banner, fatal error output and per-directory log callbacks.
//!
//! The log stream is the only place per-directory failures are reported;
//! no summary is printed at the end of a run.

use crate::config::Verbosity;
use crate::workspace::{RefreshCallbacks, RefreshOutcome, RefreshResult, RefreshStep, dir_name};
use colored::Colorize;
use std::path::Path;

/// Null object for when nothing needs to observe a refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOpCallbacks;

impl RefreshCallbacks for NoOpCallbacks {
    fn on_complete(&self, _result: &RefreshResult) {}
}

/// Logs each directory's progress and outcome through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingCallbacks;

impl RefreshCallbacks for LoggingCallbacks {
    fn on_start(&self, path: &Path) {
        tracing::info!(dir = %dir_name(path), "Refreshing {}", path.display());
    }

    fn on_step(&self, path: &Path, step: RefreshStep) {
        tracing::debug!(dir = %dir_name(path), %step, "running git {}", step);
    }

    fn on_complete(&self, result: &RefreshResult) {
        let secs = format!("{:.2}s", result.duration.as_secs_f32());
        match &result.outcome {
            RefreshOutcome::Success => {
                tracing::info!(dir = %result.name(), elapsed = %secs, "up to date");
            }
            RefreshOutcome::Failed(failure) => {
                tracing::error!(
                    dir = %result.name(),
                    step = %failure.step,
                    elapsed = %secs,
                    "Error at {}: {:?}",
                    result.path.display(),
                    failure.error
                );
            }
        }
    }
}

/// Run banner, or `None` in quiet mode.
pub fn working_dir_banner(
    path: &Path,
    targets: usize,
    branch: &str,
    verbosity: Verbosity,
) -> Option<String> {
    if verbosity.is_quiet() {
        return None;
    }
    let mut banner = format!(
        "{} {} {}",
        "Refreshing in:".cyan(),
        path.display().to_string().white().bold(),
        format!("({} directories, branch {})", targets, branch).dimmed()
    );
    if targets == 0 {
        banner.push('\n');
        banner.push_str(&"No directories to refresh".yellow().bold().to_string());
    }
    Some(banner)
}

pub fn print_working_dir(path: &Path, targets: usize, branch: &str, verbosity: Verbosity) {
    if let Some(banner) = working_dir_banner(path, targets, branch, verbosity) {
        println!("{}", banner);
    }
}

fn fatal_message(error: &anyhow::Error) -> String {
    format!("{} {:#}", "error:".red().bold(), error)
}

/// Setup failures: one red line on stderr with the full context chain.
pub fn print_fatal(error: &anyhow::Error) {
    eprintln!("{}", fatal_message(error));
}
