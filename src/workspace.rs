// Target discovery, per-directory refresh, dispatch

use crate::config::Dispatch;
use crate::constants::{DEFAULT_DIR_NAME, HIDDEN_PREFIX, IGNORE_FILE};
use crate::git::Vcs;
use anyhow::Context;
use rayon::prelude::*;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStep {
    CheckingOut,
    Pulling,
}

impl fmt::Display for RefreshStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshStep::CheckingOut => write!(f, "checkout"),
            RefreshStep::Pulling => write!(f, "pull"),
        }
    }
}

#[derive(Debug)]
pub struct RefreshResult {
    pub path: PathBuf,
    pub outcome: RefreshOutcome,
    pub duration: Duration,
}

#[derive(Debug)]
pub struct RefreshFailure {
    pub step: RefreshStep,
    pub error: anyhow::Error,
}

#[derive(Debug)]
pub enum RefreshOutcome {
    Success,
    Failed(RefreshFailure),
}

impl RefreshResult {
    pub fn name(&self) -> String {
        dir_name(&self.path)
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, RefreshOutcome::Success)
    }
}

/// Observer for per-directory progress. Called from worker threads in pooled mode.
pub trait RefreshCallbacks: Sync {
    fn on_start(&self, _path: &Path) {}
    fn on_step(&self, _path: &Path, _step: RefreshStep) {}
    fn on_complete(&self, result: &RefreshResult);
}

pub fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_DIR_NAME.to_string())
}

/// Names listed in `<root>/.refreshignore` plus `extra`.
///
/// Ignore file lines are trimmed and blank lines dropped; `extra` is taken verbatim.
pub fn load_skip_set(root: &Path, extra: &[String]) -> anyhow::Result<HashSet<String>> {
    let ignore_file = root.join(IGNORE_FILE);
    let mut skips = HashSet::new();

    if ignore_file.is_file() {
        let content = std::fs::read_to_string(&ignore_file)
            .with_context(|| format!("Failed to read {}", ignore_file.display()))?;
        skips.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string),
        );
    }

    skips.extend(extra.iter().cloned());
    Ok(skips)
}

fn is_candidate(path: &Path, skips: &HashSet<String>) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy();
    path.is_dir() && !name.starts_with(HIDDEN_PREFIX) && !skips.contains(name.as_ref())
}

/// Immediate child directories of `root` that are neither hidden nor skipped,
/// sorted by name.
pub fn find_targets(root: &Path, skips: &HashSet<String>) -> anyhow::Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(root)
        .with_context(|| format!("Failed to list directory {}", root.display()))?;

    let mut targets: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(e) => Some(e.path()),
            Err(e) => {
                tracing::warn!(root = %root.display(), "skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|p| is_candidate(p, skips))
        .collect();

    targets.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    for target in &targets {
        tracing::debug!("Adding path {}", target.display());
    }
    Ok(targets)
}

fn at_step<T>(step: RefreshStep, result: anyhow::Result<T>) -> Result<T, RefreshFailure> {
    result.map_err(|error| RefreshFailure { step, error })
}

/// Checks out `branch` then pulls. A failed checkout skips the pull.
pub fn refresh<V, C>(path: &Path, vcs: &V, branch: &str, callbacks: &C) -> RefreshResult
where
    V: Vcs + ?Sized,
    C: RefreshCallbacks + ?Sized,
{
    let start = Instant::now();
    callbacks.on_start(path);

    let outcome = match do_refresh(path, vcs, branch, callbacks) {
        Ok(()) => RefreshOutcome::Success,
        Err(failure) => RefreshOutcome::Failed(failure),
    };

    let result = RefreshResult {
        path: path.to_path_buf(),
        outcome,
        duration: start.elapsed(),
    };
    callbacks.on_complete(&result);
    result
}

fn do_refresh<V, C>(
    path: &Path,
    vcs: &V,
    branch: &str,
    callbacks: &C,
) -> Result<(), RefreshFailure>
where
    V: Vcs + ?Sized,
    C: RefreshCallbacks + ?Sized,
{
    callbacks.on_step(path, RefreshStep::CheckingOut);
    at_step(RefreshStep::CheckingOut, vcs.checkout(path, branch))?;

    callbacks.on_step(path, RefreshStep::Pulling);
    at_step(RefreshStep::Pulling, vcs.pull(path))?;

    Ok(())
}

/// Refreshes every target, sequentially or on a pool of `dispatch.workers()`
/// threads. Returns once every target has been processed.
///
/// Only setup of the pool can fail; per-directory failures go to `callbacks`.
pub fn refresh_all<V, C>(
    targets: &[PathBuf],
    vcs: &V,
    branch: &str,
    dispatch: Dispatch,
    callbacks: &C,
) -> anyhow::Result<()>
where
    V: Vcs + ?Sized,
    C: RefreshCallbacks + ?Sized,
{
    match dispatch {
        Dispatch::Sequential => {
            for path in targets {
                refresh(path, vcs, branch, callbacks);
            }
        }
        Dispatch::Pooled(workers) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers.get())
                .thread_name(|i| format!("refresh-{}", i))
                .build()
                .context("Failed to build worker pool")?;

            pool.install(|| {
                targets.par_iter().for_each(|path| {
                    refresh(path, vcs, branch, callbacks);
                });
            });
        }
    }
    Ok(())
}
