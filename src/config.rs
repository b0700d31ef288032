//! Configuration types: settings file, verbosity and dispatch mode.

use crate::constants::DEFAULT_WORKERS;
use anyhow::Context;
use std::num::NonZeroUsize;
use std::path::Path;
use tracing::metadata::LevelFilter;

/// Defaults read from `settings.ini`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Username used when `--username` is not given.
    pub username: Option<String>,
    /// Pool size used when `--workers` is not given.
    pub workers: NonZeroUsize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            username: None,
            workers: NonZeroUsize::new(DEFAULT_WORKERS).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl Settings {
    /// Reads settings from `path`.
    ///
    /// When `required` is false a missing file yields the defaults.
    pub fn load(path: &Path, required: bool) -> anyhow::Result<Self> {
        if !required && !path.is_file() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid settings file {}", path.display()))
    }

    /// Parses `key = value` lines. Comments (`#`, `;`), blank lines and
    /// `[section]` headers are skipped; unknown keys are ignored.
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let mut settings = Self::default();

        for (number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty()
                || line.starts_with('#')
                || line.starts_with(';')
                || line.starts_with('[')
            {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                anyhow::bail!("line {}: expected `key = value`, got {:?}", number + 1, line);
            };
            let value = value.trim();

            match key.trim() {
                "username" => {
                    settings.username = (!value.is_empty()).then(|| value.to_string());
                }
                "workers" => {
                    settings.workers = value.parse::<NonZeroUsize>().with_context(|| {
                        format!("line {}: workers must be a positive integer", number + 1)
                    })?;
                }
                other => tracing::debug!(key = other, "ignoring unknown setting"),
            }
        }

        Ok(settings)
    }
}

/// Verbosity level for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl Verbosity {
    #[must_use]
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (true, _) => Verbosity::Verbose,
            (false, true) => Verbosity::Quiet,
            (false, false) => Verbosity::Normal,
        }
    }

    #[must_use]
    pub fn is_quiet(&self) -> bool {
        *self == Verbosity::Quiet
    }

    #[must_use]
    pub fn level(&self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::WARN,
            Verbosity::Normal => LevelFilter::INFO,
            Verbosity::Verbose => LevelFilter::DEBUG,
        }
    }
}

/// How per-directory units are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// One directory after the other, in target order.
    Sequential,
    /// A fixed-size thread pool; completion order is unspecified.
    Pooled(NonZeroUsize),
}

impl Dispatch {
    /// A single worker means sequential execution.
    pub fn from_workers(workers: usize) -> anyhow::Result<Self> {
        match NonZeroUsize::new(workers) {
            None => anyhow::bail!("Invalid workers value: must be at least 1"),
            Some(n) if n.get() == 1 => Ok(Dispatch::Sequential),
            Some(n) => Ok(Dispatch::Pooled(n)),
        }
    }

    #[must_use]
    pub fn workers(&self) -> usize {
        match self {
            Dispatch::Sequential => 1,
            Dispatch::Pooled(n) => n.get(),
        }
    }
}
