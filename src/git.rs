//! Git command wrappers.
//!
//! This module provides a thin wrapper around git CLI commands. Credentials
//! travel in the child process environment of each call; the parent process
//! environment is never modified.

use crate::constants::{ASKPASS_ENV, PASSWORD_ENV, TERMINAL_PROMPT_ENV, USERNAME_ENV};
use crate::credentials::Credentials;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Version control operations run against one working copy.
pub trait Vcs: Sync {
    fn checkout(&self, repo: &Path, branch: &str) -> anyhow::Result<()>;
    fn pull(&self, repo: &Path) -> anyhow::Result<()>;
}

/// Runs git with `envs` added to the child environment and returns trimmed stdout.
pub fn run_git(repo: &Path, envs: &[(&str, String)], args: &[&str]) -> anyhow::Result<String> {
    tracing::debug!(repo = %repo.display(), "spawning git {}", args.join(" "));

    let output = std::process::Command::new("git")
        .current_dir(repo)
        .args(args)
        .envs(envs.iter().map(|(k, v)| (*k, v.as_str())))
        .stdin(std::process::Stdio::null())
        .output()
        .context("Failed to spawn git command")?;

    if output.status.success() {
        let result = String::from_utf8_lossy(&output.stdout);
        Ok(result.as_ref().trim().to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("git {} failed: {}", args.join(" "), stderr.trim())
    }
}

pub fn validate_branch_name(branch: &str) -> anyhow::Result<()> {
    if branch.is_empty() || branch.starts_with('-') || branch.contains(['\0', '\n']) {
        anyhow::bail!("Invalid branch name: {:?}", branch);
    }
    Ok(())
}

/// The git CLI, authenticated through an askpass helper.
#[derive(Debug, Clone)]
pub struct Git {
    credentials: Credentials,
    askpass: PathBuf,
}

impl Git {
    pub fn new(credentials: Credentials, askpass: PathBuf) -> Self {
        Self {
            credentials,
            askpass,
        }
    }

    fn envs(&self) -> [(&'static str, String); 4] {
        [
            (USERNAME_ENV, self.credentials.username().to_string()),
            (PASSWORD_ENV, self.credentials.password().to_string()),
            (ASKPASS_ENV, self.askpass.display().to_string()),
            (TERMINAL_PROMPT_ENV, "0".to_string()),
        ]
    }

    pub fn run(&self, repo: &Path, args: &[&str]) -> anyhow::Result<String> {
        run_git(repo, &self.envs(), args)
    }
}

impl Vcs for Git {
    fn checkout(&self, repo: &Path, branch: &str) -> anyhow::Result<()> {
        validate_branch_name(branch)?;
        self.run(repo, &["checkout", branch])
            .with_context(|| format!("Failed to checkout branch '{}'", branch))?;
        Ok(())
    }

    fn pull(&self, repo: &Path) -> anyhow::Result<()> {
        self.run(repo, &["pull"]).context("Failed to pull from remote")?;
        Ok(())
    }
}
