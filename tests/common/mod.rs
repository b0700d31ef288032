//! Test infrastructure for git-refresh integration tests.
#![allow(dead_code)]

use anyhow::Result;
use git_refresh::credentials::Credentials;
use git_refresh::git::{Git, run_git};
use git_refresh::workspace::{RefreshCallbacks, RefreshOutcome, RefreshResult, RefreshStep};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Bare remotes live here so the refresher never treats them as targets.
pub const REMOTES_DIR: &str = ".remotes";

pub fn git(path: &Path, args: &[&str]) -> Result<String> {
    run_git(path, &[], args)
}

pub fn askpass_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_git-refresh-askpass"))
}

/// A git client with throwaway credentials and the real askpass helper.
pub fn test_git() -> Git {
    Git::new(Credentials::new("tester", "secret"), askpass_bin())
}

/// Initializes a repository with one commit on `branch`.
pub fn init_repo(path: &Path, branch: &str) -> Result<()> {
    std::fs::create_dir_all(path)?;
    git(path, &["init", "-b", branch])?;
    configure_identity(path)?;
    std::fs::write(path.join("README.md"), "# Test Repo\n")?;
    git(path, &["add", "README.md"])?;
    git(path, &["commit", "-m", "Initial commit"])?;
    Ok(())
}

pub fn configure_identity(path: &Path) -> Result<()> {
    git(path, &["config", "user.email", "test@example.com"])?;
    git(path, &["config", "user.name", "Test User"])?;
    Ok(())
}

/// Creates `name` under the workspace with an `origin` remote in
/// `.remotes/<name>.git`, tracking `branch`.
pub fn init_repo_with_remote(workspace: &Path, name: &str, branch: &str) -> Result<PathBuf> {
    let remote = remote_path(workspace, name);
    std::fs::create_dir_all(&remote)?;
    git(&remote, &["init", "--bare"])?;

    let repo = workspace.join(name);
    init_repo(&repo, branch)?;
    git(&repo, &["remote", "add", "origin", remote.to_str().unwrap()])?;
    git(&repo, &["push", "-u", "origin", branch])?;
    Ok(repo)
}

pub fn remote_path(workspace: &Path, name: &str) -> PathBuf {
    workspace.join(REMOTES_DIR).join(format!("{}.git", name))
}

pub fn setup_workspace_with_repos(workspace: &TempDir, repos: &[(&str, &str)]) -> Result<()> {
    for (name, branch) in repos {
        init_repo_with_remote(workspace.path(), name, branch)?;
    }
    Ok(())
}

/// Pushes a new commit on `branch` to `name`'s remote from a separate clone.
pub fn push_upstream_change(
    workspace: &Path,
    name: &str,
    branch: &str,
    content: &str,
) -> Result<()> {
    let scratch = TempDir::new()?;
    let clone = scratch.path().join("clone");
    let remote = remote_path(workspace, name);
    git(
        scratch.path(),
        &[
            "clone",
            "-b",
            branch,
            remote.to_str().unwrap(),
            clone.to_str().unwrap(),
        ],
    )?;
    configure_identity(&clone)?;
    std::fs::write(clone.join("README.md"), content)?;
    git(&clone, &["commit", "-am", "Upstream change"])?;
    git(&clone, &["push"])?;
    Ok(())
}

/// Records every completed refresh as (name, failed step, error text).
#[derive(Default)]
pub struct RecordingCallbacks {
    pub started: Mutex<Vec<String>>,
    pub completed: Mutex<Vec<(String, Option<RefreshStep>, String)>>,
}

impl RecordingCallbacks {
    pub fn completed(&self) -> Vec<(String, Option<RefreshStep>, String)> {
        self.completed.lock().unwrap().clone()
    }

    pub fn completed_names(&self) -> Vec<String> {
        self.completed().into_iter().map(|(name, _, _)| name).collect()
    }
}

impl RefreshCallbacks for RecordingCallbacks {
    fn on_start(&self, path: &Path) {
        self.started
            .lock()
            .unwrap()
            .push(git_refresh::workspace::dir_name(path));
    }

    fn on_complete(&self, result: &RefreshResult) {
        let (step, error) = match &result.outcome {
            RefreshOutcome::Success => (None, String::new()),
            RefreshOutcome::Failed(failure) => (Some(failure.step), format!("{:#}", failure.error)),
        };
        self.completed
            .lock()
            .unwrap()
            .push((result.name(), step, error));
    }
}
