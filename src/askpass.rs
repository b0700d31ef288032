//! Askpass helper support.
//!
//! git runs `$GIT_ASKPASS <prompt>` whenever it needs a credential. The
//! `git-refresh-askpass` binary answers from `GIT_USERNAME`/`GIT_PASSWORD`,
//! which the git wrapper sets on every child process.

use crate::constants::{ASKPASS_BIN, ASKPASS_OVERRIDE_ENV};
use anyhow::Context;
use std::path::PathBuf;

/// Which credential a git prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Username,
    Password,
}

impl Request {
    /// Anything that does not mention "username" is treated as a password prompt.
    pub fn from_prompt(prompt: &str) -> Self {
        if prompt.to_lowercase().contains("username") {
            Request::Username
        } else {
            Request::Password
        }
    }

    pub fn env_var(&self) -> &'static str {
        match self {
            Request::Username => crate::constants::USERNAME_ENV,
            Request::Password => crate::constants::PASSWORD_ENV,
        }
    }
}

/// Path of the helper binary: `$GIT_REFRESH_ASKPASS`, else next to the
/// running executable.
pub fn locate() -> anyhow::Result<PathBuf> {
    if let Some(path) = std::env::var_os(ASKPASS_OVERRIDE_ENV) {
        return Ok(PathBuf::from(path));
    }

    let exe = std::env::current_exe().context("Failed to locate running executable")?;
    let dir = exe
        .parent()
        .context("Running executable has no parent directory")?;
    let helper = dir.join(format!("{}{}", ASKPASS_BIN, std::env::consts::EXE_SUFFIX));

    if !helper.is_file() {
        anyhow::bail!(
            "Askpass helper not found at {} (set {} to override)",
            helper.display(),
            ASKPASS_OVERRIDE_ENV
        );
    }
    Ok(helper)
}
