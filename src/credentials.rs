//! Credential resolution.
//!
//! A username and password are resolved once per run and then handed to the
//! git client, which passes them to every child process it spawns.

use crate::constants::{PASSWORD_ENV, USERNAME_ENV};
use anyhow::Context;
use std::fmt;
use std::io::{BufRead, IsTerminal};

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Username from, in order: explicit value, settings default, `GIT_USERNAME`.
pub fn resolve_username<E>(
    explicit: Option<String>,
    default: Option<String>,
    env: E,
) -> anyhow::Result<String>
where
    E: Fn(&str) -> Option<String>,
{
    non_empty(explicit)
        .or_else(|| non_empty(default))
        .or_else(|| non_empty(env(USERNAME_ENV)))
        .with_context(|| {
            format!(
                "Invalid username value: pass --username, set it in the settings file or export {}",
                USERNAME_ENV
            )
        })
}

/// Password from, in order: explicit value, `GIT_PASSWORD`, `prompt`.
///
/// `prompt` only runs when both other sources are empty.
pub fn resolve_password<E, P>(explicit: Option<String>, env: E, prompt: P) -> anyhow::Result<String>
where
    E: Fn(&str) -> Option<String>,
    P: FnOnce() -> anyhow::Result<String>,
{
    match non_empty(explicit).or_else(|| non_empty(env(PASSWORD_ENV))) {
        Some(password) => Ok(password),
        None => prompt(),
    }
}

/// Masked interactive prompt; input is not echoed.
///
/// When stdin is not a terminal the first line of stdin is used instead.
pub fn prompt_password() -> anyhow::Result<String> {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        return read_password_line(stdin.lock());
    }

    dialoguer::Password::new()
        .with_prompt("Password")
        .allow_empty_password(true)
        .interact()
        .context("Failed to read password from prompt")
}

/// First line of `reader` without its line ending.
pub fn read_password_line<R: BufRead>(mut reader: R) -> anyhow::Result<String> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Reads a variable from the process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
