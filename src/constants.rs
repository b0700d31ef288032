//! Application-wide constants.
//!
//! File names, environment variable names and defaults shared by the CLI,
//! the git wrapper and the askpass helper.

/// Branch checked out in every working copy when `--branch` is not given.
pub const DEFAULT_BRANCH: &str = "master";

/// Worker pool size used when neither `--workers` nor the settings file sets one.
pub const DEFAULT_WORKERS: usize = 7;

/// Per-root list of directory names to leave alone.
pub const IGNORE_FILE: &str = ".refreshignore";

/// Settings file looked up beside the executable.
pub const SETTINGS_FILE: &str = "settings.ini";

/// Directories whose name starts with this are never refreshed.
pub const HIDDEN_PREFIX: char = '.';

pub const USERNAME_ENV: &str = "GIT_USERNAME";
pub const PASSWORD_ENV: &str = "GIT_PASSWORD";
pub const ASKPASS_ENV: &str = "GIT_ASKPASS";
pub const TERMINAL_PROMPT_ENV: &str = "GIT_TERMINAL_PROMPT";

/// Overrides the location of the askpass helper.
pub const ASKPASS_OVERRIDE_ENV: &str = "GIT_REFRESH_ASKPASS";

/// File name of the askpass helper binary, without platform suffix.
pub const ASKPASS_BIN: &str = "git-refresh-askpass";

/// Used when a directory name cannot be determined from its path.
pub const DEFAULT_DIR_NAME: &str = "directory";
