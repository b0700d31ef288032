//! Command-line arguments and run setup.
//!
//! Everything that can abort a run happens in [`prepare`], before any git
//! process is spawned.

use crate::askpass;
use crate::config::{Dispatch, Settings, Verbosity};
use crate::constants::{DEFAULT_BRANCH, SETTINGS_FILE};
use crate::credentials::{self, Credentials};
use crate::git::{self, Git, Vcs};
use crate::output::{self, LoggingCallbacks};
use crate::workspace::{self, RefreshCallbacks};
use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Git pull repositories in a certain directory.
///
/// Useful if you have a couple of git repositories in a directory and would
/// like to bulk pull them.
#[derive(Parser, Debug, Clone)]
#[command(name = "git-refresh", version)]
pub struct Args {
    /// Directory whose immediate subdirectories are refreshed
    pub path: PathBuf,

    /// Repo username
    #[arg(short, long)]
    pub username: Option<String>,

    /// Branch name
    #[arg(short, long, default_value = DEFAULT_BRANCH)]
    pub branch: String,

    /// Password
    #[arg(short, long)]
    pub password: Option<String>,

    /// Directory names to skip. Can be used multiple times.
    #[arg(short = 'k', long = "skip")]
    pub skip: Vec<String>,

    /// Number of directories refreshed in parallel (1 = sequential)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Settings file [default: settings.ini next to the executable]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log every git command
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log warnings and failures
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }
}

/// A validated run: everything needed to dispatch.
#[derive(Debug)]
pub struct RefreshPlan {
    pub root: PathBuf,
    pub branch: String,
    pub credentials: Credentials,
    pub askpass: PathBuf,
    pub targets: Vec<PathBuf>,
    pub dispatch: Dispatch,
}

/// Validates arguments, resolves credentials and lists targets.
///
/// `env` looks up fallback environment variables, `locate_askpass` finds the
/// helper binary and `prompt` reads a password interactively when no other
/// source has one. The helper is located before any prompt is shown.
pub fn prepare<E, L, P>(
    args: &Args,
    settings: &Settings,
    env: E,
    locate_askpass: L,
    prompt: P,
) -> anyhow::Result<RefreshPlan>
where
    E: Fn(&str) -> Option<String>,
    L: FnOnce() -> anyhow::Result<PathBuf>,
    P: FnOnce() -> anyhow::Result<String>,
{
    if !args.path.is_dir() {
        anyhow::bail!("Path \"{}\" does not exist", args.path.display());
    }
    let root = std::fs::canonicalize(&args.path)
        .with_context(|| format!("Failed to resolve {}", args.path.display()))?;

    git::validate_branch_name(&args.branch)?;
    let dispatch = Dispatch::from_workers(args.workers.unwrap_or(settings.workers.get()))?;

    let username = credentials::resolve_username(
        args.username.clone(),
        settings.username.clone(),
        &env,
    )?;
    let askpass = locate_askpass()?;
    let password = credentials::resolve_password(args.password.clone(), &env, prompt)?;

    let skips = workspace::load_skip_set(&root, &args.skip)?;
    let targets = workspace::find_targets(&root, &skips)?;

    Ok(RefreshPlan {
        root,
        branch: args.branch.clone(),
        credentials: Credentials::new(username, password),
        askpass,
        targets,
        dispatch,
    })
}

/// Refreshes every target in the plan; returns after the last one finishes.
pub fn execute<V, C>(plan: &RefreshPlan, vcs: &V, callbacks: &C) -> anyhow::Result<()>
where
    V: Vcs + ?Sized,
    C: RefreshCallbacks + ?Sized,
{
    tracing::debug!(
        workers = plan.dispatch.workers(),
        targets = plan.targets.len(),
        "dispatching"
    );
    workspace::refresh_all(&plan.targets, vcs, &plan.branch, plan.dispatch, callbacks)
}

fn default_settings_path() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join(SETTINGS_FILE))
}

fn load_settings(explicit: Option<&Path>) -> anyhow::Result<Settings> {
    match explicit {
        Some(path) => Settings::load(path, true),
        None => match default_settings_path() {
            Some(path) => Settings::load(&path, false),
            None => Ok(Settings::default()),
        },
    }
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let settings = load_settings(args.config.as_deref())?;
    let plan = prepare(
        &args,
        &settings,
        credentials::process_env,
        askpass::locate,
        credentials::prompt_password,
    )?;
    let git = Git::new(plan.credentials.clone(), plan.askpass.clone());

    output::print_working_dir(
        &plan.root,
        plan.targets.len(),
        &plan.branch,
        args.verbosity(),
    );
    execute(&plan, &git, &LoggingCallbacks)
}
