mod common;

use common::setup_workspace_with_repos;
use git_refresh::workspace;
use std::collections::HashSet;
use tempfile::TempDir;

fn names(targets: &[std::path::PathBuf]) -> Vec<String> {
    targets.iter().map(|p| workspace::dir_name(p)).collect()
}

fn mkdirs(workspace: &TempDir, dirs: &[&str]) -> anyhow::Result<()> {
    for dir in dirs {
        std::fs::create_dir_all(workspace.path().join(dir))?;
    }
    Ok(())
}

#[test]
fn test_hidden_and_ignored_directories_are_excluded() -> anyhow::Result<()> {
    let workspace = TempDir::new()?;
    mkdirs(&workspace, &["a", "b", ".git-meta", "c"])?;
    std::fs::write(workspace.path().join(".refreshignore"), "c\n")?;

    let skips = workspace::load_skip_set(workspace.path(), &[])?;
    let targets = workspace::find_targets(workspace.path(), &skips)?;

    assert_eq!(names(&targets), vec!["a", "b"]);
    Ok(())
}

#[test]
fn test_targets_are_sorted_by_name() -> anyhow::Result<()> {
    let workspace = TempDir::new()?;
    mkdirs(&workspace, &["zeta", "Zulu", "beta", "alpha"])?;

    let targets = workspace::find_targets(workspace.path(), &HashSet::new())?;

    assert_eq!(names(&targets), vec!["Zulu", "alpha", "beta", "zeta"]);
    Ok(())
}

#[test]
fn test_files_are_not_targets() -> anyhow::Result<()> {
    let workspace = TempDir::new()?;
    mkdirs(&workspace, &["repo"])?;
    std::fs::write(workspace.path().join("notes.txt"), "todo\n")?;

    let targets = workspace::find_targets(workspace.path(), &HashSet::new())?;

    assert_eq!(names(&targets), vec!["repo"]);
    assert!(targets[0].is_absolute());
    Ok(())
}

#[test]
fn test_skip_set_merges_ignore_file_and_cli_names() -> anyhow::Result<()> {
    let workspace = TempDir::new()?;
    std::fs::write(
        workspace.path().join(".refreshignore"),
        "  legacy  \n\nvendor\n",
    )?;

    let skips = workspace::load_skip_set(workspace.path(), &["scratch".to_string()])?;

    let expected: HashSet<String> = ["legacy", "vendor", "scratch"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(skips, expected);
    Ok(())
}

#[test]
fn test_skip_matches_exact_base_name_only() -> anyhow::Result<()> {
    let workspace = TempDir::new()?;
    mkdirs(&workspace, &["api", "api-client", "web"])?;

    let skips = workspace::load_skip_set(workspace.path(), &["api".to_string()])?;
    let targets = workspace::find_targets(workspace.path(), &skips)?;

    assert_eq!(names(&targets), vec!["api-client", "web"]);
    Ok(())
}

#[test]
fn test_missing_ignore_file_yields_cli_names_only() -> anyhow::Result<()> {
    let workspace = TempDir::new()?;
    let skips = workspace::load_skip_set(workspace.path(), &[])?;
    assert!(skips.is_empty());
    Ok(())
}

#[test]
fn test_empty_workspace_has_no_targets() -> anyhow::Result<()> {
    let workspace = TempDir::new()?;
    let targets = workspace::find_targets(workspace.path(), &HashSet::new())?;
    assert!(targets.is_empty());
    Ok(())
}

#[test]
fn test_find_targets_errors_on_missing_root() {
    let result = workspace::find_targets(
        std::path::Path::new("/no/such/root/for/test"),
        &HashSet::new(),
    );
    assert!(result.is_err());
}

#[test]
fn test_nested_repos_are_not_discovered() -> anyhow::Result<()> {
    let workspace = TempDir::new()?;
    setup_workspace_with_repos(&workspace, &[("outer", "master")])?;
    mkdirs(&workspace, &["outer/nested"])?;

    let targets = workspace::find_targets(workspace.path(), &HashSet::new())?;

    assert_eq!(names(&targets), vec!["outer"]);
    Ok(())
}
