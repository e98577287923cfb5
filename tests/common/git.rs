//! Git testing utilities

use anyhow::Result;
use std::path::Path;
use std::process::Command;

const DEFAULT_BRANCH_REF: &str = "refs/heads/main";

/// Runs git in `path`, failing with git's stderr when the command fails
pub fn git(path: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git").args(args).current_dir(path).output()?;

    if !output.status.success() {
        anyhow::bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Sets up a git repository with user config and `main` as the initial branch
/// Returns Ok(()) on success, or skips test if git is not available
pub fn setup_git_repo(path: &Path) -> Result<()> {
    let init_result = Command::new("git")
        .args(["init", "-q"])
        .current_dir(path)
        .output()?;

    if !init_result.status.success() {
        anyhow::bail!("Git not available - skipping test");
    }

    git(path, &["symbolic-ref", "HEAD", DEFAULT_BRANCH_REF])?;
    configure_identity(path)
}

/// Configures user identity and disables signing, needed in fresh clones too
pub fn configure_identity(path: &Path) -> Result<()> {
    git(path, &["config", "user.name", "Test User"])?;
    git(path, &["config", "user.email", "test@example.com"])?;
    // Disable commit signing for tests
    git(path, &["config", "commit.gpgsign", "false"])?;
    Ok(())
}

/// Creates a test commit in the repository
pub fn create_test_commit(path: &Path, file_name: &str, content: &str, message: &str) -> Result<()> {
    std::fs::write(path.join(file_name), content)?;
    git(path, &["add", file_name])?;
    git(path, &["commit", "-q", "-m", message])?;
    Ok(())
}

/// Creates `count` commits with distinct files, named after `prefix`
pub fn create_commits(path: &Path, prefix: &str, count: usize) -> Result<()> {
    for i in 1..=count {
        create_test_commit(
            path,
            &format!("{prefix}-{i}.txt"),
            &format!("{prefix} {i}"),
            &format!("{prefix} commit {i}"),
        )?;
    }
    Ok(())
}

/// Adds a git remote to a repository
pub fn add_git_remote(path: &Path, remote_name: &str, url: &str) -> Result<()> {
    git(path, &["remote", "add", remote_name, url])?;
    Ok(())
}

/// Clones `source` into `dest`, creating missing parent directories
pub fn clone_repo(source: &Path, dest: &Path, bare: bool) -> Result<()> {
    let parent = dest.parent().unwrap_or(dest);
    std::fs::create_dir_all(parent)?;
    let source = source.to_string_lossy();
    let dest = dest.to_string_lossy();
    let mut args = vec!["clone", "-q"];
    if bare {
        args.push("--bare");
    }
    args.push(source.as_ref());
    args.push(dest.as_ref());
    git(parent, &args)?;
    Ok(())
}

/// Checks if git is available in the system
pub fn is_git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}
