//! Git shell-outs
//!
//! Thin wrappers over the `git` binary. Exit codes are the only failure
//! signal observed; stderr is captured into the error for logging.

use std::path::Path;
use std::process::Command;

/// Error type for git operations
#[derive(Debug)]
pub enum GitError {
    /// The git binary could not be spawned
    Spawn(std::io::Error),
    /// git exited non-zero
    Command { command: String, stderr: String },
}

impl std::fmt::Display for GitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GitError::Spawn(e) => write!(f, "could not run git: {}", e),
            GitError::Command { command, stderr } => {
                if stderr.is_empty() {
                    write!(f, "{} failed", command)
                } else {
                    write!(f, "{} failed: {}", command, stderr)
                }
            }
        }
    }
}

impl std::error::Error for GitError {}

pub type Result<T> = std::result::Result<T, GitError>;

fn run_git(dir: &Path, args: &[&str]) -> Result<std::process::Output> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(GitError::Spawn)?;

    if output.status.success() {
        Ok(output)
    } else {
        Err(GitError::Command {
            command: format!("git {}", args.join(" ")),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// Changed paths in machine-readable short form, one entry per path
pub fn status_porcelain(dir: &Path) -> Result<Vec<String>> {
    let output = run_git(dir, &["status", "--porcelain"])?;
    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.to_string())
        .collect())
}

/// Stage every change in the working tree
pub fn stage_all(dir: &Path) -> Result<()> {
    run_git(dir, &["add", "-A"]).map(|_| ())
}

/// Commit staged changes with the given message
pub fn commit(dir: &Path, message: &str) -> Result<()> {
    run_git(dir, &["commit", "-m", message]).map(|_| ())
}

/// Push a branch to a remote
pub fn push(dir: &Path, remote: &str, branch: &str) -> Result<()> {
    run_git(dir, &["push", remote, branch]).map(|_| ())
}

/// Current branch name
pub fn current_branch(dir: &Path) -> Result<String> {
    let output = run_git(dir, &["rev-parse", "--abbrev-ref", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
