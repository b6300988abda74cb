//! Commit-and-push action
//!
//! One sequential pass: query status, stage everything, commit with a
//! timestamped message, push. Each step's failure is caught and logged;
//! a stage/commit failure skips the push, a push failure keeps the local
//! commit. Nothing here ever exits the process.

use colored::Colorize;
use std::path::Path;

use crate::config::Config;
use crate::git;

/// How a single commit-and-push pass concluded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No changes were pending
    Clean,
    /// Changes committed and pushed
    Pushed { files: usize },
    /// Staging or committing failed; push skipped
    CommitFailed { files: usize },
    /// Commit succeeded but the push did not; local commit kept
    PushFailed { files: usize },
}

impl SyncOutcome {
    /// True when the pass ended without a logged failure
    pub fn is_ok(&self) -> bool {
        matches!(self, SyncOutcome::Clean | SyncOutcome::Pushed { .. })
    }
}

/// Build the auto-commit message for `files` changed paths
pub fn commit_message(files: usize, timestamp: &str) -> String {
    format!("Auto-commit: {} file(s) changed at {}", files, timestamp)
}

/// Run the commit-and-push pipeline once against `dir`
pub fn sync_once(dir: &Path, config: &Config) -> SyncOutcome {
    let changes = match git::status_porcelain(dir) {
        Ok(changes) => changes,
        Err(e) => {
            // Treated as "no changes": the watcher keeps running
            eprintln!("{} status query failed: {}", "Warning:".yellow(), e);
            return SyncOutcome::Clean;
        }
    };

    if changes.is_empty() {
        println!("{}", "Nothing to commit".dimmed());
        return SyncOutcome::Clean;
    }

    let files = changes.len();
    println!("{} {} file(s) changed", "Committing".cyan(), files);

    if let Err(e) = git::stage_all(dir) {
        eprintln!("{} {}", "Stage failed:".red(), e);
        return SyncOutcome::CommitFailed { files };
    }

    let message = commit_message(files, &chrono::Local::now().to_rfc3339());
    if let Err(e) = git::commit(dir, &message) {
        eprintln!("{} {}", "Commit failed:".red(), e);
        return SyncOutcome::CommitFailed { files };
    }

    let branch = match &config.push.branch {
        Some(branch) => branch.clone(),
        None => match git::current_branch(dir) {
            Ok(branch) => branch,
            Err(e) => {
                // The commit exists; only the push is abandoned
                eprintln!("{} could not resolve branch: {}", "Push failed:".red(), e);
                return SyncOutcome::PushFailed { files };
            }
        },
    };

    if let Err(e) = git::push(dir, &config.push.remote, &branch) {
        eprintln!("{} {} (local commit kept)", "Push failed:".red(), e);
        return SyncOutcome::PushFailed { files };
    }

    println!(
        "{} {} file(s) to {}/{}",
        "Pushed".green().bold(),
        files,
        config.push.remote,
        branch
    );
    SyncOutcome::Pushed { files }
}
