//! Debounced change watcher
//!
//! Watches the working tree recursively and collapses bursts of filesystem
//! events into a single commit-and-push pass: each qualifying event resets a
//! quiet-period timer, and the action runs only once the timer expires.
//! Single-threaded: events arriving while the action runs queue in the
//! channel and open a new debounce window afterwards, so two actions never
//! overlap.

use colored::Colorize;
use notify::{Config as NotifyConfig, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crate::config::Config;
use crate::sync;

/// A message on the watch channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// A qualifying filesystem change
    Change(PathBuf),
    /// Interrupt received; exit the loop cleanly
    Shutdown,
}

/// Whether the downstream action is currently running.
/// Owned by the loop rather than kept as ambient flag state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Idle,
    Running,
}

/// Error type for the watcher
#[derive(Debug)]
pub enum WatchError {
    Notify(notify::Error),
    Signal(ctrlc::Error),
}

impl std::fmt::Display for WatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WatchError::Notify(e) => write!(f, "watcher error: {}", e),
            WatchError::Signal(e) => write!(f, "signal handler error: {}", e),
        }
    }
}

impl std::error::Error for WatchError {}

impl From<notify::Error> for WatchError {
    fn from(e: notify::Error) -> Self {
        WatchError::Notify(e)
    }
}

impl From<ctrlc::Error> for WatchError {
    fn from(e: ctrlc::Error) -> Self {
        WatchError::Signal(e)
    }
}

pub type Result<T> = std::result::Result<T, WatchError>;

/// Debounce loop: blocks while idle, counts down the quiet period while a
/// change is pending, and runs the action exactly once per burst.
#[derive(Debug)]
pub struct DebounceLoop {
    debounce: Duration,
    state: WatchState,
    actions_run: usize,
}

impl DebounceLoop {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            state: WatchState::Idle,
            actions_run: 0,
        }
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    /// Number of actions run so far
    pub fn actions_run(&self) -> usize {
        self.actions_run
    }

    /// Run until a `Shutdown` message arrives or every sender is gone.
    ///
    /// The action is invoked with the loop's state (always `Running`); the
    /// state returns to `Idle` immediately after the action, whether it
    /// succeeded or not.
    pub fn run<F>(&mut self, rx: &Receiver<WatchEvent>, mut action: F)
    where
        F: FnMut(WatchState),
    {
        let mut pending = false;
        loop {
            let event = if pending {
                match rx.recv_timeout(self.debounce) {
                    Ok(event) => Some(event),
                    // Quiet period elapsed: the burst is over
                    Err(RecvTimeoutError::Timeout) => None,
                    Err(RecvTimeoutError::Disconnected) => return,
                }
            } else {
                match rx.recv() {
                    Ok(event) => Some(event),
                    Err(_) => return,
                }
            };

            match event {
                Some(WatchEvent::Change(_)) => pending = true,
                Some(WatchEvent::Shutdown) => return,
                None => {
                    pending = false;
                    self.state = WatchState::Running;
                    action(self.state);
                    self.state = WatchState::Idle;
                    self.actions_run += 1;
                }
            }
        }
    }
}

/// Watch `dir` and auto-commit until interrupted
pub fn watch(dir: &Path, config: &Config) -> Result<()> {
    let (tx, rx) = mpsc::channel();

    let ignore = config.ignore_set();
    let event_tx = tx.clone();
    let mut watcher = RecommendedWatcher::new(
        move |res: std::result::Result<notify::Event, notify::Error>| {
            if let Ok(event) = res {
                if !(event.kind.is_create() || event.kind.is_modify() || event.kind.is_remove()) {
                    return;
                }
                for path in &event.paths {
                    if !ignore.is_ignored(path) {
                        let _ = event_tx.send(WatchEvent::Change(path.clone()));
                    }
                }
            }
        },
        NotifyConfig::default(),
    )?;
    watcher.watch(dir, RecursiveMode::Recursive)?;

    ctrlc::set_handler(move || {
        let _ = tx.send(WatchEvent::Shutdown);
    })?;

    println!(
        "{} {} (debounce {}ms, Ctrl-C to stop)",
        "Watching".cyan().bold(),
        dir.display(),
        config.watch.debounce_ms
    );

    let mut debouncer = DebounceLoop::new(config.debounce());
    debouncer.run(&rx, |_| {
        sync::sync_once(dir, config);
    });

    println!(
        "{} after {} commit pass(es)",
        "Watcher stopped".cyan(),
        debouncer.actions_run()
    );
    Ok(())
}
