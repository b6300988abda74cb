//! Configuration file support for wayfarer
//!
//! Reads from .wayfarer/config.toml. Every field has a default equal to the
//! tool's fixed constants, so running without a config file behaves exactly
//! like the stock setup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::ignore::IgnoreSet;

/// Directory holding wayfarer's config and journey file
pub const CONFIG_DIR: &str = ".wayfarer";

/// Configuration structure
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct Config {
    /// Watcher settings
    #[serde(default)]
    pub watch: WatchConfig,

    /// Push settings
    #[serde(default)]
    pub push: PushConfig,
}

/// Watcher-related configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WatchConfig {
    /// Quiet period after the last change before a commit runs
    /// Default: 2000
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Extra ignore patterns, added to the built-in set
    #[serde(default)]
    pub ignore: Vec<String>,
}

/// Push-related configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PushConfig {
    /// Remote pushed to after each commit
    /// Default: "origin"
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Branch pushed to the remote
    /// Default: the current branch at push time
    #[serde(default)]
    pub branch: Option<String>,
}

fn default_debounce_ms() -> u64 {
    2000
}

fn default_remote() -> String {
    "origin".to_string()
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            ignore: Vec::new(),
        }
    }
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            remote: default_remote(),
            branch: None,
        }
    }
}

impl Config {
    /// Load config from .wayfarer/config.toml
    /// Returns default config if the file doesn't exist or fails to parse
    pub fn load() -> Self {
        if let Some(path) = Self::find_config_path() {
            if let Ok(contents) = std::fs::read_to_string(&path) {
                if let Ok(config) = toml::from_str(&contents) {
                    return config;
                }
            }
        }
        Self::default()
    }

    /// Find config.toml by walking up the directory tree
    fn find_config_path() -> Option<PathBuf> {
        let current_dir = std::env::current_dir().ok()?;
        let mut dir = current_dir.as_path();

        loop {
            let config_path = dir.join(CONFIG_DIR).join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }

            match dir.parent() {
                Some(parent) => dir = parent,
                None => break,
            }
        }
        None
    }

    /// The debounce quiet period as a Duration
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.watch.debounce_ms)
    }

    /// The compiled ignore set: builtins plus any configured extras
    pub fn ignore_set(&self) -> IgnoreSet {
        if self.watch.ignore.is_empty() {
            IgnoreSet::builtin()
        } else {
            IgnoreSet::with_extra(&self.watch.ignore)
        }
    }
}
