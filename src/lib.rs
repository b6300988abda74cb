//! Wayfarer - Journey map tooling with a debounced auto-commit watcher
//!
//! Two independent flows live here:
//!
//! - **Journey map**: an ordered sequence of stage records (title,
//!   activities, feeling, opportunity) with positional identity. Stages can
//!   be edited field-by-field or swapped into a new order; the stage count
//!   never changes.
//! - **Auto-push watcher**: a long-lived process that watches the working
//!   tree, collapses bursts of filesystem events into one action with a
//!   debounce timer, and runs stage-all -> commit -> push, guarded so only
//!   one pass runs at a time.
//!
//! # Quick Start
//!
//! ```
//! use wayfarer::{JourneyMap, StageEdit};
//!
//! let mut map = JourneyMap::sample();
//!
//! // Reorder two stages
//! map.swap(0, 1).unwrap();
//!
//! // Rename the first stage, leaving its other fields alone
//! map.edit(0, StageEdit {
//!     title: Some("Research".to_string()),
//!     ..StageEdit::default()
//! }).unwrap();
//!
//! assert_eq!(map.len(), 5);
//! ```

pub mod config;
pub mod git;
pub mod ignore;
pub mod init;
pub mod journey;
pub mod sync;
pub mod watch;

pub use config::{Config, CONFIG_DIR};
pub use ignore::IgnoreSet;
pub use journey::{Feeling, JourneyError, JourneyMap, Stage, StageEdit};
pub use sync::{commit_message, sync_once, SyncOutcome};
pub use watch::{DebounceLoop, WatchEvent, WatchState};
