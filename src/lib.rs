//! CodeCraft library - re-exports for testing and external use.
//!
//! The application is organized into the following modules:
//!
//! - `models`: Source bundle, field identifiers and display preferences
//! - `editor`: Editor state holder (field edits, resets, font sizes)
//! - `compositor`: Preview document assembly
//! - `store`: Sled-backed snapshot persistence
//! - `workspace`: The editing session tying the above together
//! - `templates`: HTML/CSS/JS for the playground page
//! - `handlers`: HTTP route handlers

use std::env;
use std::sync::{Arc, Mutex};

use tracing::info;

pub mod clipboard;
pub mod compositor;
pub mod editor;
pub mod error;
pub mod export;
pub mod handlers;
pub mod models;
pub mod prompt;
pub mod store;
pub mod templates;
pub mod workspace;

// ============================================================================
// Configuration
// ============================================================================

pub const DB_PATH: &str = ".codecraft_db";
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub addr: String,
}

impl Config {
    /// Defaults, overridden by `CODECRAFT_DB` and `CODECRAFT_ADDR`.
    pub fn from_env() -> Self {
        Self {
            db_path: env::var("CODECRAFT_DB").unwrap_or_else(|_| DB_PATH.to_string()),
            addr: env::var("CODECRAFT_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: DB_PATH.to_string(),
            addr: DEFAULT_ADDR.to_string(),
        }
    }
}

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub workspace: Arc<Mutex<Workspace<SledSnapshotStore>>>,
}

impl AppState {
    pub fn open(config: &Config) -> error::Result<Self> {
        let db = sled::open(&config.db_path)?;
        Self::with_db(db)
    }

    pub fn with_db(db: sled::Db) -> error::Result<Self> {
        let store = SledSnapshotStore::open(&db)?;

        // Repair index/record drift left by an interrupted run
        let stats = store.reconcile()?;
        info!(
            unchanged = stats.unchanged,
            dropped = stats.dropped,
            recovered = stats.recovered,
            "Snapshot index checked"
        );

        Ok(Self {
            workspace: Arc::new(Mutex::new(Workspace::new(store))),
        })
    }
}

// Re-export commonly used types
pub use clipboard::{Clipboard, CopyIndicator, ReportedWrite, COPIED_INDICATOR};
pub use compositor::{compose, Preview};
pub use editor::Editor;
pub use error::PlaygroundError;
pub use export::{export_bundle, EXPORT_FILENAME};
pub use models::{DisplayMode, DisplayPreferences, Field, FontSize, SourceBundle};
pub use prompt::{Answers, Confirm, PromptText};
pub use store::{ReconcileStats, SledSnapshotStore, SnapshotStore};
pub use templates::{html_escape, render_playground, STYLE};
pub use workspace::Workspace;
