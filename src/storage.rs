//! Local persistence for merger records.
//!
//! Everything lives in one `SQLite` file, by default under the home directory:
//!
//! ```text
//! ~/.merger-timeline/
//!   mergers.sqlite   # merger + status_history tables
//! ```
//!
//! The store is a plain record store: it keeps a denormalized status label
//! per merger and an append-only status history. Timelines are never stored;
//! they are recomputed on read.

mod merger;

use std::{fs, io, path::PathBuf};

use rusqlite::Connection;
use tracing::debug;
use uuid::Uuid;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("merger not found: {0}")]
    MergerNotFound(Uuid),

    #[error("merger already exists: {0}")]
    MergerAlreadyExists(Uuid),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("corrupt record: {0}")]
    Corrupt(String),
}

pub type Result<T> = core::result::Result<T, StorageError>;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS merger (
        id          TEXT PRIMARY KEY,
        name        TEXT NOT NULL,
        filing_date TEXT NOT NULL,
        status      TEXT NOT NULL,
        has_phase_2 INTEGER NOT NULL DEFAULT 0,
        created_at  TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS status_history (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        merger_id   TEXT NOT NULL REFERENCES merger(id),
        status      TEXT NOT NULL,
        changed_on  TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS status_history_merger ON status_history(merger_id);
";

/// `SQLite`-backed storage for merger records.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Opens (or creates) the database at `path`.
    ///
    /// Parent directories are created if they don't exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        debug!(path = %path.display(), "opening merger database");
        let conn = Connection::open(&path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Returns the default database path: `~/.merger-timeline/mergers.sqlite`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".merger-timeline").join("mergers.sqlite"))
    }
}
