use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::{log_error, log_info};

use super::{migrations::run_migrations, SnapshotRepository};

const ENABLE_LOGS: bool = true;

/// Key-value entries in a SQLite `kv_entries` table.
pub struct SqliteRepository {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
}

impl SqliteRepository {
    pub fn open(db_path: PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create database directory {}", parent.display())
                })?;
            }
        }

        let conn = Connection::open(&db_path).context("failed to open SQLite database")?;
        if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
            log_error!("Failed to enable WAL mode: {err}");
        }

        let repo = Self::from_connection(conn, Some(db_path))?;
        log_info!(
            "Snapshot database initialized at {}",
            repo.path().map(|p| p.display().to_string()).unwrap_or_default()
        );
        Ok(repo)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
        Self::from_connection(conn, None)
    }

    fn from_connection(mut conn: Connection, db_path: Option<PathBuf>) -> Result<Self> {
        run_migrations(&mut conn).context("failed to run database migrations")?;
        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    fn with_conn<T>(&self, task: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let guard = self
            .conn
            .lock()
            .map_err(|_| anyhow!("database connection lock poisoned"))?;
        task(&guard)
    }
}

impl SnapshotRepository for SqliteRepository {
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM kv_entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("failed to read entry {key}"))
        })
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO kv_entries (key, value, updated_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE
                 SET value = excluded.value,
                     updated_at = excluded.updated_at",
                params![key, value, updated_at],
            )
            .with_context(|| format!("failed to write entry {key}"))?;
            Ok(())
        })
    }
}
