use std::{collections::HashMap, sync::RwLock};

use anyhow::{anyhow, Result};

pub mod file;
mod migrations;
pub mod sqlite;

pub use file::JsonFileRepository;
pub use sqlite::SqliteRepository;

/// Durable key-value storage for collection snapshots.
pub trait SnapshotRepository: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// Process-local repository; nothing survives a restart.
#[derive(Default)]
pub struct MemoryRepository {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self {
            entries: RwLock::new(entries),
        }
    }
}

impl SnapshotRepository for MemoryRepository {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let guard = self
            .entries
            .read()
            .map_err(|_| anyhow!("memory repository lock poisoned"))?;
        Ok(guard.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = self
            .entries
            .write()
            .map_err(|_| anyhow!("memory repository lock poisoned"))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<R: SnapshotRepository + ?Sized> SnapshotRepository for std::sync::Arc<R> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}
