use std::{collections::BTreeMap, fs, path::PathBuf, sync::RwLock};

use anyhow::{anyhow, Context, Result};

use crate::log_warn;

use super::SnapshotRepository;

const ENABLE_LOGS: bool = true;

/// Key-value entries kept in a single pretty-printed JSON object on disk.
pub struct JsonFileRepository {
    path: PathBuf,
    data: RwLock<BTreeMap<String, String>>,
}

impl JsonFileRepository {
    /// Opens (or lazily creates) the store at `path`. A missing or damaged
    /// file is treated as an empty store; only an unreadable file is an error.
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read store from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log_warn!("Store at {} is damaged, starting empty: {err}", path.display());
                BTreeMap::new()
            })
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// Writes through a sibling temp file and renames it over the store, so a
    /// crash mid-write leaves the previous contents intact.
    fn persist(&self, data: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create store directory {}", parent.display())
                })?;
            }
        }

        let serialized = serde_json::to_string_pretty(data)?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, serialized)
            .with_context(|| format!("Failed to write store to {}", staging.display()))?;
        fs::rename(&staging, &self.path)
            .with_context(|| format!("Failed to replace store at {}", self.path.display()))
    }
}

impl SnapshotRepository for JsonFileRepository {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let guard = self
            .data
            .read()
            .map_err(|_| anyhow!("file repository lock poisoned"))?;
        Ok(guard.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow!("file repository lock poisoned"))?;
        let mut updated = guard.clone();
        updated.insert(key.to_string(), value.to_string());
        self.persist(&updated)?;
        *guard = updated;
        Ok(())
    }
}
