use serde::{Deserialize, Serialize};

use crate::{
    clock::clamp_time,
    db::SnapshotRepository,
    log_error, log_info, log_warn,
    models::{SegmentField, Timer},
    segmentation::{self, SegmentationConfig},
};

use super::state::{CollectionSnapshot, TimerCollection};

const ENABLE_LOGS: bool = true;

pub const DEFAULT_STORAGE_KEY: &str = "timers";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ControllerConfig {
    /// Repository key the collection snapshot lives under
    pub storage_key: String,
    pub segmentation: SegmentationConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.into(),
            segmentation: SegmentationConfig::default(),
        }
    }
}

/// Owns the timer collection: restores it once from the repository, runs
/// every edit through the partition algorithms, and writes a snapshot after
/// each change. No operation fails; unknown ids are ignored and storage
/// problems are only logged.
pub struct TimelineController {
    state: TimerCollection,
    repository: Box<dyn SnapshotRepository>,
    config: ControllerConfig,
}

impl TimelineController {
    pub fn new(repository: impl SnapshotRepository + 'static) -> Self {
        Self::with_config(repository, ControllerConfig::default())
    }

    pub fn with_config(
        repository: impl SnapshotRepository + 'static,
        config: ControllerConfig,
    ) -> Self {
        let timers = restore_timers(&repository, &config);
        Self {
            state: TimerCollection::from_timers(timers),
            repository: Box::new(repository),
            config,
        }
    }

    pub fn timers(&self) -> &[Timer] {
        &self.state.timers
    }

    pub fn timer(&self, id: &str) -> Option<&Timer> {
        self.state.find(id)
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.state.editing.as_deref()
    }

    pub fn editing_timer(&self) -> Option<&Timer> {
        self.state.editing_timer()
    }

    pub fn snapshot(&self) -> CollectionSnapshot {
        self.state.clone()
    }

    /// Appends a default timer and returns its id.
    pub fn add_timer(&mut self) -> String {
        let timer = segmentation::create_timer(&self.config.segmentation);
        let id = timer.id.clone();
        log_info!("Created timer {id}");
        self.state.push(timer);
        self.persist();
        id
    }

    pub fn remove_timer(&mut self, id: &str) {
        if self.state.remove(id).is_some() {
            log_info!("Removed timer {id}");
            self.persist();
        }
    }

    pub fn rename(&mut self, id: &str, name: &str) {
        self.edit(id, |timer| segmentation::rename_timer(timer, name));
    }

    pub fn add_segment(&mut self, id: &str) {
        let config = self.config.segmentation.clone();
        self.edit(id, |timer| segmentation::add_segment(timer, &config));
    }

    pub fn remove_segment(&mut self, id: &str, segment_id: &str) {
        self.edit(id, |timer| segmentation::remove_segment(timer, segment_id));
    }

    pub fn set_start(&mut self, id: &str, value: &str) {
        let start = clamp_time(value);
        let config = self.config.segmentation.clone();
        self.edit(id, |timer| segmentation::set_start(timer, start, &config));
    }

    pub fn set_end(&mut self, id: &str, value: &str) {
        let end = clamp_time(value);
        self.edit(id, |timer| segmentation::set_end(timer, end));
    }

    pub fn set_segment_field(&mut self, id: &str, segment_id: &str, field: &SegmentField) {
        self.edit(id, |timer| {
            segmentation::set_segment_field(timer, segment_id, field)
        });
    }

    pub fn open_editor(&mut self, id: &str) {
        self.state.open(id);
    }

    pub fn close_editor(&mut self) {
        self.state.close();
    }

    fn edit(&mut self, id: &str, apply: impl FnOnce(&Timer) -> Timer) {
        if self.state.replace_with(id, apply) {
            self.persist();
        }
    }

    fn persist(&self) {
        let payload = match serde_json::to_string(&self.state.timers) {
            Ok(payload) => payload,
            Err(err) => {
                log_error!("Failed to serialize timers: {err}");
                return;
            }
        };

        if let Err(err) = self.repository.write(&self.config.storage_key, &payload) {
            log_error!("Failed to persist timers: {err:#}");
        }
    }
}

fn restore_timers(repository: &dyn SnapshotRepository, config: &ControllerConfig) -> Vec<Timer> {
    let raw = match repository.read(&config.storage_key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            log_info!("No saved timers found; starting empty");
            return Vec::new();
        }
        Err(err) => {
            log_warn!("Failed to read saved timers, starting empty: {err:#}");
            return Vec::new();
        }
    };

    let timers: Vec<Timer> = match serde_json::from_str(&raw) {
        Ok(timers) => timers,
        Err(err) => {
            log_warn!("Saved timers are unreadable, starting empty: {err}");
            return Vec::new();
        }
    };

    let restored: Vec<Timer> = timers
        .into_iter()
        .filter_map(|timer| {
            let Err(violation) = timer.check_invariants() else {
                return Some(timer);
            };

            log_warn!("Repairing saved timer {}: {violation}", timer.id);
            let repaired = segmentation::repair_timer(&timer, &config.segmentation);
            match repaired.check_invariants() {
                Ok(()) => Some(repaired),
                Err(err) => {
                    log_warn!("Dropping saved timer {} that cannot be repaired: {err}", timer.id);
                    None
                }
            }
        })
        .collect();

    log_info!("Restored {} timers", restored.len());
    restored
}
