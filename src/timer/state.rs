use serde::{Deserialize, Serialize};

use crate::models::Timer;

/// Ordered timers plus the one currently open in the editor, if any.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimerCollection {
    pub timers: Vec<Timer>,
    pub editing: Option<String>,
}

/// What presentation layers get to read.
pub type CollectionSnapshot = TimerCollection;

impl TimerCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_timers(timers: Vec<Timer>) -> Self {
        Self {
            timers,
            editing: None,
        }
    }

    pub fn find(&self, id: &str) -> Option<&Timer> {
        self.timers.iter().find(|timer| timer.id == id)
    }

    pub fn editing_timer(&self) -> Option<&Timer> {
        self.editing.as_deref().and_then(|id| self.find(id))
    }

    pub fn push(&mut self, timer: Timer) {
        self.timers.push(timer);
    }

    /// Removes a timer, closing the editor if it was showing that timer.
    pub fn remove(&mut self, id: &str) -> Option<Timer> {
        let index = self.timers.iter().position(|timer| timer.id == id)?;
        if self.editing.as_deref() == Some(id) {
            self.editing = None;
        }
        Some(self.timers.remove(index))
    }

    /// Swaps the timer `id` for `edit(timer)` in place. Returns whether
    /// anything changed.
    pub fn replace_with(&mut self, id: &str, edit: impl FnOnce(&Timer) -> Timer) -> bool {
        let Some(slot) = self.timers.iter_mut().find(|timer| timer.id == id) else {
            return false;
        };

        let next = edit(slot);
        if next == *slot {
            return false;
        }
        *slot = next;
        true
    }

    pub fn open(&mut self, id: &str) -> bool {
        if self.find(id).is_none() {
            return false;
        }
        self.editing = Some(id.to_string());
        true
    }

    pub fn close(&mut self) {
        self.editing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmentation::{create_timer, rename_timer, SegmentationConfig};

    fn collection_of(count: usize) -> TimerCollection {
        let config = SegmentationConfig::default();
        TimerCollection::from_timers((0..count).map(|_| create_timer(&config)).collect())
    }

    #[test]
    fn replace_keeps_position_and_reports_changes() {
        let mut collection = collection_of(3);
        let target = collection.timers[1].id.clone();

        assert!(collection.replace_with(&target, |timer| rename_timer(timer, "Renamed")));
        assert_eq!(collection.timers[1].name, "Renamed");
        assert_eq!(collection.timers[1].id, target);

        assert!(!collection.replace_with(&target, |timer| timer.clone()));
        assert!(!collection.replace_with("missing", |timer| rename_timer(timer, "x")));
    }

    #[test]
    fn removing_edited_timer_closes_editor() {
        let mut collection = collection_of(2);
        let first = collection.timers[0].id.clone();
        let second = collection.timers[1].id.clone();

        assert!(collection.open(&first));
        assert_eq!(collection.editing_timer().map(|t| t.id.as_str()), Some(first.as_str()));

        collection.remove(&second);
        assert_eq!(collection.editing.as_deref(), Some(first.as_str()));

        collection.remove(&first);
        assert_eq!(collection.editing, None);
        assert!(collection.timers.is_empty());
    }

    #[test]
    fn open_ignores_unknown_ids() {
        let mut collection = collection_of(1);
        assert!(!collection.open("missing"));
        assert_eq!(collection.editing, None);
    }
}
