use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::{time::format_minutes, ClockTime};

/// One labeled slice of a timer. Its start is not stored; it is always the
/// previous boundary (see [`Timer::segment_start`](super::Timer::segment_start)).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: String,
    pub title: String,
    pub color: String,
    pub end: ClockTime,
}

impl Segment {
    pub fn new(title: impl Into<String>, color: impl Into<String>, end: ClockTime) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            color: color.into(),
            end,
        }
    }
}

/// Read-only view of a segment with its derived start, for rendering layers.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SegmentSpan {
    pub index: usize,
    pub id: String,
    pub title: String,
    pub color: String,
    pub start: ClockTime,
    pub end: ClockTime,
    pub minutes: i64,
}

impl SegmentSpan {
    pub fn duration_label(&self) -> String {
        format_minutes(self.minutes)
    }
}

/// Which editable field of a segment to change, with its new value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum SegmentField {
    End(String),
    Title(String),
    Color(String),
}
