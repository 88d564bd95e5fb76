use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::clock::{rel_minutes, rel_to_clock, time::format_minutes, ClockTime};

use super::segment::{Segment, SegmentSpan};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Timer {
    pub id: String,
    pub name: String,
    pub start: ClockTime,
    pub end: ClockTime,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("timer has no segments")]
    EmptySegments,
    #[error("timer ends at {timer_end} but its last segment ends at {last_end}")]
    EndMismatch {
        timer_end: ClockTime,
        last_end: ClockTime,
    },
    #[error("segment {index} ends at offset {offset}, not after previous boundary at {previous}")]
    NonIncreasingBoundary {
        index: usize,
        offset: i64,
        previous: i64,
    },
}

impl Timer {
    /// A timer covering `start`→`end` with a single segment spanning the window.
    /// A zero-length window is widened to one minute.
    pub fn new(
        name: impl Into<String>,
        start: ClockTime,
        end: ClockTime,
        first_title: impl Into<String>,
        first_color: impl Into<String>,
    ) -> Self {
        let end = if rel_minutes(start, end) == 0 {
            rel_to_clock(start, 1)
        } else {
            end
        };

        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            start,
            end,
            segments: vec![Segment::new(first_title, first_color, end)],
        }
    }

    /// Derived start of the segment at `index`: the timer start for the first
    /// segment, otherwise the previous segment's end.
    pub fn segment_start(&self, index: usize) -> ClockTime {
        match index.checked_sub(1).and_then(|prev| self.segments.get(prev)) {
            Some(previous) => previous.end,
            None => self.start,
        }
    }

    /// Offset of a time from this timer's start, wrapping past midnight.
    pub fn offset_of(&self, t: ClockTime) -> i64 {
        rel_minutes(self.start, t)
    }

    pub fn segment_index(&self, segment_id: &str) -> Option<usize> {
        self.segments.iter().position(|segment| segment.id == segment_id)
    }

    pub fn last_index(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }

    pub fn total_minutes(&self) -> i64 {
        self.offset_of(self.end)
    }

    pub fn duration_label(&self) -> String {
        format_minutes(self.total_minutes())
    }

    pub fn spans(&self) -> impl Iterator<Item = SegmentSpan> + '_ {
        self.segments.iter().enumerate().map(move |(index, segment)| {
            let start = self.segment_start(index);
            SegmentSpan {
                index,
                id: segment.id.clone(),
                title: segment.title.clone(),
                color: segment.color.clone(),
                start,
                end: segment.end,
                minutes: rel_minutes(start, segment.end),
            }
        })
    }

    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let last = self.segments.last().ok_or(InvariantViolation::EmptySegments)?;
        if last.end != self.end {
            return Err(InvariantViolation::EndMismatch {
                timer_end: self.end,
                last_end: last.end,
            });
        }

        let mut previous = 0;
        for (index, segment) in self.segments.iter().enumerate() {
            let offset = self.offset_of(segment.end);
            if offset <= previous {
                return Err(InvariantViolation::NonIncreasingBoundary {
                    index,
                    offset,
                    previous,
                });
            }
            previous = offset;
        }

        Ok(())
    }
}
