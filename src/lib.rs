//! Timeline segmentation engine.
//!
//! A [`Timer`] is a named "HH:MM" window split into contiguous, colored
//! segments. The pure edits in [`segmentation`] keep that partition valid,
//! and [`TimelineController`] owns a collection of timers, applies those edits
//! by id and writes a snapshot to a [`SnapshotRepository`] after each change.

pub mod clock;
pub mod db;
pub mod models;
pub mod segmentation;
pub mod timer;
pub mod utils;

pub use clock::ClockTime;
pub use db::{JsonFileRepository, MemoryRepository, SnapshotRepository, SqliteRepository};
pub use models::{InvariantViolation, Segment, SegmentField, SegmentSpan, Timer};
pub use segmentation::SegmentationConfig;
pub use timer::{
    CollectionSnapshot, ControllerConfig, TimelineCommand, TimelineController, TimerCollection,
};
pub use utils::init_logging;
