pub mod segment;
pub mod timer;

pub use segment::{Segment, SegmentField, SegmentSpan};
pub use timer::{InvariantViolation, Timer};
