pub mod time;

pub use time::{
    clamp_time, diff_minutes_wrap, duration_label, midpoint_time, rel_minutes, rel_to_clock,
    to_hhmm, to_minutes, ClockTime, MINUTES_PER_DAY,
};
