pub mod algorithm;
pub mod config;

pub use algorithm::{
    add_segment, create_timer, remove_segment, rename_timer, repair_timer, set_end,
    set_segment_field, set_start,
};
pub use config::SegmentationConfig;
