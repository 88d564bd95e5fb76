pub mod commands;
pub mod controller;
pub mod state;

pub use commands::TimelineCommand;
pub use controller::{ControllerConfig, TimelineController, DEFAULT_STORAGE_KEY};
pub use state::{CollectionSnapshot, TimerCollection};
