use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;

/// Defaults and tunables for the partition edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SegmentationConfig {
    /// Window used by newly created timers
    pub default_start: ClockTime,
    pub default_end: ClockTime,

    pub default_timer_name: String,

    /// How far past a moved start the first boundary lands when the move
    /// swallows the first segment
    pub start_push_minutes: i64,

    /// Colors handed to new segments, cycled by segment position
    pub palette: Vec<String>,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            default_start: ClockTime::from_minutes(9 * 60),
            default_end: ClockTime::from_minutes(12 * 60),
            default_timer_name: "New Timer".into(),
            start_push_minutes: 15,
            palette: vec![
                "#4f9dff".into(),
                "#ff8a4f".into(),
                "#5bd68a".into(),
                "#c77dff".into(),
                "#ffd166".into(),
                "#ef476f".into(),
            ],
        }
    }
}

impl SegmentationConfig {
    /// Default color for the segment at `index`.
    pub fn color_for(&self, index: usize) -> String {
        if self.palette.is_empty() {
            return "#888888".into();
        }
        self.palette[index % self.palette.len()].clone()
    }

    pub fn segment_title(position: usize) -> String {
        format!("Segment {position}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles_and_survives_empty() {
        let config = SegmentationConfig::default();
        assert_eq!(config.color_for(0), config.color_for(config.palette.len()));

        let empty = SegmentationConfig {
            palette: Vec::new(),
            ..SegmentationConfig::default()
        };
        assert_eq!(empty.color_for(3), "#888888");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: SegmentationConfig =
            serde_json::from_str(r#"{"startPushMinutes": 5}"#).unwrap();
        assert_eq!(config.start_push_minutes, 5);
        assert_eq!(config.default_start.to_string(), "09:00");
        assert_eq!(config.default_end.to_string(), "12:00");
    }
}
