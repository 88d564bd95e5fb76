use serde::{Deserialize, Serialize};

use crate::models::SegmentField;

use super::{controller::TimelineController, state::CollectionSnapshot};

/// Intents a presentation layer may send, one per controller operation.
/// Times travel as raw "HH:MM" strings and are clamped on arrival.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TimelineCommand {
    AddTimer,
    RemoveTimer { id: String },
    Rename { id: String, name: String },
    AddSegment { id: String },
    RemoveSegment { id: String, segment_id: String },
    SetStart { id: String, value: String },
    SetEnd { id: String, value: String },
    SetSegmentField {
        id: String,
        segment_id: String,
        edit: SegmentField,
    },
    OpenEditor { id: String },
    CloseEditor,
}

impl TimelineController {
    /// Applies a command and hands back the resulting read model.
    pub fn dispatch(&mut self, command: TimelineCommand) -> CollectionSnapshot {
        match command {
            TimelineCommand::AddTimer => {
                self.add_timer();
            }
            TimelineCommand::RemoveTimer { id } => self.remove_timer(&id),
            TimelineCommand::Rename { id, name } => self.rename(&id, &name),
            TimelineCommand::AddSegment { id } => self.add_segment(&id),
            TimelineCommand::RemoveSegment { id, segment_id } => {
                self.remove_segment(&id, &segment_id)
            }
            TimelineCommand::SetStart { id, value } => self.set_start(&id, &value),
            TimelineCommand::SetEnd { id, value } => self.set_end(&id, &value),
            TimelineCommand::SetSegmentField {
                id,
                segment_id,
                edit,
            } => self.set_segment_field(&id, &segment_id, &edit),
            TimelineCommand::OpenEditor { id } => self.open_editor(&id),
            TimelineCommand::CloseEditor => self.close_editor(),
        }

        self.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryRepository;

    fn command(json: &str) -> TimelineCommand {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_adapter_json() {
        assert_eq!(command(r#"{"type":"addTimer"}"#), TimelineCommand::AddTimer);
        assert_eq!(
            command(r#"{"type":"removeSegment","id":"t","segmentId":"s"}"#),
            TimelineCommand::RemoveSegment {
                id: "t".into(),
                segment_id: "s".into()
            }
        );
        assert_eq!(
            command(
                r#"{"type":"setSegmentField","id":"t","segmentId":"s",
                    "edit":{"field":"end","value":"10:15"}}"#
            ),
            TimelineCommand::SetSegmentField {
                id: "t".into(),
                segment_id: "s".into(),
                edit: SegmentField::End("10:15".into()),
            }
        );
    }

    #[test]
    fn dispatch_drives_a_full_editing_session() {
        let mut controller = TimelineController::new(MemoryRepository::new());

        let snapshot = controller.dispatch(TimelineCommand::AddTimer);
        let id = snapshot.timers[0].id.clone();

        controller.dispatch(TimelineCommand::OpenEditor { id: id.clone() });
        controller.dispatch(TimelineCommand::AddSegment { id: id.clone() });
        let first_segment = controller.timer(&id).unwrap().segments[0].id.clone();

        controller.dispatch(TimelineCommand::SetSegmentField {
            id: id.clone(),
            segment_id: first_segment.clone(),
            edit: SegmentField::Title("Warm-up".into()),
        });
        controller.dispatch(TimelineCommand::SetSegmentField {
            id: id.clone(),
            segment_id: first_segment,
            edit: SegmentField::End("10:00".into()),
        });
        controller.dispatch(TimelineCommand::SetEnd {
            id: id.clone(),
            value: "12:30".into(),
        });
        let snapshot = controller.dispatch(TimelineCommand::Rename {
            id: id.clone(),
            name: "Class".into(),
        });

        let timer = snapshot.editing_timer().unwrap();
        assert_eq!(timer.name, "Class");
        assert_eq!(timer.segments[0].title, "Warm-up");
        assert_eq!(timer.segments[0].end.to_string(), "10:00");
        assert_eq!(timer.end.to_string(), "12:30");

        let snapshot = controller.dispatch(TimelineCommand::CloseEditor);
        assert_eq!(snapshot.editing, None);

        let snapshot = controller.dispatch(TimelineCommand::RemoveTimer { id });
        assert!(snapshot.timers.is_empty());
    }

    #[test]
    fn snapshot_serializes_for_adapters() {
        let mut controller = TimelineController::new(MemoryRepository::new());
        let id = controller.add_timer();
        let snapshot = controller.dispatch(TimelineCommand::OpenEditor { id: id.clone() });

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["editing"], id.as_str());
        assert_eq!(value["timers"][0]["segments"][0]["title"], "Segment 1");
    }
}
