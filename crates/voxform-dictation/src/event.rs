//! Messages a speech engine posts to its session.

use serde::{Deserialize, Serialize};

/// One recognized fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSlot {
    pub text: String,
    /// Final slots will not be revised by the engine.
    #[serde(default)]
    pub is_final: bool,
}

impl ResultSlot {
    pub fn final_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: true,
        }
    }

    pub fn interim(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: false,
        }
    }
}

/// A batch of result slots.
///
/// Engines resend earlier slots; only slots at or after `index` are new
/// or changed since the previous batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionEvent {
    #[serde(default)]
    pub index: usize,
    pub slots: Vec<ResultSlot>,
}

impl RecognitionEvent {
    pub fn new(index: usize, slots: Vec<ResultSlot>) -> Self {
        Self { index, slots }
    }

    /// Slots at or after the reported index. Empty if the index is past the end.
    pub fn changed_slots(&self) -> &[ResultSlot] {
        self.slots.get(self.index..).unwrap_or(&[])
    }
}

/// Everything an engine can tell its session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineEvent {
    Result(RecognitionEvent),
    Error(String),
    /// The audio stream ended, either on request or on its own.
    End,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changed_slots_respects_index() {
        let event = RecognitionEvent::new(
            1,
            vec![
                ResultSlot::final_text("old"),
                ResultSlot::final_text("new"),
                ResultSlot::interim("maybe"),
            ],
        );
        let changed = event.changed_slots();
        assert_eq!(changed.len(), 2);
        assert_eq!(changed[0].text, "new");
        assert!(!changed[1].is_final);
    }

    #[test]
    fn test_changed_slots_index_past_end() {
        let event = RecognitionEvent::new(5, vec![ResultSlot::final_text("only")]);
        assert!(event.changed_slots().is_empty());
    }

    #[test]
    fn test_engine_event_json_shape() {
        let events: Vec<EngineEvent> = serde_json::from_str(
            r#"[
                {"result": {"index": 0, "slots": [{"text": "hello", "is_final": true}, {"text": "wor"}]}},
                {"error": "network"},
                "end"
            ]"#,
        )
        .unwrap();

        assert_eq!(
            events[0],
            EngineEvent::Result(RecognitionEvent::new(
                0,
                vec![ResultSlot::final_text("hello"), ResultSlot::interim("wor")]
            ))
        );
        assert_eq!(events[1], EngineEvent::Error("network".to_string()));
        assert_eq!(events[2], EngineEvent::End);
    }
}
