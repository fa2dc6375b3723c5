//! Status lines written to the caller's status sink.

use voxform_core::config::StatusMessagesConfig;

/// What the session wants the user to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    SpeakNow,
    Listening,
    Stopped,
    Unsupported,
    Error(String),
}

/// Renders `SessionStatus` values with configurable wording.
#[derive(Debug, Clone, Default)]
pub struct StatusText {
    messages: StatusMessagesConfig,
}

impl StatusText {
    pub fn new(messages: StatusMessagesConfig) -> Self {
        Self { messages }
    }

    pub fn render(&self, status: &SessionStatus) -> String {
        match status {
            SessionStatus::SpeakNow => self.messages.speak_now.clone(),
            SessionStatus::Listening => self.messages.listening.clone(),
            SessionStatus::Stopped => self.messages.stopped.clone(),
            SessionStatus::Unsupported => self.messages.unsupported.clone(),
            SessionStatus::Error(msg) => format!("{}{}", self.messages.error_prefix, msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_wording() {
        let text = StatusText::default();
        assert_eq!(text.render(&SessionStatus::SpeakNow), "🎤 Speak now...");
        assert_eq!(text.render(&SessionStatus::Listening), "🔊 Listening...");
        assert_eq!(text.render(&SessionStatus::Stopped), "✅ Recording stopped");
        assert_eq!(
            text.render(&SessionStatus::Error("no-speech".to_string())),
            "❌ Error: no-speech"
        );
    }

    #[test]
    fn test_custom_wording() {
        let text = StatusText::new(StatusMessagesConfig {
            error_prefix: "failed: ".to_string(),
            unsupported: "no mic".to_string(),
            ..StatusMessagesConfig::default()
        });
        assert_eq!(text.render(&SessionStatus::Unsupported), "no mic");
        assert_eq!(
            text.render(&SessionStatus::Error("network".to_string())),
            "failed: network"
        );
    }
}
