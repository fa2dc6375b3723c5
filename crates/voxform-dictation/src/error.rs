//! Error types for the dictation session and its engines.

use voxform_core::error::VoxformError;

/// Errors reported by speech engines.
///
/// None of these cross the session's public contract: the session turns them
/// into status text and boolean returns.
#[derive(Debug, thiserror::Error)]
pub enum DictationError {
    #[error("speech recognition is not supported in this host")]
    UnsupportedCapability,
    #[error("engine error: {0}")]
    Engine(String),
    #[error("engine restart failed: {0}")]
    RestartFailure(String),
}

impl From<DictationError> for VoxformError {
    fn from(err: DictationError) -> Self {
        VoxformError::Dictation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dictation_error_display() {
        assert_eq!(
            DictationError::UnsupportedCapability.to_string(),
            "speech recognition is not supported in this host"
        );
        assert_eq!(
            DictationError::Engine("not-allowed".to_string()).to_string(),
            "engine error: not-allowed"
        );
        assert_eq!(
            DictationError::RestartFailure("busy".to_string()).to_string(),
            "engine restart failed: busy"
        );
    }

    #[test]
    fn test_into_voxform_error() {
        let err: VoxformError = DictationError::Engine("audio-capture".to_string()).into();
        match err {
            VoxformError::Dictation(msg) => assert!(msg.contains("audio-capture")),
            other => panic!("Expected Dictation variant, got {:?}", other),
        }
    }
}
