//! Recorded engine scripts.
//!
//! A script is a JSON array of bursts. Burst `n` holds the events the engine
//! produced after its `n`th start request:
//!
//! ```json
//! [
//!   [{"result": {"index": 0, "slots": [{"text": "hello", "is_final": true}]}}, "end"],
//!   [{"result": {"index": 0, "slots": [{"text": "world", "is_final": true}]}}]
//! ]
//! ```

use std::path::Path;

use voxform_core::error::{Result, VoxformError};
use voxform_dictation::EngineEvent;

#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub bursts: Vec<Vec<EngineEvent>>,
}

impl Script {
    pub fn from_json(content: &str) -> Result<Self> {
        let bursts: Vec<Vec<EngineEvent>> = serde_json::from_str(content)?;
        if bursts.is_empty() {
            return Err(VoxformError::Script("script has no bursts".to_string()));
        }
        Ok(Self { bursts })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let script = Self::from_json(&content)?;
        tracing::info!(
            path = %path.display(),
            bursts = script.bursts.len(),
            "Script loaded"
        );
        Ok(script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_script() {
        let script = Script::from_json(
            r#"[
                [{"result": {"index": 0, "slots": [{"text": "hello", "is_final": true}]}}, "end"],
                [{"error": "no-speech"}]
            ]"#,
        )
        .unwrap();
        assert_eq!(script.bursts.len(), 2);
        assert_eq!(script.bursts[0][1], EngineEvent::End);
        assert_eq!(script.bursts[1][0], EngineEvent::Error("no-speech".to_string()));
    }

    #[test]
    fn test_empty_script_rejected() {
        assert!(matches!(
            Script::from_json("[]"),
            Err(VoxformError::Script(_))
        ));
    }

    #[test]
    fn test_malformed_script_rejected() {
        assert!(matches!(
            Script::from_json(r#"[["bogus"]]"#),
            Err(VoxformError::Serialization(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"[["end"]]"#).unwrap();
        let script = Script::load(file.path()).unwrap();
        assert_eq!(script.bursts, vec![vec![EngineEvent::End]]);
    }
}
