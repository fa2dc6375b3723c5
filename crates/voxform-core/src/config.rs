use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, VoxformError};

/// Top-level configuration for Voxform.
///
/// Loaded from `~/.voxform/config.toml` by default. Missing sections and
/// missing keys fall back to their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoxformConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub dictation: DictationConfig,
}

impl VoxformConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: VoxformConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| VoxformError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Dictation session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DictationConfig {
    /// Short language code (`en`, `ta`, ...) or a full locale tag.
    pub locale_code: String,
    /// Ask the engine to keep listening across pauses.
    pub continuous: bool,
    /// Ask the engine to report provisional results.
    pub interim_results: bool,
    /// Status texts written to the status sink.
    #[serde(default)]
    pub messages: StatusMessagesConfig,
}

impl Default for DictationConfig {
    fn default() -> Self {
        Self {
            locale_code: "en".to_string(),
            continuous: true,
            interim_results: true,
            messages: StatusMessagesConfig::default(),
        }
    }
}

/// Status texts shown while dictating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusMessagesConfig {
    /// Recording, nothing provisional pending.
    pub speak_now: String,
    /// Recording, provisional text on screen.
    pub listening: String,
    /// Cycle finished.
    pub stopped: String,
    /// No speech engine in this host.
    pub unsupported: String,
    /// Prepended to engine error messages.
    pub error_prefix: String,
}

impl Default for StatusMessagesConfig {
    fn default() -> Self {
        Self {
            speak_now: "🎤 Speak now...".to_string(),
            listening: "🔊 Listening...".to_string(),
            stopped: "✅ Recording stopped".to_string(),
            unsupported: "⚠️ Speech recognition not supported".to_string(),
            error_prefix: "❌ Error: ".to_string(),
        }
    }
}
