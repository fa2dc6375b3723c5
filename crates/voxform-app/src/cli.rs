//! CLI argument definitions for the Voxform binary.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

/// Voxform - replay a recorded speech-engine script through a dictation session.
#[derive(Parser, Debug)]
#[command(name = "voxform", version, about)]
pub struct CliArgs {
    /// JSON script: an array of event bursts, one per engine start.
    pub script: PathBuf,

    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Language code (en, ta, ...) or full locale tag.
    #[arg(short = 'L', long = "locale")]
    pub locale: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// How long to wait for a stopping engine before giving up, in milliseconds.
    #[arg(long = "end-timeout-ms", default_value_t = 2000)]
    pub end_timeout_ms: u64,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > VOXFORM_CONFIG env var > platform default (~/.voxform/config.toml).
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("VOXFORM_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".voxform").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".voxform").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_args() {
        let args = CliArgs::parse_from(["voxform", "script.json"]);
        assert_eq!(args.script, PathBuf::from("script.json"));
        assert!(args.config.is_none());
        assert!(args.locale.is_none());
        assert_eq!(args.end_timeout_ms, 2000);
    }

    #[test]
    fn test_explicit_config_wins() {
        let args = CliArgs::parse_from(["voxform", "s.json", "--config", "/tmp/vox.toml"]);
        assert_eq!(args.resolve_config_path(), PathBuf::from("/tmp/vox.toml"));
    }

    #[test]
    fn test_log_level_priority() {
        let args = CliArgs::parse_from(["voxform", "s.json"]);
        assert_eq!(args.resolve_log_level("warn"), "warn");

        let args = CliArgs::parse_from(["voxform", "s.json", "-l", "debug"]);
        assert_eq!(args.resolve_log_level("warn"), "debug");
    }

    #[test]
    fn test_locale_flag() {
        let args = CliArgs::parse_from(["voxform", "s.json", "-L", "ta"]);
        assert_eq!(args.locale.as_deref(), Some("ta"));
    }
}
