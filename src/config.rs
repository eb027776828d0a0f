//! Tunable presentation settings for the dialogue surface.

use std::path::Path;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::typing::MIN_TYPE_INTERVAL;

/// Typing, auto-advance, and animation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DialogueConfig {
    /// Seconds between revealed characters.
    pub type_interval: f32,
    /// Auto-mode pause after a line finishes, in seconds.
    pub auto_next_delay: f32,
    /// Panel fade in/out duration, in seconds.
    pub fade_duration: f32,
    /// Stagger between choice pop-ins, in seconds.
    pub option_pop_delay: f32,
    pub auto_on_label: String,
    pub auto_off_label: String,
    /// Prefix prepended to `tachie`/`background` tag values on lookup.
    pub asset_root: String,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            type_interval: 0.05,
            auto_next_delay: 2.0,
            fade_duration: 0.3,
            option_pop_delay: 0.05,
            auto_on_label: "Auto: On".to_string(),
            auto_off_label: "Auto: Off".to_string(),
            asset_root: "dialogues/".to_string(),
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to parse dialogue config: {0}")]
    #[diagnostic(code(config::parse_error))]
    ParseError(#[from] toml::de::Error),

    #[error("io error: {0}")]
    #[diagnostic(code(config::io_error))]
    IoError(#[from] std::io::Error),
}

impl DialogueConfig {
    /// Loads a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Saves the config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Per-character interval with the non-positive guard applied.
    pub fn effective_type_interval(&self) -> f32 {
        self.type_interval.max(MIN_TYPE_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_roundtrip() {
        let config = DialogueConfig::default();
        let toml_str = toml::to_string(&config).expect("serialize");
        let loaded: DialogueConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(config, loaded);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let loaded: DialogueConfig = toml::from_str("type_interval = 0.1").expect("deserialize");
        assert_eq!(loaded.type_interval, 0.1);
        assert_eq!(loaded.auto_next_delay, 2.0);
        assert_eq!(loaded.asset_root, "dialogues/");
    }

    #[test]
    fn non_positive_interval_is_clamped() {
        let config = DialogueConfig {
            type_interval: 0.0,
            ..DialogueConfig::default()
        };
        assert_eq!(config.effective_type_interval(), MIN_TYPE_INTERVAL);
        let config = DialogueConfig {
            type_interval: -1.0,
            ..DialogueConfig::default()
        };
        assert_eq!(config.effective_type_interval(), MIN_TYPE_INTERVAL);
    }
}
