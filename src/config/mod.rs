//! Configuration management for transcoder-host
//!
//! Handles loader configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::module::traits::ModuleError;

/// Module loader configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Enable module loading
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Base name of the native transcoder library (without platform
    /// prefix/suffix)
    #[serde(default = "default_library_name")]
    pub library_name: String,

    /// Directory containing the native module binaries
    #[serde(default = "default_modules_dir")]
    pub modules_dir: String,

    /// Per-listener event channel capacity
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

fn default_true() -> bool {
    true
}

fn default_library_name() -> String {
    "gdx-basis-universal".to_string()
}

fn default_modules_dir() -> String {
    "modules".to_string()
}

fn default_event_buffer() -> usize {
    16
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            library_name: "gdx-basis-universal".to_string(),
            modules_dir: "modules".to_string(),
            event_buffer: 16,
        }
    }
}

impl LoaderConfig {
    /// Load configuration from a TOML file.
    ///
    /// A missing file yields the default configuration; a present but
    /// unparsable file is an error.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ModuleError> {
        if !path.as_ref().exists() {
            debug!(
                "no loader config at {}, using defaults",
                path.as_ref().display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ModuleError::InvalidConfig(format!("failed to read config file: {}", e))
        })?;

        let config: LoaderConfig = toml::from_str(&contents).map_err(|e| {
            ModuleError::InvalidConfig(format!("failed to parse config TOML: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate field constraints.
    pub fn validate(&self) -> Result<(), ModuleError> {
        if self.library_name.is_empty() {
            return Err(ModuleError::InvalidConfig(
                "library_name cannot be empty".to_string(),
            ));
        }
        if self.event_buffer == 0 {
            return Err(ModuleError::InvalidConfig(
                "event_buffer must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoaderConfig::default();
        assert!(config.enabled);
        assert_eq!(config.library_name, "gdx-basis-universal");
        assert_eq!(config.modules_dir, "modules");
        assert_eq!(config.event_buffer, 16);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = LoaderConfig::from_file("does/not/exist.toml").unwrap();
        assert_eq!(config.library_name, "gdx-basis-universal");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: LoaderConfig = toml::from_str("library_name = \"custom-transcoder\"").unwrap();
        assert_eq!(config.library_name, "custom-transcoder");
        assert!(config.enabled);
        assert_eq!(config.event_buffer, 16);
    }

    #[test]
    fn test_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("loader.toml");
        std::fs::write(
            &path,
            "enabled = false\nmodules_dir = \"natives\"\nevent_buffer = 4\n",
        )
        .unwrap();

        let config = LoaderConfig::from_file(&path).unwrap();
        assert!(!config.enabled);
        assert_eq!(config.modules_dir, "natives");
        assert_eq!(config.event_buffer, 4);
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("loader.toml");
        std::fs::write(&path, "enabled = \"not a bool").unwrap();

        let err = LoaderConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ModuleError::InvalidConfig(_)));
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let config = LoaderConfig {
            library_name: String::new(),
            ..LoaderConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ModuleError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_buffer() {
        let config = LoaderConfig {
            event_buffer: 0,
            ..LoaderConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ModuleError::InvalidConfig(_))
        ));
    }
}
