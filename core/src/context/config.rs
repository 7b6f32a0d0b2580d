//! Detection config file
//!
//! ```toml
//! data_path = "data/scribing"
//!
//! [detection]
//! window_ms = 1000
//! min_consistency = 0.5
//! confidence_ceiling = 0.95
//! max_additional_evidence = 3
//! ```

use std::path::{Path, PathBuf};

use scribe_types::DetectionSettings;
use serde::{Deserialize, Serialize};

use super::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Scribing data file or directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_path: Option<PathBuf>,

    pub detection: DetectionSettings,
}

impl DetectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from a TOML file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        Self::parse(&content, path)
    }

    /// Parse and validate config text. `path` is only used for error context.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to a TOML file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::Io(path.to_path_buf(), e))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.detection;
        if s.window_ms <= 0 {
            return Err(invalid(format!("window_ms must be positive, got {}", s.window_ms)));
        }
        if !(s.min_consistency > 0.0 && s.min_consistency <= 1.0) {
            return Err(invalid(format!(
                "min_consistency must be in (0, 1], got {}",
                s.min_consistency
            )));
        }
        if !(s.confidence_ceiling > 0.0 && s.confidence_ceiling < 1.0) {
            return Err(invalid(format!(
                "confidence_ceiling must be in (0, 1), got {}",
                s.confidence_ceiling
            )));
        }
        Ok(())
    }
}

fn invalid(reason: String) -> ConfigError {
    ConfigError::Invalid { reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = DetectionConfig::load(Path::new("/nonexistent/scribe/config.toml"))
            .expect("defaults");
        assert_eq!(config, DetectionConfig::default());
        assert_eq!(config.detection.window_ms, 1000);
        assert_eq!(config.detection.min_consistency, 0.5);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = DetectionConfig::parse(
            "data_path = \"data\"\n[detection]\nwindow_ms = 1500\n",
            Path::new("config.toml"),
        )
        .expect("valid config");

        assert_eq!(config.detection.window_ms, 1500);
        assert_eq!(config.detection.confidence_ceiling, 0.95);
        assert_eq!(config.detection.max_additional_evidence, 3);
        assert_eq!(config.data_path, Some(PathBuf::from("data")));
    }

    #[test]
    fn rejects_out_of_range_settings() {
        for body in [
            "[detection]\nwindow_ms = 0\n",
            "[detection]\nmin_consistency = 0.0\n",
            "[detection]\nmin_consistency = 1.5\n",
            "[detection]\nconfidence_ceiling = 1.0\n",
        ] {
            let err = DetectionConfig::parse(body, Path::new("config.toml")).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { .. }), "{body}");
        }
    }

    #[test]
    fn full_consistency_threshold_is_allowed() {
        let config = DetectionConfig::parse(
            "[detection]\nmin_consistency = 1.0\n",
            Path::new("config.toml"),
        )
        .expect("valid config");
        assert_eq!(config.detection.min_consistency, 1.0);
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = DetectionConfig::parse("[detection", Path::new("config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(..)));
    }

    #[test]
    fn save_then_load() {
        let path = std::env::temp_dir()
            .join(format!("scribe-config-{}", std::process::id()))
            .join("config.toml");
        let mut config = DetectionConfig::new();
        config.detection.window_ms = 1200;

        config.save(&path).expect("saved");
        let loaded = DetectionConfig::load(&path).expect("loaded");
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }
}
