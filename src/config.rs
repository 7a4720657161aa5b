use crate::scheduler::DEFAULT_FPS;
use crate::settings::Attributes;
use crate::typewriter::{TypewriterTiming, DEFAULT_PHRASES};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Complete application configuration for export/import
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Version field for future compatibility
    pub version: u32,
    /// Raw particle attributes, resolved with silent fallback
    pub attributes: Attributes,
    /// Backing-store pixels per logical pixel
    pub pixel_ratio: f64,
    /// Frames per second of the animation loop
    pub fps: u32,
    /// Phrases cycled by the typewriter banner
    pub phrases: Vec<String>,
    pub typewriter: TypewriterTiming,
}

impl AppConfig {
    /// Export config to a JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        fs::write(path, json).map_err(|e| format!("Failed to write config file: {}", e))?;
        Ok(())
    }

    /// Import config from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read config file: {}", e))?;
        serde_json::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Default config location under the user's config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("particle-field").join("config.json"))
    }

    /// Load the config at `explicit`, or the default file when it exists.
    ///
    /// An explicit path must load. A broken default file is logged and
    /// replaced by defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, String> {
        if let Some(path) = explicit {
            let config = Self::load_from_file(path)?;
            info!("Loaded config from {}", path.display());
            return Ok(config);
        }

        match Self::default_path() {
            Some(path) if path.exists() => match Self::load_from_file(&path) {
                Ok(config) => {
                    info!("Loaded config from {}", path.display());
                    Ok(config)
                }
                Err(e) => {
                    warn!("Ignoring {}: {}", path.display(), e);
                    Ok(Self::default())
                }
            },
            _ => Ok(Self::default()),
        }
    }

    /// Overlay an attribute value given on the command line
    pub fn set_attribute(&mut self, key: &str, value: Option<String>) {
        if let Some(value) = value {
            self.attributes.insert(key.to_string(), value);
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            attributes: Attributes::new(),
            pixel_ratio: 1.0,
            fps: DEFAULT_FPS,
            phrases: DEFAULT_PHRASES.iter().map(|p| p.to_string()).collect(),
            typewriter: TypewriterTiming::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{ParticleSettings, ATTR_EASE, ATTR_QUANTITY};
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_file_save_and_load() {
        let mut config = AppConfig::default();
        config.set_attribute(ATTR_QUANTITY, Some("75".to_string()));
        config.pixel_ratio = 2.0;
        config.phrases = vec!["Rustacean".to_string()];

        let temp_file = NamedTempFile::new().unwrap();
        config.save_to_file(temp_file.path()).unwrap();
        let loaded = AppConfig::load(Some(temp_file.path())).unwrap();

        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.pixel_ratio, 2.0);
        assert_eq!(loaded.phrases, vec!["Rustacean".to_string()]);
        assert_eq!(ParticleSettings::resolve(&loaded.attributes).quantity, 75);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(
            temp_file.path(),
            r#"{ "attributes": { "particle-ease": "oops" } }"#,
        )
        .unwrap();

        let loaded = AppConfig::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded.fps, DEFAULT_FPS);
        assert_eq!(loaded.phrases.len(), DEFAULT_PHRASES.len());
        assert_eq!(loaded.typewriter, TypewriterTiming::default());
        assert_eq!(loaded.attributes.get(ATTR_EASE).map(String::as_str), Some("oops"));
        assert_eq!(ParticleSettings::resolve(&loaded.attributes).ease, 50.0);
    }

    #[test]
    fn test_cli_attribute_overrides_file() {
        let mut config = AppConfig::default();
        config.set_attribute(ATTR_QUANTITY, Some("10".to_string()));
        config.set_attribute(ATTR_QUANTITY, None);
        assert_eq!(config.attributes[ATTR_QUANTITY], "10");
        config.set_attribute(ATTR_QUANTITY, Some("20".to_string()));
        assert_eq!(config.attributes[ATTR_QUANTITY], "20");
    }

    #[test]
    fn test_invalid_config_file() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "not valid json").unwrap();

        let result = AppConfig::load_from_file(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_explicit_config_file() {
        let result = AppConfig::load(Some(Path::new("/nonexistent/path/config.json")));
        assert!(result.is_err());
    }
}
