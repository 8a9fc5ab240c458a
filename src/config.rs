use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::engine::algorithm::Algorithm;

pub const MAX_ARRAY_SIZE: usize = 200;
pub const LOCALES: [&str; 2] = ["en", "id"];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_speed_ms")]
    pub speed_ms: u64,
    #[serde(default = "default_array_size")]
    pub array_size: usize,
    #[serde(default = "default_max_value")]
    pub max_value: u32,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_algorithm() -> String {
    "bubble".to_string()
}
fn default_speed_ms() -> u64 {
    50
}
fn default_array_size() -> usize {
    20
}
fn default_max_value() -> u32 {
    100
}
fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_locale() -> String {
    "en".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            speed_ms: default_speed_ms(),
            array_size: default_array_size(),
            max_value: default_max_value(),
            theme: default_theme(),
            locale: default_locale(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            debug!(path = %path.display(), "loaded config");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        debug!(path = %path.display(), "saved config");
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sortviz")
            .join("config.toml")
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm.parse().unwrap_or_default()
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm.as_str().to_string();
    }

    /// Reset stale or hand-edited values to something the app can run with.
    pub fn normalize(&mut self) {
        if let Err(err) = self.algorithm.parse::<Algorithm>() {
            warn!(%err, "resetting algorithm");
            self.algorithm = default_algorithm();
        }
        if !LOCALES.contains(&self.locale.as_str()) {
            warn!(locale = %self.locale, "unknown locale, resetting");
            self.locale = default_locale();
        }
        self.array_size = self.array_size.clamp(1, MAX_ARRAY_SIZE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.algorithm, "bubble");
        assert_eq!(config.speed_ms, 50);
        assert_eq!(config.array_size, 20);
        assert_eq!(config.max_value, 100);
        assert_eq!(config.locale, "en");
    }

    #[test]
    fn test_config_partial_file_keeps_other_defaults() {
        let toml_str = r#"
algorithm = "insertion"
speed_ms = 200
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.algorithm(), Algorithm::Insertion);
        assert_eq!(config.speed_ms, 200);
        assert_eq!(config.array_size, 20);
        assert_eq!(config.theme, "terminal-default");
    }

    #[test]
    fn test_normalize_resets_unknown_values() {
        let mut config = Config {
            algorithm: "quick".to_string(),
            locale: "fr".to_string(),
            array_size: 5000,
            ..Config::default()
        };
        config.normalize();
        assert_eq!(config.algorithm, "bubble");
        assert_eq!(config.locale, "en");
        assert_eq!(config.array_size, MAX_ARRAY_SIZE);

        config.array_size = 0;
        config.normalize();
        assert_eq!(config.array_size, 1);
    }

    #[test]
    fn test_normalize_keeps_title_case_algorithm() {
        let mut config = Config {
            algorithm: "Selection Sort".to_string(),
            ..Config::default()
        };
        config.normalize();
        assert_eq!(config.algorithm(), Algorithm::Selection);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set_algorithm(Algorithm::Selection);
        config.speed_ms = 10;
        config.locale = "id".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.algorithm(), Algorithm::Selection);
        assert_eq!(loaded.speed_ms, 10);
        assert_eq!(loaded.locale, "id");
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.speed_ms, 50);
    }

    #[test]
    fn test_load_malformed_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "speed_ms = \"fast\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
