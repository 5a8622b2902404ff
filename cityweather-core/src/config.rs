use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

use crate::map::OSM_TILE_URL;
use crate::provider::{nominatim, openweather};

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// weather_base_url = "https://api.openweathermap.org"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// OpenWeather API key; `OPENWEATHER_API_KEY` wins when set.
    pub api_key: Option<String>,
    pub weather_base_url: String,
    pub geocode_base_url: String,
    /// Raster tile template with `{s}`, `{z}`, `{x}` and `{y}` placeholders.
    pub tile_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            weather_base_url: openweather::DEFAULT_BASE_URL.to_string(),
            geocode_base_url: nominatim::DEFAULT_BASE_URL.to_string(),
            tile_url: OSM_TILE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// API key from the environment, falling back to the config file.
    pub fn api_key(&self) -> Result<String> {
        self.resolve_api_key(std::env::var(API_KEY_ENV).ok())
    }

    /// Same as [`Config::api_key`] with the environment value passed in.
    pub fn resolve_api_key(&self, env_value: Option<String>) -> Result<String> {
        env_value
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|key| !key.trim().is_empty()))
            .map(|key| key.trim().to_string())
            .ok_or_else(|| {
                anyhow!(
                    "No OpenWeather API key configured.\n\
                     Hint: run `cityweather configure` or set {API_KEY_ENV}."
                )
            })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key.trim().to_string());
    }

    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "cityweather", "cityweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.resolve_api_key(None).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No OpenWeather API key configured"));
        assert!(msg.contains(API_KEY_ENV));
    }

    #[test]
    fn environment_key_overrides_stored_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        let key = cfg.resolve_api_key(Some("ENV_KEY".into())).expect("key must resolve");
        assert_eq!(key, "ENV_KEY");
    }

    #[test]
    fn blank_environment_key_falls_back_to_file() {
        let mut cfg = Config::default();
        cfg.set_api_key("  FILE_KEY ".into());

        let key = cfg.resolve_api_key(Some("   ".into())).expect("key must resolve");
        assert_eq!(key, "FILE_KEY");
    }

    #[test]
    fn partial_toml_uses_defaults_for_missing_fields() {
        let cfg: Config = toml::from_str(r#"api_key = "abc""#).expect("valid toml");

        assert_eq!(cfg.api_key.as_deref(), Some("abc"));
        assert_eq!(cfg.weather_base_url, openweather::DEFAULT_BASE_URL);
        assert_eq!(cfg.geocode_base_url, nominatim::DEFAULT_BASE_URL);
        assert_eq!(cfg.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing/config.toml");
        let cfg = Config::load_from(&path).expect("defaults");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested/config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("SAVED".into());
        cfg.request_timeout_secs = 3;
        cfg.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded, cfg);
    }
}
