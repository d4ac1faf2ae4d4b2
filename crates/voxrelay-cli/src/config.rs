//! Configuration management for voxrelay CLI
//!
//! Stores API key, server URL and the default agent in
//! ~/.config/voxrelay/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const CONFIG_DIR: &str = "voxrelay";
const CONFIG_FILE: &str = "config.toml";

/// Environment override for the server URL (also read from `.env`)
pub const URL_ENV: &str = "VOXRELAY_URL";
/// Environment override for the API key
pub const API_KEY_ENV: &str = "VOXRELAY_API_KEY";

/// CLI Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Agent used by `chat` and `call` when `--agent` is omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_agent: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            default_agent: None,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from file (or defaults), then apply environment overrides
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        let mut config = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            Self::parse(&content)?
        } else {
            Self::default()
        };

        config.apply_overrides(
            std::env::var(URL_ENV).ok(),
            std::env::var(API_KEY_ENV).ok(),
        );

        Ok(config)
    }

    fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    fn apply_overrides(&mut self, url: Option<String>, api_key: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    pub fn set_api_key(&mut self, key: String) {
        self.api_key = Some(key);
    }

    /// The agent to use: explicit flag first, then the configured default
    pub fn resolve_agent(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .or_else(|| self.default_agent.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config = Config::parse("default_agent = \"a1\"\n").unwrap();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.default_agent.as_deref(), Some("a1"));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_toml_roundtrip_skips_unset_fields() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(!text.contains("api_key"));
        assert_eq!(Config::parse(&text).unwrap(), config);
    }

    #[test]
    fn test_env_overrides_win() {
        let mut config = Config::default();
        config.apply_overrides(Some("https://relay.example.com".into()), Some("k".into()));
        assert_eq!(config.base_url, "https://relay.example.com");
        assert_eq!(config.api_key.as_deref(), Some("k"));

        config.apply_overrides(Some("  ".into()), None);
        assert_eq!(config.base_url, "https://relay.example.com");
    }

    #[test]
    fn test_resolve_agent_prefers_flag() {
        let config = Config {
            default_agent: Some("a1".into()),
            ..Config::default()
        };
        assert_eq!(config.resolve_agent(Some("b2")).as_deref(), Some("b2"));
        assert_eq!(config.resolve_agent(Some(" ")).as_deref(), Some("a1"));
        assert_eq!(config.resolve_agent(None).as_deref(), Some("a1"));
        assert!(Config::default().resolve_agent(None).is_none());
    }
}
