// Configuration Storage Service
// JSON config file holding the detection API token and endpoint override.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default)]
    pub version: String,
    /// Bearer token for the remote prediction service.
    pub api_token: Option<String>,
    /// Override for the prediction endpoint URL.
    pub api_url: Option<String>,
}

pub struct ConfigStore {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl ConfigStore {
    pub fn new(config_dir: PathBuf) -> Self {
        let config_file = config_dir.join("config.json");
        Self {
            config_dir,
            config_file,
        }
    }

    /// Default per-user config directory.
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("essaylens"))
    }

    fn ensure_dir(&self) -> Result<(), String> {
        fs::create_dir_all(&self.config_dir).map_err(|e| format!("Failed to create config dir: {}", e))
    }

    /// Load configuration; a missing file yields the defaults.
    pub fn load(&self) -> Result<AppConfig, String> {
        if !self.config_file.exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_file)
            .map_err(|e| format!("Failed to read config: {}", e))?;

        serde_json::from_str(&content).map_err(|e| format!("Failed to parse config: {}", e))
    }

    pub fn save(&self, config: &AppConfig) -> Result<(), String> {
        self.ensure_dir()?;

        let content = serde_json::to_string_pretty(config)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(&self.config_file, content).map_err(|e| format!("Failed to write config: {}", e))
    }

    pub fn get_api_token(&self) -> Result<Option<String>, String> {
        Ok(self.load()?.api_token)
    }

    pub fn set_api_token(&self, token: &str) -> Result<(), String> {
        let mut config = self.load()?;
        config.api_token = Some(token.to_string());
        self.save(&config)
    }

    pub fn get_api_url(&self) -> Result<Option<String>, String> {
        Ok(self.load()?.api_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.api_token.is_none());
        assert!(config.api_url.is_none());
    }

    #[test]
    fn test_config_serialization_round_trip() {
        let config = AppConfig {
            version: "1.0.0".to_string(),
            api_token: Some("r8_token".to_string()),
            api_url: None,
        };

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"apiToken\""));
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.api_token.as_deref(), Some("r8_token"));
    }

    #[test]
    fn test_load_missing_file_yields_default() {
        let store = ConfigStore::new(PathBuf::from("/nonexistent/essaylens-test"));
        let config = store.load().unwrap();
        assert!(config.api_token.is_none());
    }
}
