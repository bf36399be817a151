use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::rag::engine::SearchParams;

/// Environment variable overriding the gateway URL
pub const ENV_GATEWAY_URL: &str = "NEUROLINK_GATEWAY_URL";
/// Environment variable supplying the gateway bearer token
pub const ENV_BEARER_TOKEN: &str = "NEUROLINK_BEARER_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub retrieval: SearchParams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the chat gateway
    pub url: String,
    /// Optional bearer token sent with every request
    pub bearer_token: Option<String>,
    /// Default agent/model selector
    pub agent: String,
    /// Request deadline in seconds
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            url: "http://localhost:8080".to_string(),
            bearer_token: None,
            agent: "gemini".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// Environment variables override the file on every load.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            let contents =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            toml::from_str(&contents).context("Failed to parse config file")?
        } else {
            let config = Config::default();
            config.save()?;
            config
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_string = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, toml_string).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;

        Ok(home.join(".neurolink").join("config.toml"))
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(ENV_GATEWAY_URL) {
            if !url.is_empty() {
                self.gateway.url = url;
            }
        }
        if let Ok(token) = std::env::var(ENV_BEARER_TOKEN) {
            if !token.is_empty() {
                self.gateway.bearer_token = Some(token);
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            gateway: GatewayConfig::default(),
            retrieval: SearchParams::default(),
        }
    }
}
