use std::io::ErrorKind;
use std::path::Path;

use tokio::fs;

use serde::Deserialize;
use thiserror::Error;

use crate::llm::{ApiKey, GeminiProvider};

/// Environment variable holding the process-wide provider credential.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variable overriding `server.port`.
pub const PORT_ENV: &str = "PORT";

// ============================================================================
// Config (root)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub relay: RelayConfig,
}

impl Config {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ConfigError::Io(e)),
        };
        Ok(serde_saphyr::from_str(&contents)?)
    }

    /// Apply overrides read from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_port_override(std::env::var(PORT_ENV).ok())
    }

    fn apply_port_override(&mut self, port: Option<String>) -> Result<(), ConfigError> {
        if let Some(raw) = port {
            self.server.port = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?;
        }
        Ok(())
    }
}

/// Read the process-wide API key, if one is set.
pub fn api_key_from_env() -> Option<ApiKey> {
    ApiKey::from_optional(std::env::var(API_KEY_ENV).ok())
}

// ============================================================================
// ServerConfig
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_request_timeout() -> u64 {
    300
}

// ============================================================================
// GeminiConfig
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GeminiConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
        }
    }
}

fn default_model() -> String {
    GeminiProvider::DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    GeminiProvider::DEFAULT_BASE_URL.to_string()
}

// ============================================================================
// RelayConfig
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RelayConfig {
    /// Prepend the instruction turn to every conversation.
    #[serde(default = "default_system_preamble")]
    pub system_preamble: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            system_preamble: default_system_preamble(),
        }
    }
}

fn default_system_preamble() -> bool {
    true
}

// ============================================================================
// ConfigError
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Yaml(#[from] serde_saphyr::Error),

    #[error("invalid port: {0:?}")]
    InvalidPort(String),
}

// ============================================================================
// Tests
// ============================================================================
