use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Environment variable holding the MetaStats API token
pub const TOKEN_ENV: &str = "METAAPI_TOKEN";
/// Environment variable holding the MetaTrader account id
pub const ACCOUNT_ID_ENV: &str = "METAAPI_ACCOUNT_ID";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config yaml: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Missing environment variable {0}")]
    MissingEnv(&'static str),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by the CORS layer
    pub cors_origins: Vec<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec![
                "https://nexusfuturefund.vercel.app".to_string(),
                "http://localhost:3000".to_string(),
            ],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheConfig {
    pub ttl_secs: u64,
    /// Upper bound on distinct cached ranges. Unbounded when absent.
    #[serde(default)]
    pub max_entries: Option<usize>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 60,
            max_entries: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    /// Start of the account history, used when a request omits `start_time`
    pub history_start: String,
    pub request_timeout_ms: u64,
    /// Page size passed to the historical-trades endpoint
    pub limit: u32,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://metastats-api-v1.vint-hill.agiliumtrade.ai".to_string(),
            history_start: crate::upstream::DEFAULT_HISTORY_START.to_string(),
            request_timeout_ms: 60_000,
            limit: 1000,
        }
    }
}

/// MetaStats credentials, read from the process environment
#[derive(Debug)]
pub struct Credentials {
    pub token: SecretString,
    pub account_id: String,
}

impl Credentials {
    /// Load credentials from the environment, after merging `.env` if present
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let token = non_empty_env(TOKEN_ENV)?;
        let account_id = non_empty_env(ACCOUNT_ID_ENV)?;
        Ok(Self {
            token: SecretString::from(token),
            account_id,
        })
    }
}

fn non_empty_env(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingEnv(name))
}

impl AppConfig {
    /// Load `config/{env}.yaml`
    pub fn load(env: &str) -> Result<Self, ConfigError> {
        Self::from_file(format!("config/{}.yaml", env))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_yaml::from_str(&content)?)
    }
}
