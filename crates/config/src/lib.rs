//! Configuration loading, validation, and management for GameChat.
//!
//! Loads configuration from `~/.gamechat/config.toml` (or an explicit path)
//! with `.env` and environment variable overrides. Validates all settings
//! at startup.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.gamechat/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key (can be overridden per-provider)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Default LLM provider
    #[serde(default = "default_provider")]
    pub default_provider: String,

    /// Default model
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Default temperature
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,

    /// Default max tokens per LLM response (unset = provider default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_max_tokens: Option<u32>,

    /// Gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Dataset and column summary locations
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Conversation history bounding
    #[serde(default)]
    pub history: HistoryConfig,

    /// Turn orchestration settings
    #[serde(default)]
    pub agent: AgentConfig,

    /// Provider-specific configurations
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

fn default_provider() -> String {
    "openai".into()
}
fn default_model() -> String {
    "gpt-4o".into()
}
fn default_temperature() -> f32 {
    0.7
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("default_provider", &self.default_provider)
            .field("default_model", &self.default_model)
            .field("default_temperature", &self.default_temperature)
            .field("default_max_tokens", &self.default_max_tokens)
            .field("gateway", &self.gateway)
            .field("dataset", &self.dataset)
            .field("history", &self.history)
            .field("agent", &self.agent)
            .field("providers", &self.providers)
            .finish()
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("default_model", &self.default_model)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Origins allowed by CORS. Empty = no CORS layer.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

fn default_port() -> u16 {
    5001
}
fn default_host() -> String {
    "127.0.0.1".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            allowed_origins: vec![],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// The games table (CSV with a header row)
    #[serde(default = "default_games_csv")]
    pub games_csv: PathBuf,

    /// Side store for generated column summaries (JSON)
    #[serde(default = "default_summary_path")]
    pub summary_path: PathBuf,

    /// Sample values per column handed to the summarizer
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    /// Upper bound on rows injected into a row-specific prompt
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
}

fn default_games_csv() -> PathBuf {
    PathBuf::from("games_description.csv")
}
fn default_summary_path() -> PathBuf {
    PathBuf::from("column_summary_info.json")
}
fn default_sample_size() -> usize {
    5
}
fn default_max_rows() -> usize {
    5
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            games_csv: default_games_csv(),
            summary_path: default_summary_path(),
            sample_size: default_sample_size(),
            max_rows: default_max_rows(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Turns kept verbatim in each prompt; older turns are flattened.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

fn default_recent_limit() -> usize {
    10
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Retrieve rows only after a query is classified as row-specific.
    /// Off by default: rows are retrieved for every query.
    #[serde(default)]
    pub defer_row_retrieval: bool,

    /// Sessions kept in memory before the least recently used is evicted.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_max_sessions() -> usize {
    1_000
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            defer_row_retrieval: false,
            max_sessions: default_max_sessions(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,

    /// HTTP request timeout for completion calls.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: None,
            default_model: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.gamechat/config.toml).
    ///
    /// A `.env` file in the working directory is read first. API keys are
    /// then taken from the environment when the file does not set one:
    /// - `GAMECHAT_API_KEY` (highest priority)
    /// - `OPENAI_API_KEY`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(None)
    }

    /// Load configuration from an explicit path, or the default one.
    pub fn load_with(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!(error = %e, "No .env file loaded");
        }

        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_dir().join("config.toml"),
        };
        let mut config = Self::load_from(&config_path)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Environment variable overrides (highest priority).
    fn apply_env(&mut self) {
        if self.api_key.is_none() {
            self.api_key = std::env::var("GAMECHAT_API_KEY")
                .ok()
                .or_else(|| std::env::var("OPENAI_API_KEY").ok());
        }

        if let Ok(provider) = std::env::var("GAMECHAT_PROVIDER") {
            self.default_provider = provider;
        }

        if let Ok(model) = std::env::var("GAMECHAT_MODEL") {
            if let Some(section) = self.providers.get_mut(&self.default_provider) {
                section.default_model = Some(model.clone());
            }
            self.default_model = model;
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".gamechat")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_temperature < 0.0 || self.default_temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "default_temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.history.recent_limit == 0 {
            return Err(ConfigError::ValidationError(
                "history.recent_limit must be at least 1".into(),
            ));
        }

        if self.dataset.max_rows == 0 {
            return Err(ConfigError::ValidationError(
                "dataset.max_rows must be at least 1".into(),
            ));
        }

        if self.agent.max_sessions == 0 {
            return Err(ConfigError::ValidationError(
                "agent.max_sessions must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
            || self
                .providers
                .get(&self.default_provider)
                .is_some_and(|p| p.api_key.is_some())
    }

    /// The model to request: the default provider's `default_model` when its
    /// section sets one, else the top-level `default_model`.
    pub fn model(&self) -> &str {
        self.providers
            .get(&self.default_provider)
            .and_then(|p| p.default_model.as_deref())
            .unwrap_or(&self.default_model)
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_provider: default_provider(),
            default_model: default_model(),
            default_temperature: default_temperature(),
            default_max_tokens: None,
            gateway: GatewayConfig::default(),
            dataset: DatasetConfig::default(),
            history: HistoryConfig::default(),
            agent: AgentConfig::default(),
            providers: HashMap::new(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
