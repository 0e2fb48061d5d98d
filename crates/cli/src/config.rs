//! CLI configuration: `council-research.toml` plus environment overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use research::ModelId;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable overriding [`AppConfig::research_model`].
pub const RESEARCH_MODEL_ENV: &str = "COUNCIL_RESEARCH_MODEL";
/// Environment variable overriding [`AppConfig::chairman_model`].
pub const CHAIRMAN_MODEL_ENV: &str = "COUNCIL_CHAIRMAN_MODEL";
/// Standard OpenTelemetry endpoint variable; overrides [`AppConfig::otlp_endpoint`].
pub const OTLP_ENDPOINT_ENV: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Runtime configuration. Every field has a default, so an absent or empty
/// file is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// OpenAI-compatible API base URL.
    pub api_base_url: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Model used for every research category.
    pub research_model: String,
    /// Model that answers on behalf of the council.
    pub chairman_model: String,
    /// Per-request deadline in seconds.
    pub request_timeout_secs: u64,
    pub log_format: LogFormat,
    /// OTLP gRPC endpoint; tracing export is disabled when unset.
    pub otlp_endpoint: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: llm::DEFAULT_BASE_URL.to_string(),
            api_key_env: "OPENROUTER_API_KEY".to_string(),
            research_model: "google/gemini-2.5-flash".to_string(),
            chairman_model: "google/gemini-2.5-pro".to_string(),
            request_timeout_secs: 120,
            log_format: LogFormat::Text,
            otlp_endpoint: None,
        }
    }
}

impl AppConfig {
    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Applies environment overrides using `lookup` (normally `std::env::var`).
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(model) = non_empty(RESEARCH_MODEL_ENV) {
            self.research_model = model;
        }
        if let Some(model) = non_empty(CHAIRMAN_MODEL_ENV) {
            self.chairman_model = model;
        }
        if let Some(endpoint) = non_empty(OTLP_ENDPOINT_ENV) {
            self.otlp_endpoint = Some(endpoint);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(invalid("api_base_url must not be empty"));
        }
        if self.api_key_env.trim().is_empty() {
            return Err(invalid("api_key_env must not be empty"));
        }
        if self.request_timeout_secs == 0 {
            return Err(invalid("request_timeout_secs must be greater than zero"));
        }
        self.research_model()?;
        self.chairman_model()?;
        Ok(())
    }

    pub fn research_model(&self) -> Result<ModelId, ConfigError> {
        ModelId::new(self.research_model.trim()).ok_or_else(|| invalid("research_model must not be empty"))
    }

    pub fn chairman_model(&self) -> Result<ModelId, ConfigError> {
        ModelId::new(self.chairman_model.trim()).ok_or_else(|| invalid("chairman_model must not be empty"))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid {
        message: message.to_string(),
    }
}
