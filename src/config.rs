//! Configuration and model resolution for the LLM integration.

use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

use crate::providers::{Provider, ProviderError};

/// Environment variable naming the LLM model to query.
pub const MODEL_ENV_VAR: &str = "CULPRIT_LLM_MODEL";

/// Environment variable overriding the provider base URL.
pub const BASE_URL_ENV_VAR: &str = "CULPRIT_LLM_BASE_URL";

/// Errors raised while setting up the LLM integration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "LLM model to use is not specified, must be specified via --model, \
         $CULPRIT_LLM_MODEL or the config file; this is required when integration \
         with LLMs is enabled!"
    )]
    ModelNotSpecified,

    #[error("Unknown LLM model specified: {0}")]
    UnknownModel(String),

    #[error("Failed to initialise LLM integration")]
    Provider(#[source] ProviderError),
}

/// Immutable LLM configuration, validated against the provider's catalog
/// before construction and reused for the process lifetime.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub model_name: String,
}

/// On-disk configuration (`~/.config/culprit/config.toml`)
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub llm: LlmSection,
}

/// `[llm]` section of the config file
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct LlmSection {
    /// Model to query
    pub model: Option<String>,
    /// Base URL of an OpenAI-compatible endpoint
    pub base_url: Option<String>,
    /// Maximum tokens to generate per answer
    pub max_tokens: Option<u32>,
}

impl Config {
    /// Load config from file, returning default config if file doesn't exist
    pub fn load() -> Self {
        Self::load_from_path(Self::config_path())
    }

    /// Load config from a specific path
    pub fn load_from_path(path: Option<PathBuf>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        std::fs::read_to_string(&path)
            .ok()
            .and_then(|contents| toml::from_str(&contents).ok())
            .unwrap_or_default()
    }

    /// Get the config file path (~/.config/culprit/config.toml)
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("culprit").join("config.toml"))
    }

    /// Model name to use: CLI flag, then `$CULPRIT_LLM_MODEL`, then the
    /// config file.
    pub fn model_name(&self, cli_override: Option<&str>) -> Option<String> {
        cli_override
            .map(str::to_string)
            .or_else(|| env::var(MODEL_ENV_VAR).ok().filter(|s| !s.is_empty()))
            .or_else(|| self.llm.model.clone())
    }

    /// Provider base URL: `$CULPRIT_LLM_BASE_URL`, then the config file.
    pub fn base_url(&self) -> Option<String> {
        env::var(BASE_URL_ENV_VAR)
            .ok()
            .filter(|s| !s.is_empty())
            .or_else(|| self.llm.base_url.clone())
    }

    /// Maximum tokens to generate per answer.
    pub fn max_tokens(&self) -> u32 {
        self.llm.max_tokens.unwrap_or(1024)
    }
}

/// Initialise the LLM integration: resolve the configured model name and
/// validate it against the provider's catalog.
///
/// Runs exactly once, before any query is attempted. The returned
/// [`LlmConfig`] is immutable and passed explicitly to the query executor.
pub fn init_llm_integration(
    provider: &dyn Provider,
    model_name: Option<String>,
) -> Result<LlmConfig, ConfigError> {
    let Some(model_name) = model_name.filter(|name| !name.is_empty()) else {
        return Err(ConfigError::ModelNotSpecified);
    };
    debug!("validating LLM model '{model_name}' against {} catalog", provider.name());

    match provider.get_model(&model_name) {
        Ok(model) => {
            info!("LLM integration initialised with model '{}'", model.model_id());
            Ok(LlmConfig { model_name })
        }
        Err(ProviderError::ModelNotFound(_)) => Err(ConfigError::UnknownModel(model_name)),
        Err(err) => Err(ConfigError::Provider(err)),
    }
}
