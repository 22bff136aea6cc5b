//! Model provider abstraction for failure explanation.
//!
//! The rest of the crate only talks to a provider through the [`Provider`]
//! and [`ModelHandle`] traits, so a fake can stand in for the real HTTP
//! service in tests.

pub mod openai;

use thiserror::Error;

/// Token usage reported by the provider for a single query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt.
    pub input: u64,
    /// Tokens generated for the answer.
    pub output: u64,
}

/// What a model handle returns from one prompt call.
#[derive(Debug, Clone)]
pub struct PromptResponse {
    text: String,
    duration_ms: u64,
    usage: Option<TokenUsage>,
}

impl PromptResponse {
    pub fn new(text: impl Into<String>, duration_ms: u64, usage: Option<TokenUsage>) -> Self {
        Self {
            text: text.into(),
            duration_ms,
            usage,
        }
    }

    /// Raw answer text, exactly as the provider produced it.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Round-trip duration as reported by the provider, in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Token usage, or `None` when the provider does not report it.
    pub fn usage(&self) -> Option<TokenUsage> {
        self.usage
    }
}

/// Errors raised by provider operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("API key not configured. Set the {env_var} environment variable.")]
    MissingApiKey { env_var: &'static str },

    #[error("API error: HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response from provider: {0}")]
    InvalidResponse(String),
}

/// A resolved model, ready to accept prompts.
pub trait ModelHandle: Send + Sync {
    /// Model identifier as the provider knows it.
    fn model_id(&self) -> &str;

    /// Send one prompt and block until the provider answers.
    ///
    /// No timeout and no retry at this layer; a hung provider hangs the
    /// call, and any fault surfaces as a [`ProviderError`].
    fn prompt(&self, text: &str) -> Result<PromptResponse, ProviderError>;
}

/// A model provider: a catalog of models resolvable by name.
pub trait Provider: Send + Sync {
    /// Provider name for display.
    fn name(&self) -> &'static str;

    /// Look up a model by name.
    ///
    /// Fails with [`ProviderError::ModelNotFound`] for names the provider
    /// does not recognize.
    fn get_model(&self, name: &str) -> Result<Box<dyn ModelHandle>, ProviderError>;
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;

    /// In-memory provider with a fixed model catalog and a canned response.
    pub struct FakeProvider {
        known_models: Vec<String>,
        response: Option<PromptResponse>,
    }

    impl FakeProvider {
        pub fn with_models(models: &[&str]) -> Self {
            Self {
                known_models: models.iter().map(|m| m.to_string()).collect(),
                response: Some(PromptResponse::new("canned answer", 1, None)),
            }
        }

        pub fn with_response(mut self, response: PromptResponse) -> Self {
            self.response = Some(response);
            self
        }

        /// Make every prompt call fail with a network error.
        pub fn failing(mut self) -> Self {
            self.response = None;
            self
        }
    }

    impl Provider for FakeProvider {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn get_model(&self, name: &str) -> Result<Box<dyn ModelHandle>, ProviderError> {
            if !self.known_models.iter().any(|m| m == name) {
                return Err(ProviderError::ModelNotFound(name.to_string()));
            }
            Ok(Box::new(FakeModel {
                id: name.to_string(),
                response: self.response.clone(),
            }))
        }
    }

    struct FakeModel {
        id: String,
        response: Option<PromptResponse>,
    }

    impl ModelHandle for FakeModel {
        fn model_id(&self) -> &str {
            &self.id
        }

        fn prompt(&self, _text: &str) -> Result<PromptResponse, ProviderError> {
            self.response
                .clone()
                .ok_or_else(|| ProviderError::Network("connection refused".to_string()))
        }
    }
}
