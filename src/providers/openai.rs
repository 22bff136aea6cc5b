//! OpenAI-compatible HTTP provider.
//!
//! Talks to the OpenAI API or any server exposing the same surface (llama
//! server, Ollama, LM Studio, ...) via a base URL override. The model
//! catalog comes from `GET /models`, queries go through
//! `POST /chat/completions`.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::{ModelHandle, PromptResponse, Provider, ProviderError, TokenUsage};

/// Default OpenAI API base URL
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Environment variable holding the API key
pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

/// OpenAI-compatible provider
pub struct OpenAiProvider {
    /// HTTP client
    client: Client,
    /// API key
    api_key: String,
    /// Base URL, without trailing slash
    base_url: String,
    /// Maximum tokens to generate per answer
    max_tokens: u32,
}

impl OpenAiProvider {
    /// Create a new provider against the given endpoint.
    pub fn new(api_key: String, base_url: Option<String>, max_tokens: u32) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Self {
            client: Client::new(),
            api_key,
            base_url,
            max_tokens,
        }
    }

    /// Create from the `OPENAI_API_KEY` environment variable.
    pub fn from_env(base_url: Option<String>, max_tokens: u32) -> Result<Self, ProviderError> {
        let api_key = std::env::var(API_KEY_ENV_VAR)
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(ProviderError::MissingApiKey {
                env_var: API_KEY_ENV_VAR,
            })?;
        Ok(Self::new(api_key, base_url, max_tokens))
    }

    /// Fetch the model catalog from the endpoint.
    fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        let response = self
            .client
            .get(format!("{}/models", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .map_err(|err| ProviderError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: ModelsResponse = response
            .json()
            .map_err(|err| ProviderError::InvalidResponse(err.to_string()))?;
        Ok(body.data.into_iter().map(|m| m.id).collect())
    }
}

impl Provider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "OpenAI"
    }

    fn get_model(&self, name: &str) -> Result<Box<dyn ModelHandle>, ProviderError> {
        let models = self.list_models()?;
        if !models.iter().any(|m| m == name) {
            return Err(ProviderError::ModelNotFound(name.to_string()));
        }
        Ok(Box::new(OpenAiModel {
            client: self.client.clone(),
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            model: name.to_string(),
            max_tokens: self.max_tokens,
        }))
    }
}

/// Handle to one catalog-validated model.
struct OpenAiModel {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl ModelHandle for OpenAiModel {
    fn model_id(&self) -> &str {
        &self.model
    }

    fn prompt(&self, text: &str) -> Result<PromptResponse, ProviderError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: text.to_string(),
            }],
            max_tokens: Some(self.max_tokens),
        };

        // The reported duration covers the whole HTTP round trip; callers
        // treat this value as authoritative.
        let started = Instant::now();
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .map_err(|err| ProviderError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: ChatCompletionResponse = response
            .json()
            .map_err(|err| ProviderError::InvalidResponse(err.to_string()))?;
        let duration_ms = started.elapsed().as_millis() as u64;

        let text = body
            .choices
            .into_iter()
            .filter_map(|choice| choice.message.map(|m| m.content))
            .collect::<Vec<_>>()
            .join("");

        let usage = body.usage.map(|u| TokenUsage {
            input: u.prompt_tokens,
            output: u.completion_tokens,
        });

        Ok(PromptResponse::new(text, duration_ms, usage))
    }
}

// API types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}
