//! Query executor: one blocking LLM query per failed shell command.

use thiserror::Error;
use tracing::info;

use crate::config::LlmConfig;
use crate::output::{wrap, WRAP_WIDTH};
use crate::prompt::build_prompt;
use crate::providers::{Provider, ProviderError};
use crate::shell::ShellCommandFailure;

/// The LLM query failed. Fatal to this explanation attempt only; the
/// underlying shell command failure is reported independently.
#[derive(Debug, Error)]
#[error("Failed to query LLM model '{model_name}'")]
pub struct QueryError {
    pub model_name: String,
    #[source]
    pub source: ProviderError,
}

/// Result of explaining one failed shell command. Transient, never
/// persisted.
#[derive(Debug, Clone)]
pub struct LlmResult {
    /// Model that produced the answer
    pub model_name: String,
    /// One-line summary of the shell failure
    pub info: String,
    /// Explanation text, wrapped for terminal display
    pub answer: String,
    /// Query duration in seconds, as reported by the provider
    pub duration_secs: f64,
    /// Prompt tokens consumed, if the provider reported usage
    pub input_tokens: Option<u64>,
    /// Answer tokens generated, if the provider reported usage
    pub output_tokens: Option<u64>,
}

/// Ask the model to explain a failed shell command.
///
/// Issues exactly one blocking query against the model named in `config`;
/// no retry and no timeout at this layer. The provider's reported duration
/// is authoritative, wall clock time is never measured here.
pub fn explain_failed_shell_cmd(
    provider: &dyn Provider,
    config: &LlmConfig,
    failure: &ShellCommandFailure,
) -> Result<LlmResult, QueryError> {
    let prompt = build_prompt(failure);

    let model = provider
        .get_model(&config.model_name)
        .map_err(|source| QueryError {
            model_name: config.model_name.clone(),
            source,
        })?;

    info!(
        "Querying LLM {} using following prompt: {prompt}",
        config.model_name
    );
    let response = model.prompt(&prompt).map_err(|source| QueryError {
        model_name: config.model_name.clone(),
        source,
    })?;
    info!("Result from querying LLM: {}", response.text());

    let answer = wrap(strip_leading_blank_lines(response.text()), WRAP_WIDTH);
    let usage = response.usage();

    Ok(LlmResult {
        model_name: config.model_name.clone(),
        info: format!(
            "Shell command '{}' failed! (exit code {})",
            failure.cmd, failure.exit_code
        ),
        answer,
        duration_secs: response.duration_ms() as f64 / 1000.0,
        input_tokens: usage.map(|u| u.input),
        output_tokens: usage.map(|u| u.output),
    })
}

/// Drop blank lines from the start of the text; internal blank lines and
/// trailing content stay untouched.
fn strip_leading_blank_lines(text: &str) -> &str {
    let mut rest = text;
    while let Some(idx) = rest.find('\n') {
        if rest[..idx].trim().is_empty() {
            rest = &rest[idx + 1..];
        } else {
            break;
        }
    }
    rest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::fake::FakeProvider;
    use crate::providers::{PromptResponse, TokenUsage};
    use std::path::PathBuf;

    fn failure() -> ShellCommandFailure {
        ShellCommandFailure {
            cmd: "echo hello".to_string(),
            exit_code: 1,
            output: "hello".to_string(),
            work_dir: PathBuf::from("/tmp"),
        }
    }

    fn config() -> LlmConfig {
        LlmConfig {
            model_name: "dummy-llm".to_string(),
        }
    }

    #[test]
    fn test_strip_leading_blank_lines() {
        assert_eq!(strip_leading_blank_lines("\nfoo\nbar"), "foo\nbar");
        assert_eq!(strip_leading_blank_lines("\n\n  \nfoo"), "foo");
        assert_eq!(strip_leading_blank_lines("foo\n\nbar"), "foo\n\nbar");
        assert_eq!(strip_leading_blank_lines("foo\nbar\n"), "foo\nbar\n");
        assert_eq!(strip_leading_blank_lines(""), "");
    }

    #[test]
    fn test_explain_failed_shell_cmd() {
        let response = PromptResponse::new(
            "\nResistance is futile,\nyou will be assimilated\n\nI'll be back",
            123,
            Some(TokenUsage {
                input: 123,
                output: 456,
            }),
        );
        let provider = FakeProvider::with_models(&["dummy-llm"]).with_response(response);

        let res = explain_failed_shell_cmd(&provider, &config(), &failure()).unwrap();

        assert_eq!(res.model_name, "dummy-llm");
        assert_eq!(res.info, "Shell command 'echo hello' failed! (exit code 1)");
        assert_eq!(
            res.answer,
            "Resistance is futile,\nyou will be assimilated\n\nI'll be back"
        );
        assert_eq!(res.duration_secs, 0.123);
        assert_eq!(res.input_tokens, Some(123));
        assert_eq!(res.output_tokens, Some(456));
    }

    #[test]
    fn test_explain_wraps_long_answer_lines() {
        let long_line = "word ".repeat(40).trim_end().to_string();
        let provider = FakeProvider::with_models(&["dummy-llm"])
            .with_response(PromptResponse::new(long_line, 10, None));

        let res = explain_failed_shell_cmd(&provider, &config(), &failure()).unwrap();
        assert!(res.answer.lines().count() > 1);
        assert!(res.answer.lines().all(|line| line.len() <= 80));
    }

    #[test]
    fn test_explain_preserves_absent_usage() {
        let provider = FakeProvider::with_models(&["dummy-llm"])
            .with_response(PromptResponse::new("the answer", 50, None));

        let res = explain_failed_shell_cmd(&provider, &config(), &failure()).unwrap();
        assert_eq!(res.input_tokens, None);
        assert_eq!(res.output_tokens, None);
        assert_eq!(res.duration_secs, 0.05);
    }

    #[test]
    fn test_explain_provider_failure() {
        let provider = FakeProvider::with_models(&["dummy-llm"]).failing();

        let err = explain_failed_shell_cmd(&provider, &config(), &failure()).unwrap_err();
        assert_eq!(err.model_name, "dummy-llm");
        assert!(err.to_string().contains("dummy-llm"));
        assert!(matches!(err.source, ProviderError::Network(_)));
    }

    #[test]
    fn test_explain_unresolvable_model() {
        let provider = FakeProvider::with_models(&["other-llm"]);

        let err = explain_failed_shell_cmd(&provider, &config(), &failure()).unwrap_err();
        assert!(matches!(err.source, ProviderError::ModelNotFound(_)));
    }
}
