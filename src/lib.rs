//! culprit - run a shell command and have an LLM explain why it failed.
//!
//! The core is the failure-explanation pipeline: resolve and validate the
//! configured model once, build a deterministic diagnostic prompt from the
//! captured failure, issue a single blocking query against the provider,
//! and render a word-wrapped, quoted report for the terminal.

pub mod cli;
pub mod config;
pub mod output;
pub mod prompt;
pub mod providers;
pub mod query;
pub mod shell;

// Re-export commonly used types
pub use cli::Cli;
pub use config::{init_llm_integration, Config, ConfigError, LlmConfig};
pub use output::{assemble_report, format_llm_result, wrap, WRAP_WIDTH};
pub use prompt::build_prompt;
pub use providers::{ModelHandle, PromptResponse, Provider, ProviderError, TokenUsage};
pub use query::{explain_failed_shell_cmd, LlmResult, QueryError};
pub use shell::{run_shell_cmd, ShellCmdResult, ShellCommandFailure};
