//! Command-line interface definitions for the `culprit` tool.

use clap::Parser;
use clap_complete::Shell;

/// Run a shell command and have an LLM explain why it failed
#[derive(Parser, Debug)]
#[command(name = "culprit", version, about, long_about = None)]
#[command(
    after_help = "EXAMPLES:\n    culprit make install\n    culprit -m gpt-4o-mini -- cargo build\n    CULPRIT_LLM_MODEL=gpt-4o-mini culprit ./configure --prefix=/opt/app"
)]
pub struct Cli {
    /// Shell command to run (joined and passed to `sh -c`)
    #[arg(trailing_var_arg = true)]
    pub cmd: Vec<String>,

    /// LLM model to query (overrides $CULPRIT_LLM_MODEL and the config file)
    #[arg(long, short = 'm', value_name = "MODEL")]
    pub model: Option<String>,

    /// Disable ANSI colors in the report
    #[arg(long)]
    pub no_color: bool,

    /// Generate shell completions
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_command_and_model() {
        let cli = Cli::parse_from(["culprit", "-m", "gpt-4o-mini", "--", "make", "install"]);
        assert_eq!(cli.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(cli.cmd, vec!["make", "install"]);
        assert!(!cli.no_color);
    }

    #[test]
    fn test_cli_trailing_args_without_separator() {
        let cli = Cli::parse_from(["culprit", "make", "install"]);
        assert_eq!(cli.cmd, vec!["make", "install"]);
    }

    #[test]
    fn test_cli_no_color_flag() {
        let cli = Cli::parse_from(["culprit", "--no-color", "true"]);
        assert!(cli.no_color);
    }
}
