use anyhow::{bail, Result};
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use std::io;
use tracing_subscriber::EnvFilter;

use culprit::cli::Cli;
use culprit::config::{init_llm_integration, Config};
use culprit::output::format_llm_result;
use culprit::providers::openai::OpenAiProvider;
use culprit::query::explain_failed_shell_cmd;
use culprit::shell::run_shell_cmd;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.cmd.is_empty() {
        bail!("No command provided. Usage: culprit <command> [args...]");
    }
    let cmd = cli.cmd.join(" ");

    let config = Config::load();

    // Resolve and validate the model up front, before running anything.
    let provider = OpenAiProvider::from_env(config.base_url(), config.max_tokens())?;
    let llm_config = init_llm_integration(&provider, config.model_name(cli.model.as_deref()))?;

    let result = run_shell_cmd(&cmd)?;
    print!("{}", result.output);

    if let Some(failure) = result.as_failure() {
        match explain_failed_shell_cmd(&provider, &llm_config, &failure) {
            Ok(llm_result) => println!("{}", format_llm_result(&llm_result)),
            // The explanation is best-effort; the command's failure is
            // reported through the exit code either way.
            Err(err) => eprintln!("{} {err}: {}", "Warning:".yellow().bold(), err.source),
        }
        std::process::exit(failure.exit_code);
    }

    Ok(())
}
