//! Shell command execution and failure capture.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

/// Captured state of a shell command that exited non-zero.
///
/// This is the record the explanation subsystem works from; all fields are
/// required.
#[derive(Debug, Clone)]
pub struct ShellCommandFailure {
    /// The command line that was executed
    pub cmd: String,
    /// Exit code of the command
    pub exit_code: i32,
    /// Combined stdout + stderr output
    pub output: String,
    /// Directory the command ran in
    pub work_dir: PathBuf,
}

/// Outcome of running a shell command via [`run_shell_cmd`].
#[derive(Debug, Clone)]
pub struct ShellCmdResult {
    pub cmd: String,
    pub exit_code: i32,
    pub output: String,
    pub work_dir: PathBuf,
}

impl ShellCmdResult {
    pub fn failed(&self) -> bool {
        self.exit_code != 0
    }

    /// View of a non-zero exit as a failure record for explanation.
    pub fn as_failure(&self) -> Option<ShellCommandFailure> {
        self.failed().then(|| ShellCommandFailure {
            cmd: self.cmd.clone(),
            exit_code: self.exit_code,
            output: self.output.clone(),
            work_dir: self.work_dir.clone(),
        })
    }
}

/// Run a command line through `sh -c` in the current directory, capturing
/// its combined output and exit code.
pub fn run_shell_cmd(cmd: &str) -> Result<ShellCmdResult> {
    let work_dir = env::current_dir().context("failed to determine working directory")?;

    let out = Command::new("sh")
        .arg("-c")
        .arg(cmd)
        .current_dir(&work_dir)
        .output()
        .with_context(|| format!("failed to run shell command '{cmd}'"))?;

    let mut output = String::from_utf8_lossy(&out.stdout).into_owned();
    output.push_str(&String::from_utf8_lossy(&out.stderr));

    // code() is None when the command was killed by a signal
    let exit_code = out.status.code().unwrap_or(-1);

    Ok(ShellCmdResult {
        cmd: cmd.to_string(),
        exit_code,
        output,
        work_dir,
    })
}
