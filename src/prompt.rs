//! Diagnostic prompt construction.

use crate::shell::ShellCommandFailure;

/// Build the prompt asking the model to explain a failed shell command.
///
/// Pure and deterministic: the captured output, command line, working
/// directory and exit code are embedded verbatim.
pub fn build_prompt(failure: &ShellCommandFailure) -> String {
    format!(
        "\n\
         {output}\n\
         \n\
         Explain why the '{cmd}' shell command failed with the above output.\n\
         The shell command was running in {work_dir}, and had {exit_code} as exit code.\n\
         \n\
         Start with pointing out the actual error message from the output.\n\
         Then explain what that error means, and what caused it.\n\
         Do not make suggestions on how to fix the problem, only explain.\n\
         Keep it short and to the point.\n",
        output = failure.output,
        cmd = failure.cmd,
        work_dir = failure.work_dir.display(),
        exit_code = failure.exit_code,
    )
}
