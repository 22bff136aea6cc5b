//! Word wrapping, report assembly and colorizing of LLM results.

use colored::{Color, Colorize};

use crate::query::LlmResult;

/// Maximum line length when reflowing the model's answer for the terminal.
pub const WRAP_WIDTH: usize = 80;

/// Fixed disclaimer appended to every report.
pub const AI_DISCLAIMER: &str =
    "*** NOTE: the text above was produced by an AI model, it may not be fully accurate! ***";

/// Style applied to the assembled report.
const REPORT_COLOR: Color = Color::Magenta;

/// Greedy per-line word wrap.
///
/// Each non-empty line is reflowed to at most `width` characters, breaking
/// only at whitespace; runs of whitespace inside a line are kept verbatim.
/// Empty lines pass through unchanged, so paragraph structure survives.
/// Text whose lines already fit comes back unchanged.
pub fn wrap(text: &str, width: usize) -> String {
    let mut wrapped: Vec<String> = Vec::new();
    for line in text.split('\n') {
        if line.is_empty() {
            wrapped.push(String::new());
        } else {
            for piece in textwrap::wrap(line, width) {
                wrapped.push(piece.into_owned());
            }
        }
    }
    wrapped.join("\n")
}

/// Assemble the plain-text report for one LLM result.
pub fn assemble_report(result: &LlmResult) -> String {
    let mut lines: Vec<String> = vec![
        result.info.clone(),
        format!(
            "Large Language Model '{}' explains it as follows:",
            result.model_name
        ),
        String::new(),
    ];

    for line in result.answer.split('\n') {
        lines.push(format!("> {line}"));
    }

    lines.push(String::new());
    lines.push(AI_DISCLAIMER.to_string());
    lines.push(format!(
        "(time spent querying LLM: {:.3} sec | tokens used: input={}, output={})",
        result.duration_secs,
        fmt_token_count(result.input_tokens),
        fmt_token_count(result.output_tokens),
    ));

    lines.join("\n")
}

/// Apply one ANSI style to a whole block of text.
///
/// Honors the `colored` crate's global controls (`NO_COLOR`, tty
/// detection, explicit overrides), so the text passes through untouched
/// when colors are off.
pub fn colorize(text: &str, color: Color) -> String {
    text.color(color).to_string()
}

/// Produce the final display string for an LLM result: the assembled
/// report, colorized exactly once as a whole.
pub fn format_llm_result(result: &LlmResult) -> String {
    colorize(&assemble_report(result), REPORT_COLOR)
}

fn fmt_token_count(count: Option<u64>) -> String {
    match count {
        Some(n) => n.to_string(),
        None => "n/a".to_string(),
    }
}
