//! Splits advice text into numbered `(description, command)` pairs so a
//! client can render each command with its own copy button.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandStep {
    pub description: String,
    pub command: String,
}

static FENCED_STEP: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)(\d+)\.\s+(.*?)(?::|：)\s*```\w*\s*(.*?)```").ok());

static INLINE_STEP: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.\s+(.*?)(?::|：)\s*(.*)$").ok());

/// Extracts numbered steps from advice text.
///
/// Steps in the form ``N. description: ```cmd``` `` are preferred. When none
/// are present, falls back to `N. description: cmd` lines, where following
/// lines are appended to the command until a heading, a blank line or the
/// closing note.
pub fn parse_command_steps(text: &str) -> Vec<CommandStep> {
    let fenced = fenced_steps(text);
    if !fenced.is_empty() {
        trace!(steps = fenced.len(), "parsed fenced command steps");
        return fenced;
    }
    let inline = inline_steps(text);
    trace!(steps = inline.len(), "parsed inline command steps");
    inline
}

fn fenced_steps(text: &str) -> Vec<CommandStep> {
    let Some(re) = FENCED_STEP.as_ref() else {
        return Vec::new();
    };
    re.captures_iter(text)
        .map(|c| CommandStep {
            description: c[2].trim().to_string(),
            command: c[3].trim().to_string(),
        })
        .collect()
}

fn inline_steps(text: &str) -> Vec<CommandStep> {
    let Some(re) = INLINE_STEP.as_ref() else {
        return Vec::new();
    };

    let mut steps: Vec<CommandStep> = Vec::new();
    let mut open = false;
    for line in text.lines() {
        let line = line.trim();
        if let Some(c) = re.captures(line) {
            steps.push(CommandStep {
                description: c[2].trim().to_string(),
                command: c[3].trim().to_string(),
            });
            open = true;
            continue;
        }
        if line.is_empty() || line.starts_with('#') || line.starts_with("Your converted file") {
            open = false;
            continue;
        }
        if let (true, Some(last)) = (open, steps.last_mut()) {
            if !last.command.is_empty() {
                last.command.push('\n');
            }
            last.command.push_str(line);
        }
    }
    steps.retain(|s| !s.command.is_empty());
    steps
}
