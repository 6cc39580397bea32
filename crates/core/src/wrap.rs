//! Blank-line normalization and greedy word wrapping.

use std::sync::LazyLock;

use regex::Regex;

static BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s+\n").expect("BLANK_LINE regex should compile"));
static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("EXCESS_NEWLINES regex should compile"));
static LEADING_BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\n").expect("LEADING_BLANK_LINES regex should compile"));

/// Collapses whitespace-only lines and runs of blank lines to a single
/// blank line, then drops leading blank lines.
///
/// Indentation on the first line with content is kept.
pub fn normalize_whitespace(text: &str) -> String {
    let text = BLANK_LINE.replace_all(text, "\n\n");
    let text = EXCESS_NEWLINES.replace_all(&text, "\n\n");
    LEADING_BLANK_LINES.replace(&text, "").into_owned()
}

/// Wraps `text` at `width` columns.
///
/// Existing newlines are kept. A line is broken at the last space before it
/// exceeds the width; a word longer than the width is never split, it just
/// overflows until the next space. A width of 0 disables wrapping.
pub fn wrap_text(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_string();
    }

    let mut chars: Vec<char> = text.chars().collect();
    let mut line_start = 0;
    let mut last_space = 0;

    for current in 0..chars.len() {
        if chars[current] == '\n' {
            line_start = current + 1;
            last_space = current + 1;
        } else if chars[current] == ' ' {
            if current - line_start >= width {
                chars[current] = '\n';
                line_start = current + 1;
            }
            last_space = current;
        } else if current - line_start >= width && line_start != last_space {
            chars[last_space] = '\n';
            line_start = last_space + 1;
            last_space = line_start;
        }
    }

    chars.into_iter().collect()
}
