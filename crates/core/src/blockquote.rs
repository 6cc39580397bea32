//! Blockquotes.
//!
//! Each outermost `<blockquote>` is converted on its own at a narrower width,
//! quoted line by line with `> `, and put back as a `<pre>` block so the
//! rest of the pipeline keeps its layout. Nested blockquotes are picked up by
//! the recursive conversion of their parent's body, which is how deeper
//! levels end up with `>>`, `>>>`, and so on.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::convert::ConversionState;
use crate::entities::escape_html;

static BLOCKQUOTE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?blockquote\b[^>]*>").expect("BLOCKQUOTE_TAG regex should compile"));

/// Columns a quoted block gives up to its `> ` prefix.
const QUOTE_INDENT: usize = 2;

/// Tracks the outermost open blockquote while scanning.
#[derive(Debug, Default, Clone, Copy)]
struct BlockquoteFrame {
    depth: usize,
    start: usize,
    open_tag_len: usize,
}

/// Replaces every top-level blockquote in `text` with its quoted `<pre>` form.
///
/// A closing tag with no open blockquote is left in place for the tag
/// stripper; an opening tag that is never closed leaves its region as is.
pub(crate) fn convert_blockquotes(text: &str, width: usize, state: &mut ConversionState<'_>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut frame = BlockquoteFrame::default();
    let mut copied_to = 0;
    let mut quotes = 0;

    for tag in BLOCKQUOTE_TAG.find_iter(text) {
        if tag.as_str().starts_with("</") {
            match frame.depth {
                0 => {}
                1 => {
                    frame.depth = 0;
                    let body = &text[frame.start + frame.open_tag_len..tag.start()];
                    out.push_str(&text[copied_to..frame.start]);
                    out.push_str(&render_quote(body, width, state));
                    copied_to = tag.end();
                    quotes += 1;
                }
                _ => frame.depth -= 1,
            }
        } else {
            if frame.depth == 0 {
                frame.start = tag.start();
                frame.open_tag_len = tag.len();
            }
            frame.depth += 1;
        }
    }

    if quotes == 0 {
        return text.to_string();
    }

    out.push_str(&text[copied_to..]);
    debug!(quotes, width, "converted blockquotes");
    out
}

fn render_quote(body: &str, width: usize, state: &mut ConversionState<'_>) -> String {
    let converted = state.convert_fragment(body.trim(), width.saturating_sub(QUOTE_INDENT));
    format!("<pre>{}</pre>", escape_html(&quote_lines(converted.trim())))
}

/// Prefixes each line with `> `, or a single `>` when the line is already quoted.
pub fn quote_lines(text: &str) -> String {
    text.split('\n')
        .map(|line| if line.starts_with('>') { format!(">{}", line) } else { format!("> {}", line) })
        .collect::<Vec<_>>()
        .join("\n")
}
