//! Preformatted blocks.
//!
//! The body of a `<pre>` element must survive the later whitespace passes,
//! so its newlines, tabs and spaces are rewritten into markup (`<br>`,
//! `&nbsp;`) that the tag and entity stages turn back into the same
//! characters. Only the content-dependent rules (links, emphasis) run on the
//! body; the structural tag table never sees it.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::convert::ConversionState;
use crate::rules::rewrite_callbacks;

static PRE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<pre\b[^>]*>(.*?)</pre>").expect("PRE_BLOCK regex should compile"));
static PRE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<pre\b[^>]*>|</pre>").expect("PRE_TAG regex should compile"));

/// Replaces every `<pre>` block, first to last, with its protected form.
///
/// Blocks are handled one at a time: each splice changes the buffer, so the
/// next block is searched for in the updated text.
pub(crate) fn convert_pre_blocks(text: &str, state: &mut ConversionState<'_>) -> String {
    let mut out = text.to_string();
    let mut blocks = 0;

    loop {
        let Some((span, body)) = PRE_BLOCK.captures(&out).and_then(|caps| {
            let whole = caps.get(0)?;
            let body = caps.get(1)?;
            Some((whole.range(), body.as_str().to_string()))
        }) else {
            break;
        };

        let body = rewrite_callbacks(&body, &mut state.link_collector());
        let replacement = format!("<div><br>{}<br></div>", protect_whitespace(&body));
        out.replace_range(span, &replacement);
        blocks += 1;
    }

    if blocks > 0 {
        debug!(blocks, "converted preformatted blocks");
    }
    out
}

/// Rewrites layout whitespace into markup the normalizer leaves alone.
pub fn protect_whitespace(body: &str) -> String {
    let body = PRE_TAG.replace_all(body, "");
    body.replace('\n', "<br>")
        .replace('\t', "&nbsp;&nbsp;&nbsp;&nbsp;")
        .replace(' ', "&nbsp;")
}
