//! HTML to plain text conversion.
//!
//! [`convert_to_text`] runs the whole pipeline over a document:
//!
//! 1. blockquotes are converted recursively and turned into quoted `<pre>` blocks
//! 2. `<pre>` bodies get their whitespace protected
//! 3. structural tags are rewritten ([`rewrite_tags`])
//! 4. links, headings, bold and table headers are rewritten ([`rewrite_callbacks`])
//! 5. remaining tags are stripped, except passthrough tags
//! 6. entities are decoded
//! 7. blank lines are normalized and the text is wrapped
//! 8. in table link style, the numbered link list is appended
//!
//! # Example
//!
//! ```rust
//! use plainify_core::{ConversionConfig, convert_to_text};
//!
//! let text = convert_to_text("<p>Hello <b>World</b></p>", &ConversionConfig::default());
//! assert_eq!(text, "Hello WORLD");
//! ```

use tracing::debug;

use crate::blockquote::convert_blockquotes;
use crate::config::ConversionConfig;
use crate::entities::decode_entities;
use crate::links::{LinkCollector, LinkTable};
use crate::pre::convert_pre_blocks;
use crate::rules::{rewrite_callbacks, rewrite_tags};
use crate::strip::strip_tags;
use crate::wrap::{normalize_whitespace, wrap_text};

/// Plain text converter bound to one configuration.
///
/// Holds no state between calls: every [`convert`](TextConverter::convert)
/// starts with an empty link table.
#[derive(Debug, Clone, Default)]
pub struct TextConverter {
    config: ConversionConfig,
}

impl TextConverter {
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Convert an HTML document to plain text
    pub fn convert(&self, html: &str) -> String {
        convert_to_text(html, &self.config)
    }
}

/// Convert an HTML document to plain text with the given configuration.
///
/// Never fails: malformed markup degrades to best-effort output.
pub fn convert_to_text(html: &str, config: &ConversionConfig) -> String {
    debug!(
        input_len = html.len(),
        width = config.line_width(),
        link_style = %config.link_style(),
        "converting html"
    );

    let mut state = ConversionState::new(config);
    let body = state.convert_fragment(html.trim(), config.line_width());
    let text = state.finish(&body);

    debug!(output_len = text.len(), links = state.links().len(), "conversion finished");
    text
}

/// Mutable state of one conversion run.
///
/// The link table is shared by the whole run, including the recursive
/// conversions of blockquote bodies, so numbering is document-wide.
pub struct ConversionState<'a> {
    config: &'a ConversionConfig,
    links: LinkTable,
}

impl<'a> ConversionState<'a> {
    pub fn new(config: &'a ConversionConfig) -> Self {
        Self { config, links: LinkTable::new() }
    }

    pub fn links(&self) -> &LinkTable {
        &self.links
    }

    /// Runs the conversion stages over `html`, wrapping at `width`.
    pub(crate) fn convert_fragment(&mut self, html: &str, width: usize) -> String {
        let text = convert_blockquotes(html, width, self);
        let text = convert_pre_blocks(&text, self);
        let text = rewrite_tags(&text);
        let text = rewrite_callbacks(&text, &mut self.link_collector());
        let text = strip_tags(&text, self.config);
        let text = decode_entities(&text);
        let text = normalize_whitespace(&text);
        wrap_text(&text, width)
    }

    pub(crate) fn link_collector(&mut self) -> LinkCollector<'_> {
        let config = self.config;
        LinkCollector::new(config.base_url(), config.link_style(), &mut self.links)
    }

    /// Trims the body and appends the link list when links were collected.
    fn finish(&self, body: &str) -> String {
        let mut text = body.trim_end().to_string();
        if !self.links.is_empty() {
            text.push_str("\n\n");
            text.push_str(&self.links.render_reference_list());
        }
        text.trim_end().to_string()
    }
}
