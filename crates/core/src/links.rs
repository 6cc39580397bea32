//! Link rendering and the numbered link table.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::config::LinkStyle;
use crate::entities::decode_standard;

/// Class marker that overrides the link style for a single anchor,
/// e.g. `<a class="_html2text_link_none" href="...">`.
pub const LINK_STYLE_MARKER: &str = "_html2text_link_";

static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z][a-z0-9.+-]+:").expect("SCHEME regex should compile"));

static IGNORED_TARGET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(javascript:|mailto:|#)").expect("IGNORED_TARGET regex should compile"));

static STYLE_OVERRIDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{}(\w+)", LINK_STYLE_MARKER)).expect("STYLE_OVERRIDE regex should compile")
});

/// Unique absolute URLs in first-seen order.
///
/// A URL's 1-based index is fixed the first time it is added and never changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkTable {
    urls: Vec<String>,
}

impl LinkTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the 1-based index of `url`, appending it if unseen.
    pub fn index_of(&mut self, url: &str) -> usize {
        match self.urls.iter().position(|u| u == url) {
            Some(pos) => pos + 1,
            None => {
                self.urls.push(url.to_string());
                self.urls.len()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// `(index, url)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.urls.iter().enumerate().map(|(i, u)| (i + 1, u.as_str()))
    }

    /// The `Links:` section appended to table-style output.
    pub fn render_reference_list(&self) -> String {
        let mut out = String::from("Links:\n------\n");
        for (index, url) in self.iter() {
            out.push_str(&format!("[{}] {}\n", index, url));
        }
        out
    }
}

/// Turns anchors into text according to the active link style.
pub struct LinkCollector<'a> {
    base_url: &'a str,
    default_style: LinkStyle,
    table: &'a mut LinkTable,
}

impl<'a> LinkCollector<'a> {
    pub fn new(base_url: &'a str, default_style: LinkStyle, table: &'a mut LinkTable) -> Self {
        Self { base_url, default_style, table }
    }

    /// Renders one link.
    ///
    /// `style_override` wins over the configured style when present.
    /// `javascript:`, `mailto:` and same-page targets render as their text only.
    pub fn register(&mut self, href: &str, display: &str, style_override: Option<LinkStyle>) -> String {
        let style = style_override.unwrap_or(self.default_style);
        let url = match style {
            LinkStyle::None => None,
            LinkStyle::Inline | LinkStyle::NextLine | LinkStyle::Table => self.target_url(href),
        };
        let Some(url) = url else {
            return display.to_string();
        };
        trace!(%url, %style, "link registered");

        match style {
            LinkStyle::None => display.to_string(),
            LinkStyle::Inline => format!("{} [{}]", display, url),
            LinkStyle::NextLine => format!("{}\n[{}]", display, url),
            LinkStyle::Table => format!("{} [{}]", display, self.table.index_of(&url)),
        }
    }

    /// The absolute URL for `href`, or `None` for targets rendered as text only.
    fn target_url(&self, href: &str) -> Option<String> {
        let target = decode_standard(&href.replace(' ', ""));
        if IGNORED_TARGET.is_match(&target) {
            return None;
        }
        Some(resolve_url(&target, self.base_url))
    }
}

/// Makes `target` absolute against `base_url` unless it carries a scheme.
pub fn resolve_url(target: &str, base_url: &str) -> String {
    if SCHEME.is_match(target) {
        return target.to_string();
    }
    if target.starts_with('/') {
        format!("{}{}", base_url, target)
    } else {
        format!("{}/{}", base_url, target)
    }
}

/// Reads a per-link style override out of an anchor's attribute text.
///
/// Unknown style names are ignored so the configured style applies.
pub fn parse_style_override(attributes: &str) -> Option<LinkStyle> {
    STYLE_OVERRIDE
        .captures(attributes)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
