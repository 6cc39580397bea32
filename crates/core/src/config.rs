//! Conversion settings.
//!
//! [`ConversionConfig`] is the typed, validated configuration of a conversion
//! run. It can be built fluently with [`ConversionConfig::builder`], adjusted
//! through its setters, or driven by option names with
//! [`ConversionConfig::set_option`] (which is what config files and the CLI
//! `--set` flag use).
//!
//! # Example
//!
//! ```rust
//! use plainify_core::{ConversionConfig, LinkStyle};
//!
//! let config = ConversionConfig::builder()
//!     .link_style(LinkStyle::Table)
//!     .line_width(72)
//!     .base_url("https://example.com/")
//!     .build();
//!
//! assert_eq!(config.base_url(), "https://example.com");
//! assert_eq!(config.line_width(), 72);
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::{PlainifyError, Result};

/// Narrowest line width a configuration will accept.
pub const MIN_LINE_WIDTH: usize = 45;

/// Line width used when none (or an unparseable one) is given.
pub const DEFAULT_LINE_WIDTH: usize = 120;

static TAG_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z][a-zA-Z0-9]*").expect("TAG_NAME regex should compile"));

/// How a hyperlink target is rendered in the plain text output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStyle {
    /// Drop the target, keep only the link text.
    None,
    /// `text [url]`
    #[default]
    Inline,
    /// `text` followed by `[url]` on the next line.
    NextLine,
    /// `text [n]`, with a numbered reference list appended to the output.
    Table,
}

impl LinkStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Inline => "inline",
            Self::NextLine => "nextline",
            Self::Table => "table",
        }
    }
}

impl FromStr for LinkStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "inline" => Ok(Self::Inline),
            "nextline" | "next-line" | "next_line" => Ok(Self::NextLine),
            "table" => Ok(Self::Table),
            _ => Err(format!(
                "Invalid link style: {}. Valid options: none, inline, nextline, table",
                s
            )),
        }
    }
}

impl fmt::Display for LinkStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings for one conversion run.
///
/// Fields are private so the invariants hold at all times: the line width
/// never drops below [`MIN_LINE_WIDTH`], passthrough tag names are
/// lowercase, and the base URL carries no trailing slash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionConfig {
    link_style: LinkStyle,
    line_width: usize,
    allowed_passthrough_tags: BTreeSet<String>,
    base_url: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            link_style: LinkStyle::default(),
            line_width: DEFAULT_LINE_WIDTH,
            allowed_passthrough_tags: BTreeSet::new(),
            base_url: String::new(),
        }
    }
}

impl ConversionConfig {
    /// Creates a new builder for ConversionConfig.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::new()
    }

    pub fn link_style(&self) -> LinkStyle {
        self.link_style
    }

    pub fn line_width(&self) -> usize {
        self.line_width
    }

    pub fn allowed_passthrough_tags(&self) -> &BTreeSet<String> {
        &self.allowed_passthrough_tags
    }

    /// Whether `name` (any case) survives tag stripping.
    pub fn allows_tag(&self, name: &str) -> bool {
        self.allowed_passthrough_tags.contains(&name.to_lowercase())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_link_style(&mut self, style: LinkStyle) {
        self.link_style = style;
    }

    /// Sets the wrap width, clamped up to [`MIN_LINE_WIDTH`].
    pub fn set_line_width(&mut self, width: usize) {
        self.line_width = width.max(MIN_LINE_WIDTH);
    }

    /// Replaces the passthrough tag set. Names are lowercased.
    pub fn set_allowed_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_passthrough_tags = tags
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
    }

    /// Sets the base URL used to resolve relative links. Trailing slashes are stripped.
    pub fn set_base_url(&mut self, url: &str) {
        self.base_url = url.trim().trim_end_matches('/').to_string();
    }

    /// Sets an option by name.
    ///
    /// Recognized names are `link_style` (alias `do_links`), `line_width`
    /// (alias `width`), `allowed_tags` and `base_url`. An unknown name is
    /// rejected with [`PlainifyError::UnknownOption`]; a bad value for a known
    /// name falls back to that option's default.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<()> {
        match name.trim().to_lowercase().as_str() {
            "link_style" | "do_links" => {
                self.link_style = value.parse().unwrap_or_default();
            }
            "line_width" | "width" => {
                let width = match value.trim().parse::<i64>() {
                    Ok(w) if w < MIN_LINE_WIDTH as i64 => MIN_LINE_WIDTH,
                    Ok(w) => usize::try_from(w).unwrap_or(DEFAULT_LINE_WIDTH),
                    Err(_) => DEFAULT_LINE_WIDTH,
                };
                self.set_line_width(width);
            }
            "allowed_tags" | "allowed_passthrough_tags" => {
                self.allowed_passthrough_tags = parse_tag_list(value);
            }
            "base_url" => self.set_base_url(value),
            _ => return Err(PlainifyError::UnknownOption(name.to_string())),
        }
        Ok(())
    }
}

/// Builder for ConversionConfig.
///
/// # Example
///
/// ```rust
/// use plainify_core::ConversionConfig;
///
/// let config = ConversionConfig::builder().line_width(10).allowed_tags(["B", "i"]).build();
/// assert_eq!(config.line_width(), 45);
/// assert!(config.allows_tag("b"));
/// ```
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ConversionConfig::default() }
    }

    /// Sets the link rendering style.
    pub fn link_style(mut self, value: LinkStyle) -> Self {
        self.config.set_link_style(value);
        self
    }

    /// Sets the line width (clamped to the minimum).
    pub fn line_width(mut self, value: usize) -> Self {
        self.config.set_line_width(value);
        self
    }

    /// Sets the tags kept verbatim by the tag stripper.
    pub fn allowed_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.set_allowed_tags(tags);
        self
    }

    /// Sets the base URL for relative links.
    pub fn base_url(mut self, value: &str) -> Self {
        self.config.set_base_url(value);
        self
    }

    /// Builds the config.
    pub fn build(self) -> ConversionConfig {
        self.config
    }
}

impl Default for ConversionConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a tag list given either as `<b><i>` or as `b, i`.
pub fn parse_tag_list(value: &str) -> BTreeSet<String> {
    TAG_NAME.find_iter(value).map(|m| m.as_str().to_lowercase()).collect()
}

/// Default location of the user config file: `<config dir>/plainify/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("plainify").join("config.json"))
}

/// Loads a JSON config file on top of the defaults.
///
/// The file holds one object whose keys are option names, as accepted by
/// [`ConversionConfig::set_option`]:
///
/// ```json
/// { "link_style": "table", "line_width": 78, "allowed_tags": ["b", "i"] }
/// ```
pub fn load_config(path: &Path) -> Result<ConversionConfig> {
    let mut config = ConversionConfig::default();
    apply_config_file(&mut config, path)?;
    Ok(config)
}

/// Applies the options in a JSON config file to an existing config.
pub fn apply_config_file(config: &mut ConversionConfig, path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(PlainifyError::FileNotFound(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path)?;
    apply_config_json(config, &raw)
}

/// Applies the options in a JSON object string to an existing config.
pub fn apply_config_json(config: &mut ConversionConfig, raw: &str) -> Result<()> {
    let value: Value = serde_json::from_str(raw).map_err(|e| PlainifyError::ConfigError(e.to_string()))?;
    let Value::Object(options) = value else {
        return Err(PlainifyError::ConfigError("config must be a JSON object".to_string()));
    };

    for (name, value) in &options {
        config.set_option(name, &option_value_to_string(value))?;
    }
    Ok(())
}

fn option_value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(option_value_to_string).collect::<Vec<_>>().join(","),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
