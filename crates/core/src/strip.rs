//! Removal of leftover markup.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::config::ConversionConfig;

static MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--.*?-->|</?([a-zA-Z][a-zA-Z0-9]*)[^>]*>|<[!?][^>]*>").expect("MARKUP regex should compile")
});

/// Strips comments, declarations and every tag whose name is not a
/// passthrough tag in `config`.
pub fn strip_tags(text: &str, config: &ConversionConfig) -> String {
    MARKUP
        .replace_all(text, |caps: &Captures| match caps.get(1) {
            Some(name) if config.allows_tag(name.as_str()) => caps[0].to_string(),
            _ => String::new(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_everything_by_default() {
        let config = ConversionConfig::default();
        let html = r#"<!DOCTYPE html><!-- note --><span class="x">a</span> <u>b</u><?xml version="1.0"?>"#;
        assert_eq!(strip_tags(html, &config), "a b");
    }

    #[test]
    fn test_keeps_passthrough_tags() {
        let config = ConversionConfig::builder().allowed_tags(["u"]).build();
        assert_eq!(strip_tags("<U>b</U> <span>c</span>", &config), "<U>b</U> c");
    }

    #[test]
    fn test_multiline_comment() {
        let config = ConversionConfig::default();
        assert_eq!(strip_tags("a<!--\n<b>\n-->b", &config), "ab");
    }

    #[test]
    fn test_lone_angle_brackets_kept() {
        let config = ConversionConfig::default();
        assert_eq!(strip_tags("1 < 2 and 3 > 2", &config), "1 < 2 and 3 > 2");
    }
}
