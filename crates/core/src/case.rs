//! Emphasis by case: bold, headings and table headers are rendered in upper case.

use std::sync::LazyLock;

use regex::Regex;

use crate::entities::{decode_standard, escape_html};

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("TAG regex should compile"));

/// Upper-cases the text of an HTML fragment, leaving its tags untouched.
///
/// Each text segment is entity-decoded before the transform and escaped
/// again afterwards, so `&eacute;` becomes `É` and `&amp;` stays `&amp;`.
pub fn to_upper(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut last = 0;

    for tag in TAG.find_iter(fragment) {
        out.push_str(&upper_text(&fragment[last..tag.start()]));
        out.push_str(tag.as_str());
        last = tag.end();
    }
    out.push_str(&upper_text(&fragment[last..]));
    out
}

fn upper_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    escape_html(&decode_standard(text).to_uppercase())
}
