//! Structural tag rewriting.
//!
//! Two ordered rule sets turn markup into text:
//!
//! - [`rewrite_tags`] applies a fixed table of pattern -> replacement pairs
//!   (paragraphs, breaks, lists, tables, ...). Order matters: whole-region
//!   removals come first, block-level rules before inline ones that may sit
//!   inside them.
//! - [`rewrite_callbacks`] handles the tags whose output depends on their
//!   content: anchors go through a [`LinkCollector`], headings, bold and
//!   table headers through [`to_upper`].

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::case::to_upper;
use crate::links::{LinkCollector, parse_style_override};

/// Class of a `<span>` whose content is dropped from the output.
pub const IGNORE_MARKER: &str = "_html2text_ignore";

static TAG_RULES: LazyLock<Vec<(Regex, String)>> = LazyLock::new(|| {
    let hr = format!("\n{}\n", "-".repeat(25));
    let ignore = format!(r#"(?is)<span class="{}">.+?</span>"#, IGNORE_MARKER);

    [
        // carriage returns
        (r"\r", ""),
        // newlines and tabs
        (r"[\n\t]+", " "),
        // runs of spaces
        (r"[ ]{2,}", " "),
        (r"(?is)<head\b[^>]*>.*?</head>", ""),
        (r"(?is)<script\b[^>]*>.*?</script>", ""),
        (r"(?is)<style\b[^>]*>.*?</style>", ""),
        (r"(?i)<p\b[^>]*>", "\n\n"),
        (r"(?i)<br\b[^>]*>", "\n"),
        (r"(?is)<i\b[^>]*>(.*?)</i>", "_${1}_"),
        (r"(?is)<em\b[^>]*>(.*?)</em>", "_${1}_"),
        (r"(?i)<ul\b[^>]*>|</ul>", "\n\n"),
        (r"(?i)<ol\b[^>]*>|</ol>", "\n\n"),
        (r"(?i)<dl\b[^>]*>|</dl>", "\n\n"),
        (r"(?is)<li\b[^>]*>(.*?)</li>", "\t* ${1}\n"),
        (r"(?is)<dd\b[^>]*>(.*?)</dd>", " ${1}\n"),
        (r"(?is)<dt\b[^>]*>(.*?)</dt>", "\t* ${1}"),
        (r"(?i)<li\b[^>]*>", "\n\t* "),
        (r"(?i)<hr\b[^>]*>", hr.as_str()),
        (r"(?i)<div\b[^>]*>", "<div>\n"),
        (r"(?i)<table\b[^>]*>|</table>", "\n\n"),
        (r"(?i)<tr\b[^>]*>|</tr>", "\n"),
        (r"(?is)<td\b[^>]*>(.*?)</td>", "\t\t${1}\n"),
        (ignore.as_str(), ""),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (Regex::new(pattern).expect("tag rule regex should compile"), replacement.to_string())
    })
    .collect()
});

static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\s([^>]*?\s)?href=(?:"([^"']+)"|'([^"']+)')([^>]*)>(.*?)</a>"#).expect("LINK regex should compile")
});
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h[1-6](?:\s[^>]*)?>(.*?)</h[1-6]>").expect("HEADING regex should compile"));
static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<b(?:\s[^>]*)?>(.*?)</b>").expect("BOLD regex should compile"));
static STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<strong(?:\s[^>]*)?>(.*?)</strong>").expect("STRONG regex should compile"));
static TABLE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<th(?:\s[^>]*)?>(.*?)</th>").expect("TABLE_HEADER regex should compile"));

/// Applies the structural tag table.
pub fn rewrite_tags(text: &str) -> String {
    let mut out = text.to_string();
    for (re, replacement) in TAG_RULES.iter() {
        out = re.replace_all(&out, replacement.as_str()).into_owned();
    }
    out
}

/// Applies the content-dependent rules: links, headings, bold/strong, `<th>`.
pub fn rewrite_callbacks(text: &str, links: &mut LinkCollector<'_>) -> String {
    let out = LINK.replace_all(text, |caps: &Captures| {
        let href = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
        let attributes = format!("{} {}", group(caps, 1), group(caps, 4));
        links.register(href, group(caps, 5), parse_style_override(&attributes))
    });
    let out = HEADING.replace_all(&out, |caps: &Captures| to_upper(&format!("\n\n{}\n\n", group(caps, 1))));
    let out = BOLD.replace_all(&out, |caps: &Captures| to_upper(group(caps, 1)));
    let out = STRONG.replace_all(&out, |caps: &Captures| to_upper(group(caps, 1)));
    let out = TABLE_HEADER.replace_all(&out, |caps: &Captures| to_upper(&format!("\t\t{}\n", group(caps, 1))));
    out.into_owned()
}

fn group<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
    caps.get(index).map_or("", |m| m.as_str())
}
