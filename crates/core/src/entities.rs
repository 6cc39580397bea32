//! HTML entity handling.
//!
//! Decoding runs in three passes. A curated table maps the entities that
//! have a deliberate plain-text rendering (`&copy;` -> `(c)`, `&mdash;` ->
//! `--`, ...). Every remaining well-formed entity is then decoded with the
//! HTML5 parser's named-character table, and whatever still looks like an
//! entity afterwards is dropped.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

/// Stand-in for `&amp;` while the other entity passes run, so that
/// `&amp;quot;` comes out as `&quot;` and not as `"`.
const AMP_PLACEHOLDER: &str = "|+|amp|+|";

static CURATED: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?i)&(nbsp|#160);", " "),
        (r"(?i)&(quot|rdquo|ldquo|#8220|#8221|#147|#148);", "\""),
        (r"(?i)&(apos|rsquo|lsquo|#8216|#8217);", "'"),
        (r"(?i)&gt;", ">"),
        (r"(?i)&lt;", "<"),
        (r"(?i)&(copy|#169);", "(c)"),
        (r"(?i)&(trade|#8482|#153);", "(tm)"),
        (r"(?i)&(reg|#174);", "(R)"),
        (r"(?i)&(mdash|#151|#8212);", "--"),
        (r"(?i)&(ndash|minus|#8211|#8722);", "-"),
        (r"(?i)&(bull|#149|#8226);", "*"),
        (r"(?i)&(pound|#163);", "£"),
        (r"(?i)&(euro|#8364);", "EUR"),
        (r"(?i)&(amp|#38);", AMP_PLACEHOLDER),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (Regex::new(pattern).expect("curated entity regex should compile"), replacement)
    })
    .collect()
});

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:[a-zA-Z][a-zA-Z0-9]*|#[0-9]+|#[xX][0-9a-fA-F]+);").expect("ENTITY regex should compile")
});

static LEFTOVER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:[a-zA-Z0-9]{2,6}|#[0-9]{2,4});").expect("LEFTOVER regex should compile")
});

/// Full entity stage of the pipeline: curated table, standard decoding,
/// removal of unknown entities, ampersand restoration.
pub fn decode_entities(text: &str) -> String {
    let mut out = text.to_string();
    for (re, replacement) in CURATED.iter() {
        out = re.replace_all(&out, *replacement).into_owned();
    }

    out = decode_standard(&out);
    out = LEFTOVER.replace_all(&out, "").into_owned();
    out.replace(AMP_PLACEHOLDER, "&")
}

/// Decodes every well-formed entity in `text`. Unknown names are left as is.
pub fn decode_standard(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut cache: HashMap<&str, String> = HashMap::new();
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for m in ENTITY.find_iter(text) {
        out.push_str(&text[last..m.start()]);
        let decoded = cache.entry(m.as_str()).or_insert_with(|| decode_one(m.as_str()));
        out.push_str(decoded);
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}

/// Escapes the characters that would otherwise be read back as markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Decodes a single `&...;` reference, or returns it unchanged when it does
/// not resolve as a whole.
fn decode_one(entity: &str) -> String {
    let body = &entity[1..entity.len() - 1];
    if let Some(number) = body.strip_prefix('#') {
        return decode_numeric(number).map_or_else(|| entity.to_string(), String::from);
    }

    let fragment = Html::parse_fragment(entity);
    let decoded: String = fragment.root_element().text().collect();
    // legacy names match as prefixes (`&notit;` -> `¬it;`), leaving a `;` tail
    if decoded.is_empty() || (decoded.ends_with(';') && decoded != ";") {
        entity.to_string()
    } else {
        decoded
    }
}

/// Resolves `65` or `x41` to a character. NUL, surrogates, C1 controls and
/// out-of-range values do not resolve.
fn decode_numeric(number: &str) -> Option<char> {
    let code = match number.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => number.parse::<u32>().ok()?,
    };
    if code == 0 || (0x80..=0x9F).contains(&code) {
        return None;
    }
    char::from_u32(code)
}
