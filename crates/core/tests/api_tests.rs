//! Library API integration tests
use plainify_core::*;
use rstest::rstest;

fn words(word: &str, count: usize) -> String {
    vec![word; count].join(" ")
}

#[rstest]
#[case::paragraph_and_bold("<p>Hello <b>World</b></p>", "Hello WORLD")]
#[case::strong("<strong>loud</strong> quiet", "LOUD quiet")]
#[case::heading("<h1>Title</h1><p>Body</p>", "TITLE\n\nBody")]
#[case::emphasis("<p>An <em>important</em> <i>point</i></p>", "An _important_ _point_")]
#[case::list("<ul><li>One</li><li>Two</li></ul>", "\t* One\n\t* Two")]
#[case::line_breaks("one<br>two<br/>three", "one\ntwo\nthree")]
#[case::entities("<p>Fish &amp; Chips &mdash; &copy; 2024&nbsp;Ltd</p>", "Fish & Chips -- (c) 2024 Ltd")]
#[case::unknown_entity("a&zzz;b", "ab")]
#[case::legacy_entity_prefix("a&notit;b", "ab")]
#[case::ignore_span(r#"<p>keep <span class="_html2text_ignore">secret</span>this</p>"#, "keep this")]
#[case::collapsed_whitespace("<p>lots\n\n   of\t\tspace</p>", "lots of space")]
fn test_conversions(#[case] html: &str, #[case] expected: &str) {
    assert_eq!(convert_to_text(html, &ConversionConfig::default()), expected);
}

#[test]
fn test_document_chrome_removed() {
    let html = r#"
        <html>
            <head><title>Ignored</title><style>p { color: red; }</style></head>
            <body>
                <script>alert("no");</script>
                <p>Body text</p>
            </body>
        </html>
    "#;
    assert_eq!(convert_to_text(html, &ConversionConfig::default()), "Body text");
}

#[test]
fn test_table_rendering() {
    let html = "<table><tr><th>Name</th></tr><tr><td>Bob</td></tr></table>";
    let text = convert_to_text(html, &ConversionConfig::default());
    assert!(text.contains("\t\tNAME"));
    assert!(text.contains("\t\tBob"));
}

#[test]
fn test_horizontal_rule() {
    let text = convert_to_text("<p>a</p><hr><p>b</p>", &ConversionConfig::default());
    assert_eq!(text, format!("a\n{}\n\nb", "-".repeat(25)));
}

#[test]
fn test_idempotent_conversion() {
    let html = r#"<h2>News</h2><p>See <a href="/a">this</a> and <a href="http://other.org">that</a>.</p>
        <blockquote><p>Quoted <a href="/a">again</a></p></blockquote><pre>  keep  spacing</pre>"#;
    let config = ConversionConfig::builder().link_style(LinkStyle::Table).base_url("http://e.com").build();
    let first = convert_to_text(html, &config);
    let second = convert_to_text(html, &config);
    assert_eq!(first, second);
}

#[test]
fn test_width_floor() {
    let config = ConversionConfig::builder().line_width(10).build();
    assert_eq!(config.line_width(), MIN_LINE_WIDTH);

    let text = convert_to_text(&words("a", 60), &config);
    let first = text.lines().next().unwrap();
    assert_eq!(first, words("a", 23));
    assert!(text.lines().all(|l| l.chars().count() <= MIN_LINE_WIDTH));
}

#[test]
fn test_custom_width_wraps() {
    let config = ConversionConfig::builder().line_width(60).build();
    let text = convert_to_text(&format!("<p>{}</p>", words("word", 40)), &config);
    assert!(text.lines().count() > 1);
    assert!(text.lines().all(|l| l.chars().count() <= 60));
}

#[test]
fn test_link_numbering_stability() {
    let html = r#"<a href="/x">link</a> <a href="/x">link</a> <a href="/y">other</a>"#;
    let config = ConversionConfig::builder().link_style(LinkStyle::Table).base_url("http://e.com").build();
    let text = convert_to_text(html, &config);

    assert_eq!(text.matches("link [1]").count(), 2);
    assert!(text.contains("other [2]"));
    assert!(text.ends_with("Links:\n------\n[1] http://e.com/x\n[2] http://e.com/y"));
    assert_eq!(text.matches("http://e.com/x").count(), 1);
}

#[test]
fn test_inline_link_with_base_url() {
    let config = ConversionConfig::builder().link_style(LinkStyle::Inline).base_url("http://e.com/").build();
    assert_eq!(convert_to_text(r#"<a href="/x">link</a>"#, &config), "link [http://e.com/x]");
}

#[test]
fn test_href_found_after_data_attribute() {
    let config = ConversionConfig::builder().base_url("http://e.com").build();
    let text = convert_to_text(r#"<a data-href="/a" href="/b">x</a>"#, &config);
    assert_eq!(text, "x [http://e.com/b]");
}

#[test]
fn test_ignored_links_render_text_only() {
    let html = r##"<a href="mailto:me@e.com">mail</a> <a href="#top">top</a> <a href="javascript:go()">go</a>"##;
    let config = ConversionConfig::builder().link_style(LinkStyle::Table).build();
    assert_eq!(convert_to_text(html, &config), "mail top go");
}

#[test]
fn test_per_link_override() {
    let html = r#"<a href="http://a.org">a</a> <a class="_html2text_link_table" href="http://b.org">b</a>"#;
    let text = convert_to_text(html, &ConversionConfig::default());
    assert!(text.starts_with("a [http://a.org] b [1]"));
    assert!(text.ends_with("[1] http://b.org"));
}

#[test]
fn test_blank_lines_collapse() {
    let text = convert_to_text("<p>a</p><br><br><br><br><p>b</p>", &ConversionConfig::default());
    assert_eq!(text, "a\n\nb");
}

#[test]
fn test_pre_whitespace_preserved() {
    let text = convert_to_text("<pre>\tcode\n  indented\n</pre>", &ConversionConfig::default());
    assert_eq!(text, "    code\n  indented");
}

#[test]
fn test_nested_blockquote_widths() {
    let html = format!(
        "<blockquote>{} <blockquote>{}</blockquote></blockquote>",
        words("a", 60),
        words("b", 60)
    );
    let config = ConversionConfig::builder().line_width(45).build();
    let text = convert_to_text(&html, &config);
    let lines: Vec<&str> = text.lines().collect();

    // depth 1 wraps at 43, depth 2 at 41
    assert_eq!(lines[0], format!("> {}", words("a", 22)));
    let nested = lines.iter().find(|l| l.starts_with(">>")).unwrap();
    assert_eq!(*nested, format!(">> {}", words("b", 21)));
    assert!(lines.iter().all(|l| l.chars().count() <= 45));
}

#[test]
fn test_width_restored_after_blockquote() {
    let html = format!("<blockquote>q</blockquote><p>{}</p>", words("a", 60));
    let config = ConversionConfig::builder().line_width(45).build();
    let text = convert_to_text(&html, &config);
    assert!(text.lines().any(|l| l == words("a", 23)));
}

#[test]
fn test_stray_blockquote_close() {
    let config = ConversionConfig::default();
    let malformed = convert_to_text("<p>text</p></blockquote><p>more</p>", &config);
    let clean = convert_to_text("<p>text</p><p>more</p>", &config);
    assert_eq!(malformed, clean);
    assert_eq!(malformed, "text\n\nmore");
}

#[test]
fn test_passthrough_tags() {
    let config = ConversionConfig::builder().allowed_tags(["u"]).build();
    assert_eq!(convert_to_text("<p><u>x</u> <span>y</span></p>", &config), "<u>x</u> y");
}

#[test]
fn test_text_converter_matches_function() {
    let config = ConversionConfig::builder().link_style(LinkStyle::NextLine).build();
    let converter = TextConverter::new(config.clone());
    let html = r#"<p>Go <a href="https://e.com">here</a></p>"#;
    assert_eq!(converter.convert(html), convert_to_text(html, &config));
    assert_eq!(converter.convert(html), "Go here\n[https://e.com]");
}

#[test]
fn test_garbage_input_does_not_panic() {
    let config = ConversionConfig::default();
    for html in ["", "<", "<<>>", "&", "&#;", "<pre>", "</pre></pre>", "<blockquote><blockquote>", "<a href=>x</a>"] {
        let _ = convert_to_text(html, &config);
    }
}

#[test]
fn test_set_option_unknown_key() {
    let mut config = ConversionConfig::default();
    assert!(matches!(
        config.set_option("charset", "utf-8"),
        Err(PlainifyError::UnknownOption(_))
    ));
}
