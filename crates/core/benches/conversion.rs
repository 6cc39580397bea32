use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use plainify_core::{ConversionConfig, LinkStyle, convert_to_text};

fn sample_document(sections: usize) -> String {
    let mut html = String::from("<html><head><title>Bench</title><style>p{}</style></head><body>");
    for i in 0..sections {
        html.push_str(&format!(
            "<h2>Section {i}</h2><p>Some <b>bold</b> and <em>emphasised</em> text with a \
             <a href=\"/page/{i}\">relative link</a> and an <a href=\"https://example.com\">absolute one</a>.</p>\
             <ul><li>first &amp; foremost</li><li>second &mdash; item</li></ul>\
             <blockquote><p>Quoted {i}</p><blockquote>nested</blockquote></blockquote>\
             <pre>\tfn main() {{\n\t    println!(\"{i}\");\n\t}}</pre>\
             <table><tr><th>Key</th><th>Value</th></tr><tr><td>k{i}</td><td>v{i}</td></tr></table>"
        ));
    }
    html.push_str("</body></html>");
    html
}

fn bench_convert(c: &mut Criterion) {
    let small = sample_document(5);
    let medium = sample_document(50);
    let large = sample_document(500);
    let config = ConversionConfig::default();

    let mut group = c.benchmark_group("convert");

    group.bench_with_input(BenchmarkId::new("small", "5 sections"), &small, |b, html| {
        b.iter(|| convert_to_text(black_box(html), &config))
    });

    group.bench_with_input(BenchmarkId::new("medium", "50 sections"), &medium, |b, html| {
        b.iter(|| convert_to_text(black_box(html), &config))
    });

    group.bench_with_input(BenchmarkId::new("large", "500 sections"), &large, |b, html| {
        b.iter(|| convert_to_text(black_box(html), &config))
    });

    group.finish();
}

fn bench_link_table(c: &mut Criterion) {
    let html = sample_document(50);
    let config = ConversionConfig::builder().link_style(LinkStyle::Table).base_url("https://example.com").build();

    c.bench_function("convert_table_links", |b| b.iter(|| convert_to_text(black_box(&html), &config)));
}

criterion_group!(benches, bench_convert, bench_link_table);
criterion_main!(benches);
