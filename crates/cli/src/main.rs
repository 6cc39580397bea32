use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, bail};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use owo_colors::OwoColorize;
use plainify_core::{
    ConversionConfig, FetchConfig, LinkStyle, apply_config_file, convert_to_text, default_config_path, fetch_file,
    fetch_stdin, fetch_url, parse_http_url, url_origin,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use url::Url;

mod echo;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Convert HTML documents to readable plain text
#[derive(Parser, Debug)]
#[command(name = "plainify")]
#[command(author = "Plainify Contributors")]
#[command(version)]
#[command(about = "Convert HTML documents to readable plain text", long_about = None)]
struct Args {
    /// Local HTML file, URL to fetch, or "-" for stdin
    #[arg(value_name = "INPUT", required_unless_present = "completions")]
    input: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Link style (none, inline, nextline, table)
    #[arg(short, long, value_name = "STYLE")]
    links: Option<LinkStyle>,

    /// Wrap width in columns (minimum 45)
    #[arg(short, long, value_name = "COLS")]
    width: Option<usize>,

    /// Tags to keep verbatim, e.g. "<b><i>" or "b,i"
    #[arg(long, value_name = "TAGS")]
    allow_tags: Option<String>,

    /// Base URL for resolving relative links
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// JSON config file (default: the user config file, if present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Set an option by name, e.g. --set link_style=table (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    show_config: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL", value_enum)]
    completions: Option<Shell>,
}

/// Install the stderr log subscriber; RUST_LOG wins over the verbosity flag.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "plainify=debug,plainify_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Layer the configuration: defaults, config file, `--set` options, then dedicated flags.
fn build_config(args: &Args) -> anyhow::Result<ConversionConfig> {
    let mut config = ConversionConfig::default();

    match &args.config {
        Some(path) => apply_config_file(&mut config, path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => {
            if let Some(path) = default_config_path().filter(|p| p.exists())
                && let Err(e) = apply_config_file(&mut config, &path)
            {
                echo::print_warning(&format!("Ignoring config file {}: {}", path.display(), e));
                config = ConversionConfig::default();
            }
        }
    }

    for option in &args.set {
        let Some((name, value)) = option.split_once('=') else {
            bail!("Invalid --set value '{}': expected KEY=VALUE", option);
        };
        config.set_option(name, value)?;
    }

    if let Some(style) = args.links {
        config.set_link_style(style);
    }
    if let Some(width) = args.width {
        config.set_line_width(width);
    }
    if let Some(tags) = &args.allow_tags {
        config.set_option("allowed_tags", tags)?;
    }
    if let Some(base_url) = &args.base_url {
        if Url::parse(base_url).is_err() {
            echo::print_warning(&format!("Base URL '{}' is not an absolute URL", base_url));
        }
        config.set_base_url(base_url);
    }

    Ok(config)
}

async fn read_input(input: &str, args: &Args) -> anyhow::Result<String> {
    if input == "-" {
        return fetch_stdin().context("Failed to read from stdin");
    }

    if input.starts_with("http://") || input.starts_with("https://") {
        let config = FetchConfig {
            timeout: args.timeout,
            user_agent: args.user_agent.clone().unwrap_or_else(|| FetchConfig::default().user_agent),
        };
        return fetch_url(input, &config).await.context("Failed to fetch URL");
    }

    fetch_file(input).with_context(|| format!("Failed to read file: {}", input))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "plainify", &mut io::stdout());
        return Ok(());
    }

    init_logging(args.verbose);

    let mut config = build_config(&args)?;
    debug!(
        link_style = %config.link_style(),
        line_width = config.line_width(),
        base_url = config.base_url(),
        "effective configuration"
    );

    if args.show_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let Some(input) = args.input.as_deref() else {
        bail!("No input given");
    };

    if args.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    let total_start = Instant::now();
    let mut timings = Vec::new();

    if args.verbose {
        let source = if input == "-" { "stdin".to_string() } else { input.bright_white().to_string() };
        echo::print_step(1, 3, &format!("Reading from {}", source));
    }

    let read_start = Instant::now();
    let html = read_input(input, &args).await?;
    timings.push(("Read".to_string(), read_start.elapsed()));

    if config.base_url().is_empty()
        && let Ok(url) = parse_http_url(input)
    {
        config.set_base_url(&url_origin(&url));
    }

    if args.verbose {
        eprintln!("  {} {}\n", "Size:".dimmed(), echo::format_size(html.len()).bright_white());
        echo::print_step(2, 3, "Converting to plain text");
        echo::print_config_details(&config);
    }

    let convert_start = Instant::now();
    let text = convert_to_text(&html, &config);
    timings.push(("Convert".to_string(), convert_start.elapsed()));

    if args.verbose {
        echo::print_step(3, 3, "Writing output");
        eprintln!();
    }

    match &args.output {
        Some(path) => {
            fs::write(path, format!("{}\n", text))
                .with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => println!("{}", text),
    }

    if args.verbose {
        echo::print_timing_summary(total_start.elapsed(), &timings);
    }

    Ok(())
}
