use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("plainify")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Plainify Contributors")
        .about("Convert HTML documents to readable plain text")
        .arg(clap::arg!(<INPUT> "Local HTML file, URL to fetch, or '-' for stdin"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-l --links <STYLE> "Link style (none, inline, nextline, table)")
                .value_name("STYLE")
                .value_parser(["none", "inline", "nextline", "table"]),
        )
        .arg(clap::arg!(-w --width <COLS> "Wrap width in columns (minimum 45)").value_name("COLS"))
        .arg(clap::arg!(--allow_tags <TAGS> "Tags to keep verbatim, e.g. \"<b><i>\" or \"b,i\"").value_name("TAGS"))
        .arg(clap::arg!(--base_url <URL> "Base URL for resolving relative links").value_name("URL"))
        .arg(
            clap::arg!(-c --config <FILE> "JSON config file (default: the user config file, if present)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(--set <KEY_VALUE> "Set an option by name, e.g. --set link_style=table (repeatable)")
                .value_name("KEY=VALUE")
                .action(clap::ArgAction::Append),
        )
        .arg(clap::arg!(--show_config "Print the effective configuration as JSON and exit"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--user_agent <UA> "Custom User-Agent for HTTP requests").value_name("UA"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"))
        .arg(
            clap::arg!(--completions <SHELL> "Generate shell completion script")
                .value_name("SHELL")
                .value_parser(["bash", "zsh", "fish", "powershell"]),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "plainify", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "plainify", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "plainify", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "plainify", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
