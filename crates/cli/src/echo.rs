use owo_colors::{OwoColorize, Style};

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "Plainify".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Convert HTML documents to plain text\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print timing information with color coding
pub fn print_timing(label: &str, duration: std::time::Duration) {
    let ms = duration.as_secs_f64() * 1000.0;
    let (indicator, style) = timing_indicator(ms);
    eprintln!("  {} {:>8.2}ms ({})", format!("{}:", label).dimmed(), ms, indicator.style(style));
}

/// Speed label and its style for a duration in milliseconds
fn timing_indicator(ms: f64) -> (&'static str, Style) {
    if ms < 50.0 {
        ("fast", Style::new().dimmed())
    } else if ms < 100.0 {
        ("moderate", Style::new().bright_yellow())
    } else {
        ("slow", Style::new().bright_red())
    }
}

/// Print the effective conversion settings
pub fn print_config_details(config: &plainify_core::ConversionConfig) {
    let tags = config
        .allowed_passthrough_tags()
        .iter()
        .map(|t| format!("<{}>", t))
        .collect::<String>();
    let base_url = if config.base_url().is_empty() { "(none)" } else { config.base_url() };

    eprintln!("  {} {}", "Links:".dimmed(), config.link_style().to_string().bright_white());
    eprintln!("  {} {}", "Width:".dimmed(), config.line_width().to_string().bright_white());
    eprintln!("  {} {}", "Base URL:".dimmed(), base_url.bright_white());
    if !tags.is_empty() {
        eprintln!("  {} {}", "Keep tags:".dimmed(), tags.bright_white());
    }
    eprintln!();
}

/// Print timing summary
pub fn print_timing_summary(total: std::time::Duration, timings: &[(String, std::time::Duration)]) {
    eprintln!("{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Timing Summary".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());

    for (label, duration) in timings {
        print_timing(label, *duration);
    }

    eprintln!(
        "  {} {:>8.2}ms\n",
        format!("{}:", "Total").bold().dimmed(),
        total.as_secs_f64() * 1000.0
    );
}

/// Format file size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_indicator_thresholds() {
        assert_eq!(timing_indicator(10.0).0, "fast");
        assert_eq!(timing_indicator(50.0).0, "moderate");
        assert_eq!(timing_indicator(99.9).0, "moderate");
        assert_eq!(timing_indicator(250.0).0, "slow");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
