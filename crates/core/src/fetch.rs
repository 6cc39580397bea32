//! Loading HTML from URLs, files, and stdin.
//!
//! These are the only functions in the crate that perform I/O; the
//! conversion itself works on an in-memory string.

use std::fs;
use std::path::PathBuf;
#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::{PlainifyError, Result};

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: "Mozilla/5.0 (compatible; Plainify/1.0; +https://github.com/stormlightlabs/plainify)".to_string(),
        }
    }
}

/// Parses `input` as an absolute `http`/`https` URL.
pub fn parse_http_url(input: &str) -> Result<Url> {
    let url = Url::parse(input).map_err(|e| PlainifyError::InvalidUrl(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(PlainifyError::InvalidUrl(format!(
            "unsupported scheme '{}' (expected http:// or https://)",
            other
        ))),
    }
}

/// The scheme and authority of `url`, usable as a base URL for relative links.
pub fn url_origin(url: &Url) -> String {
    url.origin().ascii_serialization()
}

/// Fetches HTML content from a URL.
///
/// Performs an HTTP GET request and returns the response body as text,
/// following redirects and respecting the configured timeout.
#[cfg(feature = "fetch")]
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = parse_http_url(url)?;

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(PlainifyError::HttpError)?;

    debug!(url = %parsed_url, timeout = config.timeout, "fetching document");

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                PlainifyError::Timeout { timeout: config.timeout }
            } else {
                PlainifyError::HttpError(e)
            }
        })?;

    let content = response.text().await?;

    Ok(content)
}

/// Reads HTML content from a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        return Err(PlainifyError::FileNotFound(path_buf));
    }

    debug!(path, "reading document");
    fs::read_to_string(&path_buf).map_err(PlainifyError::from)
}

/// Reads HTML content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(PlainifyError::from)?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 30);
        assert!(config.user_agent.contains("Plainify"));
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn test_fetch_url_invalid() {
        let config = FetchConfig::default();
        let result = std::thread::spawn(move || {
            tokio::runtime::Runtime::new()
                .unwrap()
                .block_on(fetch_url("not-a-url", &config))
        })
        .join()
        .unwrap();

        assert!(matches!(result, Err(PlainifyError::InvalidUrl(_))));
    }

    #[test]
    fn test_parse_http_url() {
        assert!(parse_http_url("https://example.com/a").is_ok());
        assert!(matches!(parse_http_url("example.com"), Err(PlainifyError::InvalidUrl(_))));
        assert!(matches!(parse_http_url("ftp://example.com"), Err(PlainifyError::InvalidUrl(_))));
    }

    #[test]
    fn test_url_origin() {
        let url = Url::parse("https://example.com:8443/blog/post.html?x=1").unwrap();
        assert_eq!(url_origin(&url), "https://example.com:8443");
    }

    #[test]
    fn test_fetch_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<p>hi</p>").unwrap();
        let html = fetch_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(html, "<p>hi</p>");
    }

    #[test]
    fn test_fetch_file_not_found() {
        let result = fetch_file("/nonexistent/path/file.html");
        assert!(matches!(result, Err(PlainifyError::FileNotFound(_))));
    }
}
