//! Fetching document bytes from a URL
//!
//! The whole body is buffered in memory before parsing. The response is
//! owned by the fetch call and dropped on every return path.

use std::io::ErrorKind;

use url::Url;
use xml_engine_traits::error::{Error, Result};

use crate::config::FormatterConfig;

/// Read the full contents behind `url`.
///
/// `file:` URLs are read from disk, `http:` and `https:` go through a
/// blocking HTTP client. Every failure is reported as [`Error::Io`].
pub fn fetch_url(url: &str, config: &FormatterConfig) -> Result<Vec<u8>> {
    let url = Url::parse(url).map_err(|e| {
        Error::Io(std::io::Error::new(
            ErrorKind::InvalidInput,
            format!("invalid URL {url}: {e}"),
        ))
    })?;

    match url.scheme() {
        "file" => fetch_file(&url),
        "http" | "https" => fetch_http(&url, config),
        scheme => Err(Error::Io(std::io::Error::new(
            ErrorKind::Unsupported,
            format!("unsupported URL scheme: {scheme}"),
        ))),
    }
}

fn fetch_file(url: &Url) -> Result<Vec<u8>> {
    let path = url.to_file_path().map_err(|_| {
        Error::Io(std::io::Error::new(
            ErrorKind::InvalidInput,
            format!("not a local file URL: {url}"),
        ))
    })?;
    Ok(std::fs::read(path)?)
}

fn fetch_http(url: &Url, config: &FormatterConfig) -> Result<Vec<u8>> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.fetch_timeout())
        .build()
        .map_err(Error::io_other)?;

    let response = client.get(url.clone()).send().map_err(Error::io_other)?;

    if !response.status().is_success() {
        return Err(Error::io_other(format!(
            "fetch failed with status: {} for URL: {}",
            response.status(),
            url
        )));
    }

    let body = response.bytes().map_err(Error::io_other)?;
    tracing::debug!(url = %url, bytes = body.len(), "fetched document");
    Ok(body.to_vec())
}
