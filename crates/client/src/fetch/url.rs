//! Target URL canonicalization and scraping-proxy request URLs.

use url::Url;

/// Error type for URL handling failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Canonicalize a part page URL.
///
/// Trims whitespace, defaults the scheme to https, lowercases the host and
/// drops the fragment. The query string is kept as given.
pub fn canonicalize(input: &str) -> Result<Url, UrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let with_scheme = if trimmed.contains("://") { trimmed.to_string() } else { format!("https://{trimmed}") };
    let mut parsed = Url::parse(&with_scheme).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(UrlError::UnsupportedScheme(parsed.scheme().to_string()));
    }

    if let Some(host) = parsed.host_str().map(str::to_lowercase) {
        parsed.set_host(Some(&host)).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    }
    parsed.set_fragment(None);

    Ok(parsed)
}

/// Build the proxy request URL that fetches `target` on our behalf.
///
/// The target travels as the `url` query parameter, percent-encoded.
pub fn proxy_url(endpoint: &str, api_key: &str, target: &Url, render_js: bool) -> Result<Url, UrlError> {
    let mut url = Url::parse(endpoint).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    url.query_pairs_mut()
        .append_pair("api_key", api_key)
        .append_pair("url", target.as_str())
        .append_pair("render_js", if render_js { "true" } else { "false" });
    Ok(url)
}
