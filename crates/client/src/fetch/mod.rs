//! Page acquisition for the extractor.
//!
//! Extraction never performs I/O; this module is the collaborator that gets
//! the HTML in the first place.
//!
//! ### Routes
//! - Direct: plain GET with our User-Agent.
//! - Proxy: when an API key is configured, GET the scraping proxy endpoint
//!   with the target URL as a query parameter.
//!
//! ### Limits
//! - Max redirects: 5
//! - Max body bytes: 10MB (configurable)
//! - No retries; a failed fetch is reported to the caller as-is.

pub mod url;

use bytes::Bytes;
use partscope_core::{AppConfig, Error};
use reqwest::{Client, StatusCode, Url, header};
use std::time::{Duration, Instant};

pub use url::{UrlError, canonicalize, proxy_url};

/// Scraping proxy settings.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Proxy API endpoint.
    pub endpoint: String,
    /// Proxy API key.
    pub api_key: String,
    /// Ask the proxy to run JavaScript before returning the page.
    pub render_js: bool,
}

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "partscope/0.1")
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 10MB)
    pub max_bytes: usize,

    /// Request timeout (default: 60s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,

    /// Route requests through the scraping proxy when set.
    pub proxy: Option<ProxyConfig>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "partscope/0.1".to_string(),
            max_bytes: 10 * 1024 * 1024,
            timeout: Duration::from_millis(60_000),
            max_redirects: 5,
            proxy: None,
        }
    }
}

impl FetchConfig {
    /// Fetch settings from application configuration.
    pub fn from_app(config: &AppConfig) -> Self {
        let proxy = config.proxy_api_key().map(|key| ProxyConfig {
            endpoint: config.proxy_endpoint.clone(),
            api_key: key.to_string(),
            render_js: config.render_js,
        });

        Self {
            user_agent: config.user_agent.clone(),
            max_bytes: config.max_bytes,
            timeout: config.timeout(),
            proxy,
            ..Default::default()
        }
    }
}

/// Response from a fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// The canonical target URL
    pub url: Url,
    /// The final URL after redirects (the target URL when proxied)
    pub final_url: Url,
    /// HTTP status code
    pub status: StatusCode,
    /// Content-Type header
    pub content_type: Option<String>,
    /// Response body bytes
    pub bytes: Bytes,
    /// Whether the scraping proxy served the page
    pub proxied: bool,
    /// Time taken to fetch in milliseconds
    pub fetch_ms: u64,
}

impl FetchResponse {
    /// Body decoded as UTF-8, invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// HTTP fetch client for part pages.
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::HttpError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Fetch a part page, directly or through the proxy.
    pub async fn fetch(&self, url_str: &str) -> Result<FetchResponse, Error> {
        let start = Instant::now();
        let url = canonicalize(url_str).map_err(|e| Error::InvalidUrl(e.to_string()))?;

        let request_url = match &self.config.proxy {
            Some(proxy) => proxy_url(&proxy.endpoint, &proxy.api_key, &url, proxy.render_js)
                .map_err(|e| Error::InvalidUrl(format!("proxy endpoint: {}", e)))?,
            None => url.clone(),
        };

        let response = self
            .http
            .get(request_url)
            .header(header::ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| request_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpError(format!("status {} for {}", status.as_u16(), url)));
        }

        if let Some(len) = response.content_length()
            && exceeds(len, self.config.max_bytes)
        {
            return Err(Error::FetchTooLarge(format!("{} bytes exceeds {}", len, self.config.max_bytes)));
        }

        // The proxy request URL carries the API key.
        let proxied = self.config.proxy.is_some();
        let final_url = if proxied { url.clone() } else { response.url().clone() };
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let bytes = response.bytes().await.map_err(|e| request_error(&url, e))?;

        if bytes.len() > self.config.max_bytes {
            return Err(Error::FetchTooLarge(format!("{} bytes exceeds {}", bytes.len(), self.config.max_bytes)));
        }

        let fetch_ms = start.elapsed().as_millis() as u64;

        tracing::debug!(%url, proxied, fetch_ms, bytes = bytes.len(), "fetched part page");

        Ok(FetchResponse { url, final_url, status, content_type, bytes, proxied, fetch_ms })
    }
}

fn exceeds(len: u64, max_bytes: usize) -> bool {
    !usize::try_from(len).is_ok_and(|len| len <= max_bytes)
}

/// Map a transport error, dropping the request URL reqwest attaches to it.
fn request_error(url: &Url, err: reqwest::Error) -> Error {
    let err = err.without_url();
    if err.is_timeout() {
        Error::FetchTimeout(format!("{}: {}", url, err))
    } else {
        Error::HttpError(format!("network error for {}: {}", url, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.user_agent, "partscope/0.1");
        assert_eq!(config.max_bytes, 10 * 1024 * 1024);
        assert_eq!(config.timeout, Duration::from_millis(60_000));
        assert_eq!(config.max_redirects, 5);
        assert!(config.proxy.is_none());
    }

    #[test]
    fn test_fetch_config_from_app_direct() {
        let app = AppConfig { timeout_ms: 1500, user_agent: "ua".into(), ..Default::default() };
        let config = FetchConfig::from_app(&app);
        assert_eq!(config.timeout, Duration::from_millis(1500));
        assert_eq!(config.user_agent, "ua");
        assert!(config.proxy.is_none());
    }

    #[test]
    fn test_fetch_config_from_app_proxy() {
        let app = AppConfig { proxy_api_key: Some("KEY".into()), render_js: true, ..Default::default() };
        let proxy = FetchConfig::from_app(&app).proxy.unwrap();
        assert_eq!(proxy.api_key, "KEY");
        assert_eq!(proxy.endpoint, app.proxy_endpoint);
        assert!(proxy.render_js);
    }

    #[test]
    fn test_fetch_response_text_lossy() {
        let response = FetchResponse {
            url: Url::parse("https://example.com").unwrap(),
            final_url: Url::parse("https://example.com/redirected").unwrap(),
            status: StatusCode::OK,
            content_type: Some("text/html".to_string()),
            bytes: Bytes::from_static(b"<h1>Acme\xff</h1>"),
            proxied: false,
            fetch_ms: 100,
        };
        assert_eq!(response.text(), "<h1>Acme\u{fffd}</h1>");
    }

    #[tokio::test]
    async fn test_fetch_client_new() {
        let client = FetchClient::new(FetchConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_rejects_bad_url() {
        let client = FetchClient::new(FetchConfig::default()).unwrap();
        let result = client.fetch("ftp://example.com/part").await;
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_exceeds() {
        assert!(!exceeds(10, 10));
        assert!(exceeds(11, 10));
        assert!(exceeds(u64::MAX, usize::MAX - 1));
    }

    #[tokio::test]
    async fn test_proxy_error_hides_api_key() {
        let config = FetchConfig {
            proxy: Some(ProxyConfig {
                endpoint: "http://127.0.0.1:9/api/v1/".into(),
                api_key: "SECRET123".into(),
                render_js: false,
            }),
            timeout: Duration::from_secs(5),
            ..Default::default()
        };
        let client = FetchClient::new(config).unwrap();

        let err = client.fetch("https://example.com/part").await.unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, Error::HttpError(_) | Error::FetchTimeout(_)));
        assert!(message.contains("https://example.com/part"));
        assert!(!message.contains("SECRET123"), "{message}");
    }
}
