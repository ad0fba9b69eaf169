//! part_open tool implementation.
//!
//! Fetches a part page and extracts a product record from it.

use chrono::Utc;
use partscope_client::{Extractor, FetchClient};
use partscope_core::{AppConfig, Error, ProductRecord, SimilarPartsStrategy};
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::part_extract::extractor_for;

/// Input parameters for part_open tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PartOpenParams {
    /// The part page URL to fetch.
    pub url: String,

    /// Similar-parts strategy override (see part_extract).
    #[serde(default)]
    pub strategy: Option<SimilarPartsStrategy>,
}

/// Output structure for part_open tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartOpenOutput {
    /// The canonical URL requested.
    pub url: String,
    /// The final URL after redirects.
    pub final_url: String,
    /// HTTP status code of the page response.
    pub status_code: u16,
    /// Content-Type header of the page response.
    pub content_type: Option<String>,
    /// ISO8601 timestamp of when the page was fetched.
    pub fetched_at: String,
    /// Fetch duration in milliseconds.
    pub fetch_ms: u64,
    /// Whether the scraping proxy served the page.
    pub proxied: bool,
    /// The extracted product record.
    pub record: ProductRecord,
}

/// Implementation of the part_open tool.
pub async fn open_impl(
    config: &AppConfig, fetcher: &FetchClient, params: PartOpenParams,
) -> Result<CallToolResult, McpError> {
    if params.url.trim().is_empty() {
        return Err(Error::InvalidInput("url cannot be empty".into()).into());
    }

    let response = fetcher.fetch(&params.url).await?;
    let fetched_at = Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);

    let record = extractor_for(config, params.strategy).extract_html(&response.text());

    tracing::info!(
        url = %response.url,
        fetch_ms = response.fetch_ms,
        found = !record.is_empty(),
        "part_open"
    );

    let output = PartOpenOutput {
        url: response.url.to_string(),
        final_url: response.final_url.to_string(),
        status_code: response.status.as_u16(),
        content_type: response.content_type.clone(),
        fetched_at,
        fetch_ms: response.fetch_ms,
        proxied: response.proxied,
        record,
    };

    let body = serde_json::to_string_pretty(&output).map_err(Error::from)?;
    Ok(CallToolResult::success(vec![Content::text(body)]))
}
