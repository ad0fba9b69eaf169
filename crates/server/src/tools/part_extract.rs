//! part_extract tool implementation.
//!
//! This tool extracts a product record from part page HTML.
//! No network I/O is performed - HTML is provided by the client.

use partscope_client::{Extractor, PartExtractor};
use partscope_core::{AppConfig, Error, SimilarPartsStrategy};
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for part_extract tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PartExtractParams {
    /// The raw HTML of the part detail page.
    pub html: String,

    /// Similar-parts strategy override.
    /// - "serial_number_list": part numbers only (default)
    /// - "spec_matrix": one record per comparison column
    #[serde(default)]
    pub strategy: Option<SimilarPartsStrategy>,
}

/// Build the extractor for a call: configured contract, per-call strategy override.
pub(crate) fn extractor_for(config: &AppConfig, strategy: Option<SimilarPartsStrategy>) -> PartExtractor {
    let extractor = PartExtractor::from_config(config);
    match strategy {
        Some(strategy) => extractor.with_strategy(strategy),
        None => extractor,
    }
}

/// Implementation of the part_extract tool.
pub async fn extract_impl(config: &AppConfig, params: PartExtractParams) -> Result<CallToolResult, McpError> {
    if params.html.trim().is_empty() {
        return Err(Error::InvalidInput("html cannot be empty".into()).into());
    }

    let record = extractor_for(config, params.strategy).extract_html(&params.html);

    tracing::info!(
        part_number = record.part_number.as_deref().unwrap_or("-"),
        bytes = params.html.len(),
        "part_extract"
    );

    let body = serde_json::to_string_pretty(&record).map_err(Error::from)?;
    Ok(CallToolResult::success(vec![Content::text(body)]))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_HTML: &str = r#"
        <!DOCTYPE html>
        <html>
        <body>
            <h1>Acme <span>XYZ-100</span></h1>
            <div id="product-specs"><dl><dt>Package</dt><dd>SOT-23</dd></dl></div>
        </body>
        </html>
    "#;

    #[tokio::test]
    async fn test_extract_record() {
        let params = PartExtractParams { html: TEST_HTML.into(), strategy: None };

        let result = extract_impl(&AppConfig::default(), params).await;
        assert!(result.is_ok(), "extraction should succeed");

        let call_result = result.unwrap();
        assert!(!call_result.is_error.unwrap_or(false));
    }

    #[tokio::test]
    async fn test_extract_empty_html_fails() {
        let params = PartExtractParams { html: "  ".into(), strategy: None };

        let result = extract_impl(&AppConfig::default(), params).await;
        let err = result.unwrap_err();
        assert_eq!(err.code.0, -32602);
    }

    #[test]
    fn test_strategy_override() {
        let config = AppConfig::default();
        assert_eq!(extractor_for(&config, None).strategy(), SimilarPartsStrategy::SerialNumberList);
        assert_eq!(
            extractor_for(&config, Some(SimilarPartsStrategy::SpecMatrix)).strategy(),
            SimilarPartsStrategy::SpecMatrix
        );
    }

    #[test]
    fn test_params_deserialize() {
        let params: PartExtractParams =
            serde_json::from_str(r#"{"html":"<h1>x</h1>","strategy":"spec_matrix"}"#).unwrap();
        assert_eq!(params.strategy, Some(SimilarPartsStrategy::SpecMatrix));

        let params: PartExtractParams = serde_json::from_str(r#"{"html":"<h1>x</h1>"}"#).unwrap();
        assert_eq!(params.strategy, None);
    }
}
