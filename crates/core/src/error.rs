//! Unified error types for partscope.
//!
//! Extraction itself never fails; these cover the collaborators around it
//! (document acquisition, persistence, configuration).

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error types for partscope.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty HTML).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Invalid URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Reading or writing a local file failed.
    #[error("IO_ERROR: {0}")]
    Io(#[from] std::io::Error),

    /// Fetch timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Fetch response too large.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// HTTP error response.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Record could not be serialized.
    #[error("SERIALIZE_FAILED: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Configuration could not be loaded or is invalid.
    #[error("CONFIG_ERROR: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::InvalidUrl(msg) => (-32003, msg.clone()),
            Error::FetchTimeout(msg) => (-32006, msg.clone()),
            Error::FetchTooLarge(msg) => (-32007, msg.clone()),
            Error::HttpError(msg) => (-32008, msg.clone()),
            Error::Io(e) => (-32000, e.to_string()),
            Error::Serialize(e) => (-32000, e.to_string()),
            Error::Config(e) => (-32001, e.to_string()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::HttpError("status 503".to_string());
        assert!(err.to_string().contains("HTTP_ERROR"));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_error_to_mcp_error() {
        let err = Error::InvalidInput("html cannot be empty".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32602);
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "page_content.html");
        let err: Error = io.into();
        assert!(err.to_string().starts_with("IO_ERROR"));
    }

    #[test]
    fn test_config_error_to_mcp_error() {
        let err: Error = crate::config::ConfigError::Invalid { field: "max_bytes".into(), reason: "zero".into() }.into();
        assert!(err.to_string().starts_with("CONFIG_ERROR"));
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32001);
    }
}
