//! Unified error types for godoc-mcp.
//!
//! Every failure surfaces as one of these kinds, with a human-readable detail.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error types for the godoc-mcp tools.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty query).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Invalid or disallowed URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Non-2xx status or transport failure while fetching a page.
    #[error("FETCH_ERROR: {0}")]
    FetchError(String),

    /// Fetch response too large.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// A structurally required page region is absent.
    #[error("REGION_NOT_FOUND: {0}")]
    RegionNotFound(String),

    /// A located region could not be serialized back to HTML.
    #[error("SERIALIZATION_ERROR: {0}")]
    SerializationError(String),

    /// A tool result could not be encoded for the transport.
    #[error("MARSHAL_ERROR: {0}")]
    MarshalError(String),

    /// A CSS selector failed to parse.
    #[error("INVALID_SELECTOR: {0}")]
    InvalidSelector(String),
}

impl Error {
    /// The region name carried by a `RegionNotFound`, if this is one.
    pub fn missing_region(&self) -> Option<&str> {
        match self {
            Error::RegionNotFound(region) => Some(region),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MarshalError(err.to_string())
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidInput(_) => -32602,
            Error::RegionNotFound(_) => -32000,
            Error::SerializationError(_) => -32001,
            Error::InvalidUrl(_) => -32003,
            Error::FetchTooLarge(_) => -32007,
            Error::FetchError(_) => -32008,
            Error::MarshalError(_) => -32013,
            Error::InvalidSelector(_) => -32014,
        };

        McpError { code: ErrorCode(code), message: err.to_string().into(), data: None }
    }
}
