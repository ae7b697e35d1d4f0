//! Error types for fetching, configuring and rendering
use thiserror::Error;

/// Failure while writing a report to its sink
#[derive(Debug, Error)]
pub enum RenderError {
    /// The sink rejected a write or flush
    #[error("write error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV encoder failed
    #[error("CSV error: {0}")]
    Csv(String),

    /// The PDF backend failed to encode or save the document
    #[error("PDF error: {0}")]
    Pdf(String),
}

impl From<csv::Error> for RenderError {
    fn from(err: csv::Error) -> Self {
        match err.into_kind() {
            csv::ErrorKind::Io(io) => RenderError::Io(io),
            other => RenderError::Csv(format!("{:?}", other)),
        }
    }
}

impl From<csv::IntoInnerError<csv::Writer<Vec<u8>>>> for RenderError {
    fn from(err: csv::IntoInnerError<csv::Writer<Vec<u8>>>) -> Self {
        RenderError::Csv(err.to_string())
    }
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}

/// Failure while talking to the catalog API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, TLS or timeout failure
    #[error("network error: {0}")]
    Network(String),

    /// The API answered with a non-success status
    #[error("API returned {status} for {endpoint}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// The configured token cannot be sent as an HTTP header
    #[error("invalid API token: {0}")]
    InvalidToken(String),

    /// The payload was not the expected JSON shape
    #[error("failed to decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

/// Invalid or incomplete configuration
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("CLEVER_API_TOKEN environment variable is required")]
    MissingToken,

    #[error("unsupported output format: {0} (supported: markdown, txt, csv, pdf)")]
    UnsupportedFormat(String),
}
