//! Error types for the garden session engine.

/// Errors that can occur while driving a garden session.
///
/// Messages on the user-facing variants (`FileRead`, `FileFormat`,
/// `Generation`) are safe to display verbatim; transport detail stays in
/// the log record emitted before normalization.
#[derive(Debug, thiserror::Error)]
pub enum GardenError {
    /// API key missing or invalid.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Reading the selected file from disk failed.
    #[error("Failed to read the selected file.")]
    FileRead(#[source] std::io::Error),

    /// The file's MIME type could not be determined (unknown magic bytes
    /// or malformed data URL header).
    #[error("Could not determine file type.")]
    FileFormat,

    /// A generation call failed. Carries the user-safe message for the
    /// call site; the underlying cause was already logged.
    #[error("{0}")]
    Generation(String),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned by the endpoint.
        message: String,
    },

    /// The response arrived but did not contain the expected payload.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Content was blocked by safety filters.
    #[error("content blocked: {0}")]
    ContentBlocked(String),

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for garden session operations.
pub type Result<T> = std::result::Result<T, GardenError>;
