//! Error types for the protocol crate.

use thiserror::Error;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors that can occur while interpreting a server response.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// The server returned a non-empty body that is not valid JSON.
    #[error("malformed response body: {source}")]
    MalformedResponse {
        /// The underlying decode error.
        #[from]
        source: serde_json::Error,
    },
}
