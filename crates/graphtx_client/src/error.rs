//! Error types for the client.

use graphtx_protocol::ProtocolError;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Commit or rollback was requested while no transaction is open.
    ///
    /// Raised before any transport call is attempted.
    #[error("no open transaction to close")]
    NoOpenTransaction,

    /// The underlying HTTP call failed (connection refused, timeout, DNS,
    /// TLS).
    ///
    /// Produced by transport implementations. `TransactionClient::query`
    /// absorbs this variant into the returned `Response` rather than
    /// propagating it.
    #[error("transport error: {message}")]
    Transport {
        /// Description of the failure.
        message: String,
    },

    /// A response body could not be interpreted.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl ClientError {
    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Returns true if this is a transport failure.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport { .. })
    }
}
