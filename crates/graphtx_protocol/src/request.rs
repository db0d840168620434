//! The outgoing payload and the per-attempt diagnostics record.

use crate::statement::Statement;
use serde::Serialize;
use std::time::SystemTime;

/// The request body sent to every transactional endpoint.
///
/// Serializes as `{"statements": [...]}` with the statements in the order
/// they were appended to the batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryPayload {
    /// Statements, in submission order.
    pub statements: Vec<Statement>,
}

impl QueryPayload {
    /// Creates a payload from a drained batch.
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

/// A record of one dispatch attempt, kept for diagnostics.
///
/// Created per `query` call and retained inside the returned `Response`;
/// never mutated after construction.
#[derive(Debug, Clone)]
pub struct Request {
    /// The URI the payload was (or would have been) sent to.
    pub uri: String,
    /// The payload as it went over the wire.
    pub payload: QueryPayload,
    /// Wall-clock time the attempt started.
    pub timestamp: SystemTime,
}

impl Request {
    /// Creates a request record stamped with the current wall-clock time.
    pub fn new(uri: impl Into<String>, payload: QueryPayload) -> Self {
        Self {
            uri: uri.into(),
            payload,
            timestamp: SystemTime::now(),
        }
    }
}
