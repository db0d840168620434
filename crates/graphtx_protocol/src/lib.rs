//! # graphtx Protocol
//!
//! Wire types for the graph database transactional HTTP API.
//!
//! This crate provides:
//! - `Statement` and `StatementBatch` for accumulating queries
//! - `QueryPayload`, the `{"statements": [...]}` request body
//! - `Request`, the per-attempt diagnostics record
//! - `Response`, a lazily-parsed wrapper over a raw HTTP result
//!
//! This is a pure protocol crate with no I/O operations.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod request;
mod response;
mod statement;

pub use error::{ProtocolError, ProtocolResult};
pub use request::{QueryPayload, Request};
pub use response::{RawResponse, Response, TRANSPORT_FAILURE_CODE, TRANSPORT_FAILURE_STATUS};
pub use statement::{Statement, StatementBatch};
