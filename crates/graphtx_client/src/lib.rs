//! # graphtx Client
//!
//! Transaction state machine and HTTP transports for a graph database's
//! transactional HTTP API.
//!
//! This crate provides:
//! - `TransactionClient`, the transaction lifecycle state machine
//!   (idle → open → closed, driven by `QueryMode`)
//! - `HttpTransport`, the async transport seam
//! - `ReqwestTransport` for real HTTP, `MockTransport` for tests
//! - `ClientConfig` for connection parameters
//!
//! ## Key Invariants
//!
//! - The stored commit URI is set if and only if a server-side transaction
//!   is known to be open
//! - Every commit, rollback, or transport failure clears it
//! - The statement batch never survives past the `query` call that
//!   consumed it, success or failure
//! - Transport failures are absorbed into the returned `Response`, never
//!   raised out of `query`
//!
//! ## Quick Start
//!
//! ```no_run
//! use graphtx_client::{ClientConfig, QueryMode, ReqwestTransport, TransactionClient};
//!
//! # async fn run() -> Result<(), graphtx_client::ClientError> {
//! let config = ClientConfig::new("db.example.com").with_credentials("neo4j", "secret");
//! let mut client = TransactionClient::new(config, ReqwestTransport::new());
//!
//! client.statement("MATCH (n:Person) RETURN n.name", None, false);
//! let response = client.query(QueryMode::AutoCommit).await?;
//! println!("status {}", response.status());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod error;
mod http;
mod timing;
mod transport;

pub use client::{QueryMode, TransactionClient, TxState};
pub use config::{ClientConfig, Credentials};
pub use error::{ClientError, ClientResult};
pub use http::ReqwestTransport;
pub use timing::Timer;
pub use transport::{HttpTransport, MockTransport, RecordedCall, ScriptedOutcome, Verb};

pub use graphtx_protocol::{
    ProtocolError, QueryPayload, RawResponse, Request, Response, Statement, StatementBatch,
};
