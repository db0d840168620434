//! Transaction lifecycle state machine.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::timing::Timer;
use crate::transport::HttpTransport;
use graphtx_protocol::{QueryPayload, Request, Response, StatementBatch};
use serde_json::{Map, Value};
use tracing::{debug, error};

/// How a batch should be dispatched relative to the transaction lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// Execute against the auto-commit endpoint; the server commits
    /// immediately.
    AutoCommit,
    /// Open a new server-side transaction with this batch.
    Begin,
    /// Add this batch to the open transaction and commit it.
    Commit,
    /// Roll back the open transaction (DELETE, batch typically empty).
    Rollback,
}

impl QueryMode {
    /// Returns true for the modes that close the transaction regardless of
    /// outcome.
    pub fn closes_transaction(&self) -> bool {
        matches!(self, QueryMode::Commit | QueryMode::Rollback)
    }
}

/// The client's view of the server-side transaction.
///
/// Invariant: `Open` holds the server-provided commit URI if and only if a
/// transaction is currently open and known to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxState {
    /// No transaction in flight.
    Idle,
    /// A transaction is open.
    Open {
        /// Server-provided URI addressing the open transaction.
        commit_uri: String,
    },
}

impl TxState {
    /// Returns true if a transaction is open.
    pub fn is_open(&self) -> bool {
        matches!(self, TxState::Open { .. })
    }

    /// The stored commit URI, if a transaction is open.
    pub fn commit_uri(&self) -> Option<&str> {
        match self {
            TxState::Open { commit_uri } => Some(commit_uri),
            TxState::Idle => None,
        }
    }
}

/// Client for a graph database's transactional HTTP API.
///
/// Accumulates statements into a batch and dispatches them in one round
/// trip per [`query`](TransactionClient::query) call, tracking the
/// server-side transaction through [`TxState`].
///
/// All mutating operations take `&mut self`: one query at a time per
/// instance, enforced by the borrow checker. Callers that need concurrent
/// queries use separate instances or serialize access externally.
pub struct TransactionClient<T: HttpTransport> {
    config: ClientConfig,
    transport: T,
    batch: StatementBatch,
    tx: TxState,
}

impl<T: HttpTransport> TransactionClient<T> {
    /// Creates a client over the given transport.
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            batch: StatementBatch::new(),
            tx: TxState::Idle,
        }
    }

    /// Connection configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns true if a server-side transaction is known to be open.
    pub fn is_open(&self) -> bool {
        self.tx.is_open()
    }

    /// The stored commit URI, if a transaction is open.
    pub fn commit_uri(&self) -> Option<&str> {
        self.tx.commit_uri()
    }

    /// Number of statements queued for the next dispatch.
    pub fn queued(&self) -> usize {
        self.batch.len()
    }

    /// Queues a statement; returns `self` for chaining.
    ///
    /// The text is opaque to this layer and is not validated.
    pub fn statement(
        &mut self,
        text: impl Into<String>,
        parameters: Option<Map<String, Value>>,
        include_stats: bool,
    ) -> &mut Self {
        self.batch.add(text, parameters, include_stats);
        self
    }

    /// Dispatches the queued batch according to `mode`.
    ///
    /// Exactly one HTTP call is made, except when `mode` is Commit or
    /// Rollback with no open transaction: that fails with
    /// [`ClientError::NoOpenTransaction`] before the batch is drained or
    /// the transport is touched.
    ///
    /// Transport failures do not propagate: they come back as a `Response`
    /// with status 500 and a synthesized `errors` entry, and the stored
    /// commit URI is cleared. On every path that reaches the transport the
    /// batch ends up empty; statements consumed by a failed dispatch are
    /// lost (at-most-once).
    pub async fn query(&mut self, mode: QueryMode) -> ClientResult<Response> {
        let uri = self.resolve_target(mode)?;
        let payload = QueryPayload::new(self.batch.drain());
        let request = Request::new(uri, payload);
        debug!(
            uri = %request.uri,
            statements = request.payload.statements.len(),
            ?mode,
            "dispatching statement batch"
        );

        let credentials = self.config.credentials();
        let timer = Timer::start();
        let outcome = match mode {
            QueryMode::Rollback => {
                self.transport
                    .delete(&request.uri, credentials.as_ref())
                    .await
            }
            _ => {
                self.transport
                    .post(&request.uri, &request.payload, credentials.as_ref())
                    .await
            }
        };

        let response = match outcome {
            Ok(raw) => {
                let response = Response::new(request, raw, timer.elapsed_ms());
                self.observe(mode, &response);
                response
            }
            Err(err) => {
                error!(error = %err, "transport call failed");
                self.tx = TxState::Idle;
                Response::from_transport_failure(request, err.to_string(), timer.elapsed_ms())
            }
        };

        if mode.closes_transaction() {
            // Idempotent close: forced even when already idle.
            self.tx = TxState::Idle;
        }

        debug!(runtime_ms = response.elapsed_ms(), "batch dispatched");
        Ok(response)
    }

    /// Dispatches the queued batch against the auto-commit endpoint.
    pub async fn run(&mut self) -> ClientResult<Response> {
        self.query(QueryMode::AutoCommit).await
    }

    /// Opens a server-side transaction with the queued batch.
    pub async fn begin(&mut self) -> ClientResult<Response> {
        self.query(QueryMode::Begin).await
    }

    /// Commits the open transaction, sending anything still queued.
    pub async fn commit(&mut self) -> ClientResult<Response> {
        self.query(QueryMode::Commit).await
    }

    /// Rolls back the open transaction.
    pub async fn rollback(&mut self) -> ClientResult<Response> {
        self.query(QueryMode::Rollback).await
    }

    fn resolve_target(&self, mode: QueryMode) -> ClientResult<String> {
        match mode {
            QueryMode::AutoCommit => Ok(self.config.commit_endpoint()),
            QueryMode::Begin => Ok(self.config.transaction_endpoint()),
            QueryMode::Commit | QueryMode::Rollback => self
                .tx
                .commit_uri()
                .map(str::to_string)
                .ok_or(ClientError::NoOpenTransaction),
        }
    }

    /// Updates transaction state from a successful transport exchange.
    fn observe(&mut self, mode: QueryMode, response: &Response) {
        let Ok(body) = response.json() else {
            // The body does not parse; the decode error stays lazy for the
            // caller. A Begin cannot be confirmed open without the commit
            // field, so it lands idle.
            if mode == QueryMode::Begin {
                self.tx = TxState::Idle;
            }
            return;
        };

        if mode == QueryMode::Begin {
            self.tx = match body.get("commit").and_then(Value::as_str) {
                Some(uri) if !uri.is_empty() => TxState::Open {
                    commit_uri: uri.to_string(),
                },
                _ => TxState::Idle,
            };
        }

        // Any server-reported error while a transaction is open drops the
        // stored commit URI, whatever the mode. Deliberately aggressive;
        // see DESIGN.md.
        let has_errors = body
            .get("errors")
            .and_then(Value::as_array)
            .is_some_and(|errors| !errors.is_empty());
        if has_errors && self.tx.is_open() {
            self.tx = TxState::Idle;
        }
    }
}
