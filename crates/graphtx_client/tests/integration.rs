//! End-to-end tests: the client driven against an in-process server that
//! speaks the transactional endpoint contract.

use async_trait::async_trait;
use graphtx_client::{
    ClientConfig, ClientError, ClientResult, Credentials, HttpTransport, QueryMode, QueryPayload,
    RawResponse, TransactionClient,
};
use parking_lot::Mutex;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// An in-process stand-in for the transactional HTTP endpoint.
///
/// Opens transactions with incrementing ids, accepts statement batches,
/// and closes transactions on commit (POST) or rollback (DELETE) of the
/// commit URI it handed out.
#[derive(Default)]
struct InMemoryGraphServer {
    next_tx: Mutex<u64>,
    open: Mutex<HashSet<u64>>,
    statements_seen: Mutex<Vec<String>>,
}

impl InMemoryGraphServer {
    fn base(&self) -> &'static str {
        "http://127.0.0.1:7474/db/data/transaction"
    }

    fn commit_uri(&self, tx: u64) -> String {
        format!("{}/{}/commit", self.base(), tx)
    }

    fn tx_of(&self, uri: &str) -> Option<u64> {
        uri.strip_prefix(self.base())?
            .strip_prefix('/')?
            .strip_suffix("/commit")?
            .parse()
            .ok()
    }

    fn record(&self, payload: &QueryPayload) {
        let mut seen = self.statements_seen.lock();
        for statement in &payload.statements {
            seen.push(statement.text.clone());
        }
    }

    fn results_for(&self, payload: &QueryPayload) -> serde_json::Value {
        json!(payload
            .statements
            .iter()
            .map(|s| json!({"columns": [], "data": [], "statement": s.text}))
            .collect::<Vec<_>>())
    }
}

struct LoopbackTransport {
    server: Arc<InMemoryGraphServer>,
}

#[async_trait]
impl HttpTransport for LoopbackTransport {
    async fn post(
        &self,
        uri: &str,
        payload: &QueryPayload,
        _credentials: Option<&Credentials>,
    ) -> ClientResult<RawResponse> {
        let server = &self.server;
        server.record(payload);

        if uri == format!("{}/commit", server.base()) {
            // Auto-commit.
            let body = json!({"results": server.results_for(payload), "errors": []});
            return Ok(RawResponse::new(200, body.to_string()));
        }

        if uri == server.base() {
            // Open a new transaction.
            let tx = {
                let mut next = server.next_tx.lock();
                *next += 1;
                *next
            };
            server.open.lock().insert(tx);
            let body = json!({
                "commit": server.commit_uri(tx),
                "results": server.results_for(payload),
                "errors": [],
            });
            return Ok(RawResponse::new(201, body.to_string()));
        }

        if let Some(tx) = server.tx_of(uri) {
            // Add-and-commit on an open transaction.
            if server.open.lock().remove(&tx) {
                let body = json!({"results": server.results_for(payload), "errors": []});
                return Ok(RawResponse::new(200, body.to_string()));
            }
            let body = json!({
                "results": [],
                "errors": [{"code": "Transaction.UnknownId", "message": "no such transaction"}],
            });
            return Ok(RawResponse::new(404, body.to_string()));
        }

        Err(ClientError::transport(format!("unroutable uri: {uri}")))
    }

    async fn delete(
        &self,
        uri: &str,
        _credentials: Option<&Credentials>,
    ) -> ClientResult<RawResponse> {
        let server = &self.server;
        if let Some(tx) = server.tx_of(uri) {
            if server.open.lock().remove(&tx) {
                return Ok(RawResponse::new(200, r#"{"results":[],"errors":[]}"#));
            }
        }
        Ok(RawResponse::new(
            404,
            r#"{"results":[],"errors":[{"code":"Transaction.UnknownId","message":"no such transaction"}]}"#,
        ))
    }
}

fn connect(server: &Arc<InMemoryGraphServer>) -> TransactionClient<LoopbackTransport> {
    TransactionClient::new(
        ClientConfig::default(),
        LoopbackTransport {
            server: Arc::clone(server),
        },
    )
}

#[tokio::test]
async fn auto_commit_round_trip() {
    init_tracing();
    let server = Arc::new(InMemoryGraphServer::default());
    let mut client = connect(&server);

    client
        .statement("CREATE (a:Person {name: $name})", None, false)
        .statement("MATCH (n) RETURN count(n)", None, false);
    let response = client.run().await.unwrap();

    assert_eq!(response.status(), 200);
    assert!(response.errors().unwrap().is_empty());
    assert_eq!(response.results().unwrap().len(), 2);
    assert!(!client.is_open());
    assert_eq!(
        *server.statements_seen.lock(),
        vec![
            "CREATE (a:Person {name: $name})".to_string(),
            "MATCH (n) RETURN count(n)".to_string(),
        ]
    );
}

#[tokio::test]
async fn begin_then_commit_closes_the_server_transaction() {
    init_tracing();
    let server = Arc::new(InMemoryGraphServer::default());
    let mut client = connect(&server);

    client.statement("CREATE (n:A)", None, false);
    let response = client.begin().await.unwrap();
    assert_eq!(response.status(), 201);
    assert!(client.is_open());
    assert_eq!(server.open.lock().len(), 1);

    client.statement("CREATE (n:B)", None, false);
    let response = client.commit().await.unwrap();
    assert_eq!(response.status(), 200);
    assert!(!client.is_open());
    assert!(server.open.lock().is_empty());
}

#[tokio::test]
async fn begin_then_rollback_deletes_the_server_transaction() {
    init_tracing();
    let server = Arc::new(InMemoryGraphServer::default());
    let mut client = connect(&server);

    client.statement("CREATE (n)", None, false);
    client.begin().await.unwrap();
    assert!(client.is_open());

    let response = client.rollback().await.unwrap();
    assert_eq!(response.status(), 200);
    assert!(!client.is_open());
    assert!(server.open.lock().is_empty());

    // A second rollback has nothing to close.
    let err = client.rollback().await.unwrap_err();
    assert!(matches!(err, ClientError::NoOpenTransaction));
}

#[tokio::test]
async fn committing_a_stale_transaction_surfaces_server_errors_as_data() {
    init_tracing();
    let server = Arc::new(InMemoryGraphServer::default());
    let mut client = connect(&server);

    client.begin().await.unwrap();
    let uri = client.commit_uri().unwrap().to_string();

    // Another actor closes the transaction out from under the client.
    let tx = server.tx_of(&uri).unwrap();
    server.open.lock().remove(&tx);

    let response = client.commit().await.unwrap();
    assert_eq!(response.status(), 404);
    assert_eq!(response.errors().unwrap().len(), 1);
    // The client is idle regardless of the server's answer.
    assert!(!client.is_open());
}

#[tokio::test]
async fn interleaved_sessions_use_distinct_transactions() {
    init_tracing();
    let server = Arc::new(InMemoryGraphServer::default());
    let mut first = connect(&server);
    let mut second = connect(&server);

    first.begin().await.unwrap();
    second.begin().await.unwrap();
    assert_ne!(first.commit_uri(), second.commit_uri());
    assert_eq!(server.open.lock().len(), 2);

    first.commit().await.unwrap();
    second.query(QueryMode::Rollback).await.unwrap();
    assert!(server.open.lock().is_empty());
}
