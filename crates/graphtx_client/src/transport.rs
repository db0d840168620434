//! Transport layer abstraction.

use crate::config::Credentials;
use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use graphtx_protocol::{QueryPayload, RawResponse};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;

/// An HTTP transport carries one request to the server and returns the raw
/// result.
///
/// This trait abstracts the network layer, allowing different
/// implementations (reqwest, a mock for testing, an in-process server).
/// A transport performs exactly one attempt per call; retry policy is not
/// its concern.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends the payload as a JSON POST.
    async fn post(
        &self,
        uri: &str,
        payload: &QueryPayload,
        credentials: Option<&Credentials>,
    ) -> ClientResult<RawResponse>;

    /// Sends a DELETE (used to roll back an open transaction).
    async fn delete(&self, uri: &str, credentials: Option<&Credentials>)
        -> ClientResult<RawResponse>;
}

/// HTTP verb of a recorded mock call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// POST with a JSON body.
    Post,
    /// DELETE with no body.
    Delete,
}

/// One call observed by the [`MockTransport`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// Verb used.
    pub verb: Verb,
    /// Target URI.
    pub uri: String,
    /// Payload as JSON, present for POST calls.
    pub payload: Option<Value>,
    /// Whether credentials were supplied.
    pub authenticated: bool,
}

/// A scripted outcome for one mock call.
#[derive(Debug, Clone)]
pub enum ScriptedOutcome {
    /// Reply with this raw response.
    Reply(RawResponse),
    /// Fail with a transport error carrying this message.
    Fail(String),
}

/// A mock transport for testing.
///
/// Outcomes are scripted first-in-first-out with
/// [`enqueue`](MockTransport::enqueue); when the script runs out, calls
/// succeed with status 200 and an empty JSON object. Every call is
/// recorded for later inspection.
#[derive(Debug, Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<ScriptedOutcome>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    /// Creates a mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the next outcome.
    pub fn enqueue(&self, outcome: ScriptedOutcome) {
        self.script.lock().push_back(outcome);
    }

    /// Queues a successful reply.
    pub fn enqueue_reply(&self, status: u16, body: impl Into<String>) {
        self.enqueue(ScriptedOutcome::Reply(RawResponse::new(status, body)));
    }

    /// Queues a transport failure.
    pub fn enqueue_failure(&self, message: impl Into<String>) {
        self.enqueue(ScriptedOutcome::Fail(message.into()));
    }

    /// Calls observed so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Number of calls observed.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn dispatch(&self, call: RecordedCall) -> ClientResult<RawResponse> {
        self.calls.lock().push(call);
        match self.script.lock().pop_front() {
            Some(ScriptedOutcome::Reply(raw)) => Ok(raw),
            Some(ScriptedOutcome::Fail(message)) => Err(ClientError::transport(message)),
            None => Ok(RawResponse::new(200, "{}")),
        }
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn post(
        &self,
        uri: &str,
        payload: &QueryPayload,
        credentials: Option<&Credentials>,
    ) -> ClientResult<RawResponse> {
        let payload = serde_json::to_value(payload)
            .map_err(|e| ClientError::transport(format!("unserializable payload: {e}")))?;
        self.dispatch(RecordedCall {
            verb: Verb::Post,
            uri: uri.to_string(),
            payload: Some(payload),
            authenticated: credentials.is_some(),
        })
    }

    async fn delete(
        &self,
        uri: &str,
        credentials: Option<&Credentials>,
    ) -> ClientResult<RawResponse> {
        self.dispatch(RecordedCall {
            verb: Verb::Delete,
            uri: uri.to_string(),
            payload: None,
            authenticated: credentials.is_some(),
        })
    }
}
