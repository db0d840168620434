//! Response wrapper with lazy, memoized body parsing.

use crate::error::ProtocolResult;
use crate::request::Request;
use serde_json::{json, Map, Value};
use std::sync::OnceLock;

/// Status code used when a response is synthesized for a transport failure.
pub const TRANSPORT_FAILURE_STATUS: u16 = 500;

/// Error code placed in synthesized error entries for transport failures.
pub const TRANSPORT_FAILURE_CODE: &str = "Client.TransportError";

const EMPTY: &[Value] = &[];

/// What a transport yields for one HTTP exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body text, possibly empty.
    pub body: String,
}

impl RawResponse {
    /// Creates a raw response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// A server reply (or a synthesized stand-in for one), immutable after
/// construction.
///
/// The body is parsed lazily on first access and the parsed value is
/// cached, so repeated reads never re-parse. A `Response` always wraps a
/// populated raw result; there is no "not yet populated" state.
#[derive(Debug)]
pub struct Response {
    request: Request,
    raw: RawResponse,
    parsed: OnceLock<Value>,
    elapsed_ms: f64,
}

impl Response {
    /// Wraps a raw transport result.
    pub fn new(request: Request, raw: RawResponse, elapsed_ms: f64) -> Self {
        Self {
            request,
            raw,
            parsed: OnceLock::new(),
            elapsed_ms,
        }
    }

    /// Synthesizes a response for a failed transport call.
    ///
    /// This is the one place a transport failure is converted into the
    /// response shape: status 500 and a single entry in `errors` carrying
    /// the failure description.
    pub fn from_transport_failure(
        request: Request,
        message: impl Into<String>,
        elapsed_ms: f64,
    ) -> Self {
        let body = json!({
            "results": [],
            "errors": [{
                "code": TRANSPORT_FAILURE_CODE,
                "message": message.into(),
            }],
        });
        Self::new(
            request,
            RawResponse::new(TRANSPORT_FAILURE_STATUS, body.to_string()),
            elapsed_ms,
        )
    }

    /// HTTP status code of the wrapped result.
    pub fn status(&self) -> u16 {
        self.raw.status
    }

    /// Raw body text as received.
    pub fn body(&self) -> &str {
        &self.raw.body
    }

    /// The request record this response answers.
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Elapsed wall-clock time for the exchange, in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Parses the body as JSON, caching the result on first success.
    ///
    /// An empty or whitespace-only body parses to an empty object. A
    /// non-empty body that is not valid JSON fails with
    /// `ProtocolError::MalformedResponse` on every access; failures are
    /// never cached.
    pub fn json(&self) -> ProtocolResult<&Value> {
        if let Some(parsed) = self.parsed.get() {
            return Ok(parsed);
        }
        let value = if self.raw.body.trim().is_empty() {
            Value::Object(Map::new())
        } else {
            serde_json::from_str(&self.raw.body)?
        };
        Ok(self.parsed.get_or_init(|| value))
    }

    /// The `results` array of the body, or an empty slice when absent.
    pub fn results(&self) -> ProtocolResult<&[Value]> {
        Ok(match self.json()?.get("results") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => EMPTY,
        })
    }

    /// The `errors` array of the body, or an empty slice when absent.
    ///
    /// An absent key and an explicit empty list both read as "no errors".
    pub fn errors(&self) -> ProtocolResult<&[Value]> {
        Ok(match self.json()?.get("errors") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => EMPTY,
        })
    }
}
