//! Statements and the client-side batch they accumulate in.

use serde::Serialize;
use serde_json::{Map, Value};

/// One unit of query text plus optional parameters.
///
/// Immutable once appended to a batch. Serializes in the shape the
/// transactional endpoint expects: `parameters` is omitted entirely when
/// absent, and `includeStats` is omitted unless requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    /// Query text. Opaque to this layer; no validation is performed.
    #[serde(rename = "statement")]
    pub text: String,
    /// Named query parameters, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
    /// Whether the server should include update statistics in its reply.
    #[serde(rename = "includeStats", skip_serializing_if = "std::ops::Not::not")]
    pub include_stats: bool,
}

impl Statement {
    /// Creates a new statement.
    pub fn new(
        text: impl Into<String>,
        parameters: Option<Map<String, Value>>,
        include_stats: bool,
    ) -> Self {
        Self {
            text: text.into(),
            parameters,
            include_stats,
        }
    }
}

/// The ordered set of statements accumulated before a single round trip.
///
/// Statements execute server-side in submission order, so append order is
/// significant and preserved through [`drain`](StatementBatch::drain).
#[derive(Debug, Default)]
pub struct StatementBatch {
    statements: Vec<Statement>,
}

impl StatementBatch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a statement and returns `self` for chaining.
    pub fn add(
        &mut self,
        text: impl Into<String>,
        parameters: Option<Map<String, Value>>,
        include_stats: bool,
    ) -> &mut Self {
        self.statements
            .push(Statement::new(text, parameters, include_stats));
        self
    }

    /// Takes every queued statement, leaving the batch empty.
    ///
    /// The swap is a single move: no statement can be observed twice or
    /// lost between the read and the reset.
    pub fn drain(&mut self) -> Vec<Statement> {
        std::mem::take(&mut self.statements)
    }

    /// Number of queued statements.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Returns true if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
