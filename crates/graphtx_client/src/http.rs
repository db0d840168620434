//! HTTP transport implementation backed by reqwest.

use crate::config::Credentials;
use crate::error::{ClientError, ClientResult};
use crate::transport::HttpTransport;
use async_trait::async_trait;
use graphtx_protocol::{QueryPayload, RawResponse};

/// Production transport over [`reqwest`].
///
/// One underlying client is reused across calls; connection handling and
/// timeouts are reqwest's concern and can be tuned through
/// [`ReqwestTransport::with_client`]. Every reqwest failure maps to
/// `ClientError::Transport`.
#[derive(Debug, Default, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with a default reqwest client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport around a pre-configured reqwest client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn apply_auth(
        builder: reqwest::RequestBuilder,
        credentials: Option<&Credentials>,
    ) -> reqwest::RequestBuilder {
        match credentials {
            Some(creds) => builder.basic_auth(&creds.username, Some(&creds.password)),
            None => builder,
        }
    }

    async fn finish(builder: reqwest::RequestBuilder) -> ClientResult<RawResponse> {
        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::transport(e.to_string()))?;
        Ok(RawResponse::new(status, body))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(
        &self,
        uri: &str,
        payload: &QueryPayload,
        credentials: Option<&Credentials>,
    ) -> ClientResult<RawResponse> {
        // .json() sets Content-Type: application/json.
        let builder = Self::apply_auth(self.client.post(uri).json(payload), credentials);
        Self::finish(builder).await
    }

    async fn delete(
        &self,
        uri: &str,
        credentials: Option<&Credentials>,
    ) -> ClientResult<RawResponse> {
        let builder = Self::apply_auth(self.client.delete(uri), credentials);
        Self::finish(builder).await
    }
}
