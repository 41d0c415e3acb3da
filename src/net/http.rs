//! HTTP client abstraction so the services can be driven by in-memory fakes.

use std::time::Duration;

use anyhow::Context;

use crate::foundation::error::ShopkeeperResult;

/// Status and body of a completed GET request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// `200` with `body`.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Empty body with the given status.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
        }
    }

    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Async HTTP GET.
///
/// Transport failures (DNS, TLS, connection reset) are errors; any response
/// that arrives, whatever its status, is returned as an [`HttpResponse`].
pub trait HttpClient: Send + Sync {
    /// Fetch `url` and return whatever response arrives.
    fn get(&self, url: &str) -> impl Future<Output = ShopkeeperResult<HttpResponse>> + Send;
}

/// Real HTTP client backed by `reqwest`.
#[derive(Clone, Debug)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Client with no request timeout; a stalled server stalls the flow.
    pub fn new() -> ShopkeeperResult<Self> {
        Self::with_timeout(None)
    }

    /// Client giving up on any request after `timeout`, if set.
    pub fn with_timeout(timeout: Option<Duration>) -> ShopkeeperResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("build http client")?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> ShopkeeperResult<HttpResponse> {
        tracing::debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("request {url}"))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .with_context(|| format!("read response body from {url}"))?;
        tracing::debug!(url, status, len = body.len(), "response");
        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}
