use async_trait::async_trait;
use reqwest::{Client, Method};
use std::time::Duration;
use tracing::debug;

use super::config::TransportOptions;
use super::error::TransportError;
use super::request::DavRequest;

/// Raw HTTP response handed back by a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// The HTTP capability the client is built on.
///
/// Implementations own connection management, TLS and timeouts. An `Err`
/// means no HTTP response was obtained; any status code, including 5xx,
/// is returned as `Ok`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(
        &self,
        request: DavRequest,
        options: &TransportOptions,
    ) -> Result<TransportResponse, TransportError>;
}

/// Default transport on top of a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }

    /// Transport with a client-wide timeout applied to every request
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(
        &self,
        request: DavRequest,
        options: &TransportOptions,
    ) -> Result<TransportResponse, TransportError> {
        let method = Method::from_bytes(request.method().as_bytes())
            .map_err(|e| TransportError::Other(format!("invalid method {}: {}", request.method(), e)))?;

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        if let Some(timeout) = options.timeout() {
            builder = builder.timeout(timeout);
        }

        debug!("Sending HTTP {} request to: {}", request.kind, request.url);
        let response = builder.send().await?;

        let status = response.status();
        debug!(
            "HTTP Response: {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("")
        );

        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(TransportResponse {
            status: status.as_u16(),
            headers,
            body,
        })
    }
}
