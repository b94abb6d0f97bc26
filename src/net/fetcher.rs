//! HTTP fetcher backed by reqwest.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::models::{ResourceRequest, ResponseSnapshot};

use super::FetchError;

/// HTTP request timeout in seconds.
/// A hung fetch surfaces as a network failure and enters the normal
/// fallback chain instead of blocking the request forever.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// The network fetch primitive.
///
/// Resolves to a snapshot for any received response, even a non-2xx one;
/// fails only when the request itself could not complete.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: &ResourceRequest) -> Result<ResponseSnapshot, FetchError>;
}

/// Fetcher backed by a shared reqwest client.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &ResourceRequest) -> Result<ResponseSnapshot, FetchError> {
        let response = self
            .client
            .request(request.method.clone(), request.url.clone())
            .send()
            .await?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        debug!(url = %request.url, status, bytes = body.len(), "fetched");
        Ok(ResponseSnapshot::new(status, headers, body))
    }
}
