use std::time::Duration;

use engine_logging::{engine_debug, engine_warn};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::{FailureKind, FetchError, MetadataBody, MetadataResponse};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Bodies larger than this are not parsed.
    pub max_body_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            // Extraction on the backend can take a while for long videos.
            request_timeout: Duration::from_secs(120),
            max_body_bytes: 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait MetadataClient: Send + Sync {
    /// Posts `source_url` to `endpoint`. Any HTTP answer is `Ok`; only a
    /// request that never got a response is `Err`.
    async fn fetch_metadata(
        &self,
        endpoint: &str,
        source_url: &str,
    ) -> Result<MetadataResponse, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestMetadataClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestMetadataClient {
    pub fn new(settings: ClientSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }
}

#[async_trait::async_trait]
impl MetadataClient for ReqwestMetadataClient {
    async fn fetch_metadata(
        &self,
        endpoint: &str,
        source_url: &str,
    ) -> Result<MetadataResponse, FetchError> {
        let endpoint = reqwest::Url::parse(endpoint)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let payload = serde_json::json!({ "url": source_url }).to_string();

        engine_debug!("POST {} url_len={}", endpoint, source_url.len());
        let response = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let bytes = match read_capped(response, self.settings.max_body_bytes).await {
            Ok(bytes) => bytes,
            Err(err @ FetchError {
                kind: FailureKind::TooLarge { .. },
                ..
            }) => {
                engine_warn!("Metadata response discarded: {}", err);
                return Ok(MetadataResponse {
                    status,
                    body: Err(err.to_string()),
                });
            }
            Err(err) => return Err(err),
        };

        let body = serde_json::from_slice::<MetadataBody>(&bytes).map_err(|err| err.to_string());
        match &body {
            Ok(parsed) if !parsed.success => {
                engine_warn!(
                    "Metadata endpoint reported failure status={} error={:?} details={:?}",
                    status,
                    parsed.error,
                    parsed.details
                );
            }
            Ok(_) => engine_debug!("Metadata endpoint answered status={}", status),
            Err(reason) => {
                engine_warn!("Unreadable metadata response status={}: {}", status, reason)
            }
        }

        Ok(MetadataResponse { status, body })
    }
}

async fn read_capped(response: reqwest::Response, max_bytes: u64) -> Result<Vec<u8>, FetchError> {
    if let Some(content_len) = response.content_length() {
        if content_len > max_bytes {
            return Err(FetchError::new(
                FailureKind::TooLarge {
                    max_bytes,
                    actual: Some(content_len),
                },
                "response too large",
            ));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(map_reqwest_error)?;
        let next_len = bytes.len() as u64 + chunk.len() as u64;
        if next_len > max_bytes {
            return Err(FetchError::new(
                FailureKind::TooLarge {
                    max_bytes,
                    actual: Some(next_len),
                },
                "response too large",
            ));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return FetchError::new(FailureKind::InvalidUrl, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
