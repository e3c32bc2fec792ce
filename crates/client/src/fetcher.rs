//! HTTP access to the listing endpoints.
//!
//! A response is accepted only when the status is 2xx, the content type is
//! JSON and the payload decodes into records. Each check maps to its own
//! [`ClientError`] variant; nothing is retried here.

use domain::models::{decode_list, ApiEnvelope};
use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{ApiConfig, Endpoint};
use crate::error::ClientError;
use crate::metrics::RequestTimer;

const JSON_MIME: &str = "application/json";

/// Fetches raw records from the remote API.
#[derive(Debug, Clone)]
pub struct RecordFetcher {
    client: Client,
    api: ApiConfig,
}

impl RecordFetcher {
    /// Creates a fetcher with its own HTTP client honoring the configured timeout.
    pub fn new(api: ApiConfig) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(api.request_timeout()).build()?;
        Ok(Self { client, api })
    }

    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Fetches and decodes every record of a listing endpoint.
    pub async fn fetch<R: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<Vec<R>, ClientError> {
        let timer = RequestTimer::new(endpoint.label());
        let result = self.fetch_records(endpoint).await;

        if let Err(err) = &result {
            warn!(endpoint = endpoint.label(), error = %err, "Fetch failed");
        }

        timer.finish(result)
    }

    async fn fetch_records<R: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
    ) -> Result<Vec<R>, ClientError> {
        let url = self.api.url(endpoint);
        debug!(endpoint = endpoint.label(), url = %url, "Fetching records");

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, JSON_MIME)
            .send()
            .await?;

        let payload = read_json(response).await?;
        let records: Vec<R> = decode_list(payload)?;

        info!(
            endpoint = endpoint.label(),
            count = records.len(),
            "Fetched records"
        );
        Ok(records)
    }
}

/// Reads a JSON body, classifying HTTP and content-type failures.
pub(crate) async fn read_json(response: Response) -> Result<Value, ClientError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Http {
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let body = response.text().await?;

    if !content_type.to_ascii_lowercase().contains(JSON_MIME) {
        return Err(ClientError::unexpected_content_type(&content_type, &body));
    }

    serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Interprets a mutation response envelope.
///
/// Returns the server's message on success; any other status becomes
/// [`ClientError::MutationRejected`].
pub(crate) fn expect_success(
    payload: Value,
    success_fallback: &str,
    failure_fallback: &str,
) -> Result<String, ClientError> {
    let envelope: ApiEnvelope<Value> =
        serde_json::from_value(payload).map_err(|e| ClientError::Decode(e.to_string()))?;

    if envelope.is_success() {
        Ok(envelope.message_or(success_fallback))
    } else {
        Err(ClientError::MutationRejected(
            envelope.message_or(failure_fallback),
        ))
    }
}
