//! Approve/reject calls against the review endpoint.

use async_trait::async_trait;
use domain::models::{ReviewAction, ReviewRequest};
use reqwest::{header, Client};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::Endpoint;
use crate::error::ClientError;
use crate::fetcher::{expect_success, read_json, RecordFetcher};
use crate::metrics::RequestTimer;

const APPROVED_FALLBACK: &str = "Request updated";
const REJECTED_FALLBACK: &str = "Failed to update request";

/// Sends review decisions to the server.
///
/// Success means the server acknowledged the decision; the caller is then
/// free to patch its in-memory collection.
#[async_trait]
pub trait ReviewGateway: Send + Sync {
    /// Returns the server's confirmation message.
    async fn review(&self, request: &ReviewRequest) -> Result<String, ClientError>;
}

/// Review gateway backed by the remote API.
#[derive(Debug, Clone)]
pub struct HttpReviewGateway {
    client: Client,
    url: String,
}

impl HttpReviewGateway {
    pub fn new(fetcher: &RecordFetcher) -> Self {
        Self {
            client: fetcher.client().clone(),
            url: fetcher.api().url(Endpoint::Review),
        }
    }

    async fn send(&self, request: &ReviewRequest) -> Result<String, ClientError> {
        let response = self
            .client
            .post(&self.url)
            .header(header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        let payload = read_json(response).await?;
        expect_success(payload, APPROVED_FALLBACK, REJECTED_FALLBACK)
    }
}

#[async_trait]
impl ReviewGateway for HttpReviewGateway {
    async fn review(&self, request: &ReviewRequest) -> Result<String, ClientError> {
        let timer = RequestTimer::new(Endpoint::Review.label());
        let result = self.send(request).await;

        match &result {
            Ok(_) => info!(
                record_id = %request.record_id,
                action = %request.action,
                acting_user_id = request.acting_user_id,
                "Review accepted"
            ),
            Err(err) => warn!(
                record_id = %request.record_id,
                action = %request.action,
                error = %err,
                "Review failed"
            ),
        }

        timer.finish(result)
    }
}

/// Mock review gateway for testing.
#[derive(Debug, Default)]
pub struct MockReviewGateway {
    /// Whether to simulate a server-side rejection.
    pub simulate_failure: bool,
    sent: Mutex<Vec<ReviewRequest>>,
}

impl MockReviewGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::default()
        }
    }

    /// Requests received so far, in order.
    pub async fn sent(&self) -> Vec<ReviewRequest> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl ReviewGateway for MockReviewGateway {
    async fn review(&self, request: &ReviewRequest) -> Result<String, ClientError> {
        self.sent.lock().await.push(request.clone());

        if self.simulate_failure {
            tracing::warn!(record_id = %request.record_id, "Mock review rejected");
            return Err(ClientError::MutationRejected(
                "Simulated rejection".to_string(),
            ));
        }

        let outcome = match request.action {
            ReviewAction::Approve => "approved",
            ReviewAction::Reject => "rejected",
        };
        Ok(format!("Requisition {outcome} successfully"))
    }
}
