//! Remote request metrics.
//!
//! Records the following metrics:
//! - `remote_requests_total`: Counter with labels (endpoint, outcome)
//! - `remote_request_duration_seconds`: Histogram with labels (endpoint)
//!
//! No exporter is installed here; embedders choose their own recorder.

use metrics::{counter, histogram};
use std::time::Instant;

use crate::error::ClientError;

/// Times one remote call and records its outcome when finished.
pub struct RequestTimer {
    endpoint: &'static str,
    start: Instant,
}

impl RequestTimer {
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            endpoint,
            start: Instant::now(),
        }
    }

    /// Records duration and outcome, passing the result through.
    pub fn finish<T>(self, result: Result<T, ClientError>) -> Result<T, ClientError> {
        let outcome = match &result {
            Ok(_) => "success",
            Err(err) => outcome_label(err),
        };
        record_request(self.endpoint, outcome, self.start.elapsed().as_secs_f64());
        result
    }
}

/// Record one remote request.
pub fn record_request(endpoint: &'static str, outcome: &'static str, duration_secs: f64) {
    counter!(
        "remote_requests_total",
        "endpoint" => endpoint,
        "outcome" => outcome
    )
    .increment(1);

    histogram!(
        "remote_request_duration_seconds",
        "endpoint" => endpoint
    )
    .record(duration_secs);
}

/// Convert an error to its metric label.
fn outcome_label(err: &ClientError) -> &'static str {
    match err {
        ClientError::Network(_) => "network_error",
        ClientError::UnexpectedContentType { .. } => "unexpected_content_type",
        ClientError::Http { .. } => "http_error",
        ClientError::Validation(_) => "validation_error",
        ClientError::MutationRejected(_) | ClientError::NotAwaitingReview { .. } => "rejected",
        ClientError::Remote(_) => "remote_error",
        ClientError::Decode(_) => "decode_error",
        ClientError::MissingUser | ClientError::Session(_) => "session_error",
        ClientError::Attachment { .. } => "attachment_error",
    }
}
