//! Response shapes of the remote API and list-payload decoding.
//!
//! Listing endpoints answer with a bare JSON array of records, or with an
//! envelope `{ status, message?, data? }`. Mutation endpoints always use the
//! envelope. Decoding fails closed: one malformed record rejects the payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Outcome flag of an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Error,
    #[serde(other)]
    Unknown,
}

/// `{ status, message?, data? }` wrapper used by the PHP endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: EnvelopeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.status == EnvelopeStatus::Success
    }

    /// Server message, or `fallback` when none was sent.
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

/// Why a list payload could not be turned into records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Record {index} is malformed: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("Response envelope is malformed: {0}")]
    MalformedEnvelope(String),

    #[error("Expected a JSON array or envelope, got {0}")]
    UnexpectedShape(&'static str),

    #[error("Envelope carried no data")]
    MissingData,

    #[error("{0}")]
    Reported(String),
}

/// Decodes a listing response into raw records.
pub fn decode_list<R: DeserializeOwned>(payload: Value) -> Result<Vec<R>, PayloadError> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(_) => {
            let envelope: ApiEnvelope<Value> = serde_json::from_value(payload)
                .map_err(|e| PayloadError::MalformedEnvelope(e.to_string()))?;

            if !envelope.is_success() {
                return Err(PayloadError::Reported(
                    envelope.message_or("Failed to fetch records"),
                ));
            }

            match envelope.data {
                Some(Value::Array(items)) => items,
                Some(other) => return Err(PayloadError::UnexpectedShape(shape_name(&other))),
                None => return Err(PayloadError::MissingData),
            }
        }
        other => return Err(PayloadError::UnexpectedShape(shape_name(&other))),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| PayloadError::MalformedRecord {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
