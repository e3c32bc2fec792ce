//! Error taxonomy of the client.
//!
//! Every failure at the remote boundary is classified here and turned into
//! user-visible state by the caller; none of them is fatal to the process.

use domain::models::PayloadError;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Number of characters of a non-JSON body kept for diagnostics.
pub const PREVIEW_CHARS: usize = 50;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Expected JSON but received {content_type}: {preview}")]
    UnexpectedContentType {
        content_type: String,
        preview: String,
    },

    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Request rejected: {0}")]
    MutationRejected(String),

    #[error("Server error: {0}")]
    Remote(String),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Record {id} is not awaiting review")]
    NotAwaitingReview { id: String },

    #[error("No signed-in user; log in first")]
    MissingUser,

    #[error("Session store error: {0}")]
    Session(String),

    #[error("Cannot read attachment {path}: {reason}")]
    Attachment { path: String, reason: String },
}

impl ClientError {
    /// Whether an explicit retry action can be expected to help.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ClientError::Network(_)
                | ClientError::Http { .. }
                | ClientError::UnexpectedContentType { .. }
                | ClientError::Remote(_)
                | ClientError::Decode(_)
        )
    }

    pub fn unexpected_content_type(content_type: &str, body: &str) -> Self {
        ClientError::UnexpectedContentType {
            content_type: if content_type.is_empty() {
                "no content type".to_string()
            } else {
                content_type.to_string()
            },
            preview: preview(body),
        }
    }
}

/// First [`PREVIEW_CHARS`] characters of `body`.
pub fn preview(body: &str) -> String {
    body.chars().take(PREVIEW_CHARS).collect()
}

impl From<PayloadError> for ClientError {
    fn from(err: PayloadError) -> Self {
        match err {
            PayloadError::Reported(message) => ClientError::Remote(message),
            other => ClientError::Decode(other.to_string()),
        }
    }
}

impl From<ValidationErrors> for ClientError {
    fn from(errors: ValidationErrors) -> Self {
        let mut details = Vec::new();
        collect_messages("", &errors, &mut details);
        details.sort();

        let message = if details.len() == 1 {
            details.remove(0)
        } else {
            format!("{} validation errors: {}", details.len(), details.join("; "))
        };

        ClientError::Validation(message)
    }
}

fn collect_messages(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for e in field_errors {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{path} is invalid ({})", e.code));
                    if prefix.is_empty() {
                        out.push(message);
                    } else {
                        out.push(format!("{path}: {message}"));
                    }
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_messages(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_messages(&format!("{path}[{index}]"), inner, out);
                }
            }
        }
    }
}
