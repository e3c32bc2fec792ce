//! Common behavior of display-ready list records.

use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use super::review::ReviewAction;

/// A view record that list screens can search, filter, page and patch.
pub trait ListRecord: Clone + fmt::Debug + Send + Sync + 'static {
    /// Domain-specific status label type.
    type Status: Copy + Eq + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// Stable record identifier.
    fn id(&self) -> &str;

    fn status(&self) -> Self::Status;

    fn set_status(&mut self, status: Self::Status);

    /// Fields matched by the free-text query. Absent optional fields are
    /// left out rather than represented by their placeholder text.
    fn search_fields(&self) -> Vec<&str>;

    /// Calendar date used by date-range filters, if the record has one.
    fn record_date(&self) -> Option<NaiveDate>;
}

/// A list record that managers can approve or reject.
pub trait Reviewable: ListRecord {
    /// Terminal status a record takes once `action` succeeds.
    fn status_after(action: ReviewAction) -> Self::Status;

    /// Whether the record still waits for a decision.
    fn is_awaiting_review(&self) -> bool;
}

/// Optional display text that renders a fixed placeholder when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detail {
    Provided(String),
    Missing(&'static str),
}

impl Detail {
    /// Wraps an optional server value; blank text counts as absent.
    pub fn from_optional(value: Option<String>, placeholder: &'static str) -> Self {
        match value {
            Some(text) if !text.trim().is_empty() => Detail::Provided(text),
            _ => Detail::Missing(placeholder),
        }
    }

    /// The server-provided text, if any.
    pub fn provided(&self) -> Option<&str> {
        match self {
            Detail::Provided(text) => Some(text),
            Detail::Missing(_) => None,
        }
    }

    /// Text to display: the provided value or the placeholder.
    pub fn as_str(&self) -> &str {
        match self {
            Detail::Provided(text) => text,
            Detail::Missing(placeholder) => placeholder,
        }
    }

    pub fn is_provided(&self) -> bool {
        matches!(self, Detail::Provided(_))
    }
}

impl fmt::Display for Detail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Detail {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
