//! Approve/reject requests sent by managers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Decision a manager takes on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAction {
    Approve,
    Reject,
}

impl ReviewAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewAction::Approve => "approve",
            ReviewAction::Reject => "reject",
        }
    }
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON body of an approve/reject call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub record_id: String,
    pub action: ReviewAction,
    pub acting_user_id: i64,
}

impl ReviewRequest {
    pub fn new(record_id: impl Into<String>, action: ReviewAction, acting_user_id: i64) -> Self {
        Self {
            record_id: record_id.into(),
            action,
            acting_user_id,
        }
    }
}
