//! Workflow status labels for expenses and requisitions.
//!
//! Each domain has its own closed code table. A `null` code means the record
//! has not been looked at yet; codes outside the table fall back to
//! `Unattended` instead of failing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Label used by status filters to mean "do not filter on status".
pub const ALL_STATUSES_LABEL: &str = "All";

/// Error returned when a status label is not part of a domain's table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown status label: {0}")]
pub struct UnknownStatus(pub String);

/// Status of an expense claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseStatus {
    Unattended,
    Pending,
    Approved,
    Rejected,
}

impl ExpenseStatus {
    pub const ALL: [ExpenseStatus; 4] = [
        ExpenseStatus::Unattended,
        ExpenseStatus::Pending,
        ExpenseStatus::Approved,
        ExpenseStatus::Rejected,
    ];

    /// Resolves a server status code.
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            None => ExpenseStatus::Unattended,
            Some(0) => ExpenseStatus::Rejected,
            Some(1) => ExpenseStatus::Approved,
            Some(2) => ExpenseStatus::Pending,
            Some(_) => ExpenseStatus::Unattended,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseStatus::Unattended => "Unattended",
            ExpenseStatus::Pending => "Pending",
            ExpenseStatus::Approved => "Approved",
            ExpenseStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Status of a purchase requisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequisitionStatus {
    Unattended,
    Pending,
    Approved,
    #[serde(rename = "Partially Approved")]
    PartiallyApproved,
    Rejected,
}

impl RequisitionStatus {
    pub const ALL: [RequisitionStatus; 5] = [
        RequisitionStatus::Unattended,
        RequisitionStatus::Pending,
        RequisitionStatus::Approved,
        RequisitionStatus::PartiallyApproved,
        RequisitionStatus::Rejected,
    ];

    /// Resolves a server status code.
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            None => RequisitionStatus::Unattended,
            Some(0) => RequisitionStatus::Rejected,
            Some(1) => RequisitionStatus::Approved,
            Some(2) => RequisitionStatus::PartiallyApproved,
            Some(3) => RequisitionStatus::Pending,
            Some(_) => RequisitionStatus::Unattended,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequisitionStatus::Unattended => "Unattended",
            RequisitionStatus::Pending => "Pending",
            RequisitionStatus::Approved => "Approved",
            RequisitionStatus::PartiallyApproved => "Partially Approved",
            RequisitionStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for RequisitionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequisitionStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Status criterion of a list filter: everything, or one exact label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter<S> {
    All,
    Only(S),
}

impl<S> Default for StatusFilter<S> {
    fn default() -> Self {
        StatusFilter::All
    }
}

impl<S: PartialEq> StatusFilter<S> {
    pub fn matches(&self, status: &S) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

impl<S: fmt::Display> fmt::Display for StatusFilter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str(ALL_STATUSES_LABEL),
            StatusFilter::Only(status) => status.fmt(f),
        }
    }
}

impl<S> FromStr for StatusFilter<S>
where
    S: FromStr<Err = UnknownStatus>,
{
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL_STATUSES_LABEL) {
            Ok(StatusFilter::All)
        } else {
            S::from_str(s).map(StatusFilter::Only)
        }
    }
}
