//! Purchase requisition records.
//!
//! The same schema serves the requisition listing and the management
//! listing; the latter names the submitter `user_name` and may omit the
//! type, date and amount.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::de;
use super::record::{Detail, ListRecord, Reviewable};
use super::review::ReviewAction;
use super::status::RequisitionStatus;
use crate::services::transform::IntoView;

pub const NO_COMMENTS_LABEL: &str = "No comments";
pub const UNKNOWN_EMPLOYEE_LABEL: &str = "Unknown employee";

/// Requisition as returned by the requisition endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRequisition {
    #[serde(deserialize_with = "de::id_string")]
    pub requisition_id: String,

    #[serde(default, deserialize_with = "de::optional_text")]
    pub requisition_title: Option<String>,

    #[serde(default, deserialize_with = "de::optional_code")]
    pub requisition_type: Option<i64>,

    #[serde(default, deserialize_with = "de::optional_text")]
    pub requisition_date: Option<String>,

    #[serde(default, deserialize_with = "de::optional_text")]
    pub requisition_comment: Option<String>,

    #[serde(default, deserialize_with = "de::optional_code")]
    pub requisition_status: Option<i64>,

    #[serde(default, deserialize_with = "de::optional_amount")]
    pub requisition_amount: Option<f64>,

    #[serde(default, deserialize_with = "de::optional_code")]
    pub requisition_created_by: Option<i64>,

    #[serde(default, deserialize_with = "de::optional_text")]
    pub requisition_created_at: Option<String>,

    #[serde(default, deserialize_with = "de::optional_text")]
    pub requisition_updated_at: Option<String>,

    #[serde(default, alias = "user_name", deserialize_with = "de::optional_text")]
    pub created_by_full_name: Option<String>,
}

/// Requisition category resolved from the server's type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RequisitionType {
    #[serde(rename = "Office Supplies")]
    OfficeSupplies,
    #[serde(rename = "Travel Request")]
    TravelRequest,
    #[serde(rename = "Equipment Purchase")]
    EquipmentPurchase,
    Other,
}

impl RequisitionType {
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(0) => RequisitionType::OfficeSupplies,
            Some(1) => RequisitionType::TravelRequest,
            Some(2) => RequisitionType::EquipmentPurchase,
            _ => RequisitionType::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequisitionType::OfficeSupplies => "Office Supplies",
            RequisitionType::TravelRequest => "Travel Request",
            RequisitionType::EquipmentPurchase => "Equipment Purchase",
            RequisitionType::Other => "Other",
        }
    }
}

impl fmt::Display for RequisitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display-ready requisition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Requisition {
    pub id: String,
    pub employee: String,
    pub title: String,
    pub requisition_type: RequisitionType,
    pub amount: f64,
    pub date: Option<NaiveDate>,
    pub display_date: String,
    pub status: RequisitionStatus,
    pub comment: Detail,
}

impl IntoView for RawRequisition {
    type View = Requisition;

    fn into_view(self) -> Requisition {
        let date = self
            .requisition_date
            .as_deref()
            .and_then(shared::dates::parse_timestamp)
            .or_else(|| {
                self.requisition_created_at
                    .as_deref()
                    .and_then(shared::dates::parse_timestamp)
            });

        Requisition {
            id: self.requisition_id,
            employee: self
                .created_by_full_name
                .unwrap_or_else(|| UNKNOWN_EMPLOYEE_LABEL.to_string()),
            title: self.requisition_title.unwrap_or_default(),
            requisition_type: RequisitionType::from_code(self.requisition_type),
            amount: self.requisition_amount.unwrap_or(0.0),
            date,
            display_date: shared::dates::display_or_missing(date),
            status: RequisitionStatus::from_code(self.requisition_status),
            comment: Detail::from_optional(self.requisition_comment, NO_COMMENTS_LABEL),
        }
    }
}

impl ListRecord for Requisition {
    type Status = RequisitionStatus;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> RequisitionStatus {
        self.status
    }

    fn set_status(&mut self, status: RequisitionStatus) {
        self.status = status;
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.employee.as_str(), self.title.as_str()];
        if let Some(comment) = self.comment.provided() {
            fields.push(comment);
        }
        fields
    }

    fn record_date(&self) -> Option<NaiveDate> {
        self.date
    }
}

impl Reviewable for Requisition {
    fn status_after(action: ReviewAction) -> RequisitionStatus {
        match action {
            ReviewAction::Approve => RequisitionStatus::Approved,
            ReviewAction::Reject => RequisitionStatus::Rejected,
        }
    }

    fn is_awaiting_review(&self) -> bool {
        self.status == RequisitionStatus::Unattended
    }
}
