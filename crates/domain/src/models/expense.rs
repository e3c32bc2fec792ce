//! Expense claim records.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::de;
use super::record::{Detail, ListRecord, Reviewable};
use super::review::ReviewAction;
use super::status::ExpenseStatus;
use crate::services::transform::IntoView;

pub const NOT_SUBMITTED_LABEL: &str = "Not submitted yet";
pub const NOT_PROCESSED_LABEL: &str = "Not processed yet";
pub const NO_REMARKS_LABEL: &str = "No remarks";
pub const UNKNOWN_EMPLOYEE_LABEL: &str = "Unknown employee";

/// Expense claim as returned by the expense listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RawExpense {
    #[serde(deserialize_with = "de::id_string")]
    pub expense_track_id: String,

    #[serde(default, deserialize_with = "de::optional_text")]
    pub expense_track_title: Option<String>,

    #[serde(default, deserialize_with = "de::optional_code")]
    pub expense_type_id: Option<i64>,

    #[serde(deserialize_with = "de::amount")]
    pub expense_total_amount: f64,

    #[serde(default, deserialize_with = "de::optional_code")]
    pub expense_track_status: Option<i64>,

    #[serde(default, deserialize_with = "de::optional_text")]
    pub expense_track_app_rej_remarks: Option<String>,

    #[serde(default, deserialize_with = "de::optional_text")]
    pub expense_track_created_at: Option<String>,

    #[serde(default, deserialize_with = "de::optional_code")]
    pub expense_track_created_by: Option<i64>,

    #[serde(default, deserialize_with = "de::optional_code")]
    pub expense_track_submitted_to: Option<i64>,

    #[serde(default, deserialize_with = "de::optional_code")]
    pub expense_track_approved_rejected_by: Option<i64>,

    #[serde(default, deserialize_with = "de::optional_text")]
    pub expense_track_approved_rejected_at: Option<String>,

    #[serde(default, deserialize_with = "de::optional_text")]
    pub created_by_full_name: Option<String>,

    #[serde(default, deserialize_with = "de::optional_text")]
    pub submitted_to_full_name: Option<String>,

    #[serde(default, deserialize_with = "de::optional_text")]
    pub approved_rejected_by_full_name: Option<String>,
}

/// Expense category resolved from the server's type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExpenseType {
    Travel,
    Food,
    Accommodation,
    #[serde(rename = "Office Supplies")]
    OfficeSupplies,
    Other,
}

impl ExpenseType {
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(0) => ExpenseType::Travel,
            Some(1) => ExpenseType::Food,
            Some(2) => ExpenseType::Accommodation,
            Some(3) => ExpenseType::OfficeSupplies,
            _ => ExpenseType::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseType::Travel => "Travel",
            ExpenseType::Food => "Food",
            ExpenseType::Accommodation => "Accommodation",
            ExpenseType::OfficeSupplies => "Office Supplies",
            ExpenseType::Other => "Other",
        }
    }
}

impl fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display-ready expense claim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expense {
    pub id: String,
    pub employee: String,
    pub title: String,
    pub expense_type: ExpenseType,
    pub amount: f64,
    pub date: Option<NaiveDate>,
    pub display_date: String,
    pub status: ExpenseStatus,
    pub remarks: Detail,
    pub submitted_to: Detail,
    pub approved_by: Detail,
}

impl Expense {
    /// Heading shown above the approver's name for the current status.
    pub fn reviewer_heading(&self) -> &'static str {
        match self.status {
            ExpenseStatus::Approved => "Approved By",
            ExpenseStatus::Rejected => "Rejected By",
            ExpenseStatus::Pending | ExpenseStatus::Unattended => "Pending Approval From",
        }
    }

    /// Person shown under [`Expense::reviewer_heading`].
    pub fn reviewer(&self) -> &Detail {
        match self.status {
            ExpenseStatus::Approved | ExpenseStatus::Rejected => &self.approved_by,
            ExpenseStatus::Pending | ExpenseStatus::Unattended => &self.submitted_to,
        }
    }
}

impl IntoView for RawExpense {
    type View = Expense;

    fn into_view(self) -> Expense {
        let date = self
            .expense_track_created_at
            .as_deref()
            .and_then(shared::dates::parse_timestamp);

        Expense {
            id: self.expense_track_id,
            employee: self
                .created_by_full_name
                .unwrap_or_else(|| UNKNOWN_EMPLOYEE_LABEL.to_string()),
            title: self.expense_track_title.unwrap_or_default(),
            expense_type: ExpenseType::from_code(self.expense_type_id),
            amount: self.expense_total_amount,
            date,
            display_date: shared::dates::display_or_missing(date),
            status: ExpenseStatus::from_code(self.expense_track_status),
            remarks: Detail::from_optional(self.expense_track_app_rej_remarks, NO_REMARKS_LABEL),
            submitted_to: Detail::from_optional(self.submitted_to_full_name, NOT_SUBMITTED_LABEL),
            approved_by: Detail::from_optional(
                self.approved_rejected_by_full_name,
                NOT_PROCESSED_LABEL,
            ),
        }
    }
}

impl ListRecord for Expense {
    type Status = ExpenseStatus;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> ExpenseStatus {
        self.status
    }

    fn set_status(&mut self, status: ExpenseStatus) {
        self.status = status;
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.employee.as_str(), self.title.as_str()];
        if let Some(remarks) = self.remarks.provided() {
            fields.push(remarks);
        }
        fields
    }

    fn record_date(&self) -> Option<NaiveDate> {
        self.date
    }
}

impl Reviewable for Expense {
    fn status_after(action: ReviewAction) -> ExpenseStatus {
        match action {
            ReviewAction::Approve => ExpenseStatus::Approved,
            ReviewAction::Reject => ExpenseStatus::Rejected,
        }
    }

    fn is_awaiting_review(&self) -> bool {
        self.status == ExpenseStatus::Unattended
    }
}
