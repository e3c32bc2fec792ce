//! Expense claim drafts and their upload plan.
//!
//! A draft is validated in full before anything is sent. A valid draft is
//! turned into a [`SubmissionPlan`]: the JSON document for the `data` form
//! field plus one upload per attached file, keyed `field[index]` by line item.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// Status code the server expects for a freshly submitted claim.
pub const SUBMITTED_STATUS_CODE: i64 = 1;

pub const PHOTO_FIELD: &str = "expense_product_photo_path";
pub const BILL_FIELD: &str = "expense_product_bill_photo_path";

const DEFAULT_PHOTO_MIME: &str = "image/jpeg";
const DEFAULT_BILL_MIME: &str = "application/pdf";
const DEFAULT_ITEM_NAME: &str = "Untitled";
const DEFAULT_UNIT: &str = "Unit";

/// Local file picked by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub path: PathBuf,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

impl Attachment {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file_name: None,
            mime_type: None,
        }
    }
}

/// One line of an expense claim.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LineItem {
    #[serde(default)]
    pub title: String,

    /// Expense head for this line; falls back to the draft's head.
    #[serde(default)]
    pub head_id: Option<i64>,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub description: String,

    #[validate(custom(function = "shared::validation::validate_positive_amount"))]
    pub amount: f64,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub remarks: String,

    #[validate(custom(function = "shared::validation::validate_bill_date"))]
    pub bill_date: String,

    #[serde(default)]
    pub bill: Option<Attachment>,

    #[serde(default)]
    pub photo: Option<Attachment>,
}

/// An expense claim being assembled before submission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExpenseDraft {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    #[serde(default)]
    pub title: String,

    #[validate(required(message = "Please select an expense head"))]
    pub head_id: Option<i64>,

    #[validate(required(message = "Please select who to submit to"))]
    pub submitted_to: Option<i64>,

    #[validate(
        length(min = 1, message = "Please add at least one expense before submitting"),
        nested
    )]
    pub items: Vec<LineItem>,
}

/// `data` form field of a submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseTrackData {
    pub expense_track_title: String,
    pub expense_type_id: i64,
    pub expense_total_amount: f64,
    pub expense_track_app_rej_remarks: String,
    pub expense_track_status: i64,
    pub expense_track_created_by: i64,
    pub expense_track_submitted_to: i64,
    pub expense_track_approved_rejected_by: i64,
    pub details: Vec<ExpenseDetailData>,
}

/// Per-line entry of [`ExpenseTrackData::details`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseDetailData {
    pub expense_head_id: i64,
    pub expense_product_name: String,
    pub expense_product_qty: u32,
    pub expense_product_unit: String,
    pub expense_product_desc: String,
    pub expense_product_sl_no: String,
    pub expense_product_amount: f64,
    pub expense_bill_date: String,
}

/// A file to attach to the multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentUpload {
    /// Form field name, e.g. `expense_product_photo_path[0]`.
    pub field: String,
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: String,
}

/// Everything needed to build the multipart submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionPlan {
    pub data: ExpenseTrackData,
    pub uploads: Vec<AttachmentUpload>,
}

impl ExpenseDraft {
    pub fn total_amount(&self) -> f64 {
        self.items.iter().map(|item| item.amount).sum()
    }

    /// Validates the draft and lays out the submission for `created_by`.
    pub fn into_plan(self, created_by: i64) -> Result<SubmissionPlan, ValidationErrors> {
        self.validate()?;

        let total = self.total_amount();
        // Both are present once validation passed.
        let head_id = self.head_id.unwrap_or_default();
        let submitted_to = self.submitted_to.unwrap_or_default();

        let mut uploads = Vec::new();
        let mut details = Vec::with_capacity(self.items.len());

        for (index, item) in self.items.into_iter().enumerate() {
            if let Some(photo) = &item.photo {
                uploads.push(upload(
                    PHOTO_FIELD,
                    index,
                    photo,
                    &format!("photo_{index}.jpg"),
                    DEFAULT_PHOTO_MIME,
                ));
            }
            if let Some(bill) = &item.bill {
                uploads.push(upload(
                    BILL_FIELD,
                    index,
                    bill,
                    &format!("bill_{index}.pdf"),
                    DEFAULT_BILL_MIME,
                ));
            }

            let name = if item.title.trim().is_empty() {
                DEFAULT_ITEM_NAME.to_string()
            } else {
                item.title.trim().to_string()
            };

            details.push(ExpenseDetailData {
                expense_head_id: item.head_id.unwrap_or(head_id),
                expense_product_name: name,
                expense_product_qty: 1,
                expense_product_unit: DEFAULT_UNIT.to_string(),
                expense_product_desc: item.description.trim().to_string(),
                expense_product_sl_no: format!("SL{:03}", index + 1),
                expense_product_amount: item.amount,
                expense_bill_date: item.bill_date.trim().to_string(),
            });
        }

        Ok(SubmissionPlan {
            data: ExpenseTrackData {
                expense_track_title: self.title.trim().to_string(),
                expense_type_id: head_id,
                expense_total_amount: total,
                expense_track_app_rej_remarks: String::new(),
                expense_track_status: SUBMITTED_STATUS_CODE,
                expense_track_created_by: created_by,
                expense_track_submitted_to: submitted_to,
                expense_track_approved_rejected_by: 0,
                details,
            },
            uploads,
        })
    }
}

fn upload(
    field: &str,
    index: usize,
    attachment: &Attachment,
    default_name: &str,
    default_mime: &str,
) -> AttachmentUpload {
    let file_name = attachment
        .file_name
        .clone()
        .filter(|name| !name.trim().is_empty())
        .or_else(|| file_name_of(&attachment.path))
        .unwrap_or_else(|| default_name.to_string());

    let mime_type = attachment
        .mime_type
        .clone()
        .filter(|mime| !mime.trim().is_empty())
        .unwrap_or_else(|| default_mime.to_string());

    AttachmentUpload {
        field: format!("{field}[{index}]"),
        path: attachment.path.clone(),
        file_name,
        mime_type,
    }
}

fn file_name_of(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
}
