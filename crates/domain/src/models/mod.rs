//! Domain models for the expense tracker.

pub mod de;
pub mod envelope;
pub mod expense;
pub mod record;
pub mod requisition;
pub mod review;
pub mod status;
pub mod submission;

pub use envelope::{decode_list, ApiEnvelope, EnvelopeStatus, PayloadError};
pub use expense::{Expense, ExpenseType, RawExpense};
pub use record::{Detail, ListRecord, Reviewable};
pub use requisition::{RawRequisition, Requisition, RequisitionType};
pub use review::{ReviewAction, ReviewRequest};
pub use status::{ExpenseStatus, RequisitionStatus, StatusFilter};
pub use submission::{Attachment, ExpenseDraft, LineItem, SubmissionPlan};
