//! Multipart submission of expense claims.

use domain::models::{ExpenseDraft, SubmissionPlan};
use reqwest::multipart::{Form, Part};
use reqwest::{header, Client};
use tracing::{debug, info, warn};
use validator::Validate;

use crate::config::Endpoint;
use crate::error::ClientError;
use crate::fetcher::{expect_success, read_json, RecordFetcher};
use crate::metrics::RequestTimer;
use crate::session::{acting_user_id, SessionStore};

/// Name of the form field carrying the claim JSON.
pub const DATA_FIELD: &str = "data";

const SUBMITTED_FALLBACK: &str = "Expense submitted successfully";
const FAILED_FALLBACK: &str = "Failed to submit expense";

/// Posts expense drafts to the submission endpoint.
#[derive(Debug, Clone)]
pub struct ExpenseSubmitter {
    client: Client,
    url: String,
}

impl ExpenseSubmitter {
    pub fn new(fetcher: &RecordFetcher) -> Self {
        Self {
            client: fetcher.client().clone(),
            url: fetcher.api().url(Endpoint::Submit),
        }
    }

    /// Validates and submits `draft` on behalf of the signed-in user.
    ///
    /// Invalid drafts and missing sessions fail before anything is sent.
    pub async fn submit(
        &self,
        draft: ExpenseDraft,
        session: &dyn SessionStore,
    ) -> Result<String, ClientError> {
        draft.validate()?;
        let created_by = acting_user_id(session).await?;
        let plan = draft.into_plan(created_by)?;

        let timer = RequestTimer::new(Endpoint::Submit.label());
        let result = self.send(&plan).await;

        match &result {
            Ok(_) => info!(
                created_by,
                items = plan.data.details.len(),
                total = plan.data.expense_total_amount,
                "Expense submitted"
            ),
            Err(err) => warn!(created_by, error = %err, "Expense submission failed"),
        }

        timer.finish(result)
    }

    async fn send(&self, plan: &SubmissionPlan) -> Result<String, ClientError> {
        let form = build_form(plan).await?;

        let response = self
            .client
            .post(&self.url)
            .header(header::ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await?;

        let payload = read_json(response).await?;
        expect_success(payload, SUBMITTED_FALLBACK, FAILED_FALLBACK)
    }
}

/// Builds the multipart body: the `data` JSON plus one part per attachment.
pub async fn build_form(plan: &SubmissionPlan) -> Result<Form, ClientError> {
    let data = serde_json::to_string(&plan.data).map_err(|e| ClientError::Decode(e.to_string()))?;
    let mut form = Form::new().text(DATA_FIELD, data);

    for upload in &plan.uploads {
        let attachment_error = |reason: String| ClientError::Attachment {
            path: upload.path.display().to_string(),
            reason,
        };

        let bytes = tokio::fs::read(&upload.path)
            .await
            .map_err(|e| attachment_error(e.to_string()))?;

        debug!(
            field = %upload.field,
            file_name = %upload.file_name,
            bytes = bytes.len(),
            "Attaching file"
        );

        let part = Part::bytes(bytes)
            .file_name(upload.file_name.clone())
            .mime_str(&upload.mime_type)
            .map_err(|e| attachment_error(e.to_string()))?;

        form = form.part(upload.field.clone(), part);
    }

    Ok(form)
}
