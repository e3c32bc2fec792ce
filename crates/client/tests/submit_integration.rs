//! Multipart expense submission against a stub backend.

mod common;

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use domain::models::{Attachment, ExpenseDraft};
use expense_tracker_client::session::MemorySessionStore;
use expense_tracker_client::submit::ExpenseSubmitter;
use expense_tracker_client::ClientError;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tokio_test::{assert_err, assert_ok};

use common::json_response;

#[derive(Debug, Clone)]
struct ReceivedPart {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

async fn spawn_submit_stub(accept: bool) -> (String, Arc<Mutex<Vec<ReceivedPart>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));

    let router = Router::new().route(
        "/add_expense.php",
        post({
            let received = received.clone();
            move |mut multipart: Multipart| {
                let received = received.clone();
                async move {
                    while let Ok(Some(field)) = multipart.next_field().await {
                        let name = field.name().unwrap_or_default().to_string();
                        let file_name = field.file_name().map(str::to_string);
                        let content_type = field.content_type().map(str::to_string);
                        let bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
                        received.lock().await.push(ReceivedPart {
                            name,
                            file_name,
                            content_type,
                            bytes,
                        });
                    }

                    if accept {
                        json_response(
                            StatusCode::OK,
                            json!({ "status": "success", "message": "Expense added successfully" }),
                        )
                    } else {
                        json_response(
                            StatusCode::OK,
                            json!({ "status": "error", "message": "Invalid expense head" }),
                        )
                    }
                }
            }
        }),
    );

    (common::spawn_stub(router).await, received)
}

fn write_temp_file(name: &str, contents: &[u8]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("expense-tracker-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn draft_with_photo(photo: PathBuf) -> ExpenseDraft {
    let mut draft: ExpenseDraft = serde_json::from_value(json!({
        "title": "Client dinner",
        "head_id": 3,
        "submitted_to": 8,
        "items": [
            {
                "title": "Dinner",
                "description": "Dinner with client",
                "amount": 1800,
                "remarks": "Quarterly review",
                "bill_date": "2024-03-14"
            },
            {
                "description": "Cab back",
                "amount": 450.5,
                "remarks": "Late night",
                "bill_date": "2024-03-14"
            }
        ]
    }))
    .unwrap();
    draft.items[1].photo = Some(Attachment {
        path: photo,
        file_name: None,
        mime_type: Some("image/png".to_string()),
    });
    draft
}

#[tokio::test]
async fn test_submission_sends_data_and_indexed_attachments() {
    let (base_url, received) = spawn_submit_stub(true).await;
    let photo = write_temp_file("cab-receipt.png", b"\x89PNG fake image");

    let submitter = ExpenseSubmitter::new(&common::fetcher(&base_url));
    let session = MemorySessionStore::signed_in(4);

    let message = assert_ok!(submitter.submit(draft_with_photo(photo.clone()), &session).await);
    assert_eq!(message, "Expense added successfully");

    let parts = received.lock().await.clone();
    assert_eq!(parts.len(), 2);

    let data = parts.iter().find(|p| p.name == "data").unwrap();
    let data: Value = serde_json::from_slice(&data.bytes).unwrap();
    assert_eq!(data["expense_track_title"], "Client dinner");
    assert_eq!(data["expense_type_id"], 3);
    assert_eq!(data["expense_total_amount"], 2250.5);
    assert_eq!(data["expense_track_status"], 1);
    assert_eq!(data["expense_track_created_by"], 4);
    assert_eq!(data["expense_track_submitted_to"], 8);
    assert_eq!(data["expense_track_approved_rejected_by"], 0);
    assert_eq!(data["details"][0]["expense_product_sl_no"], "SL001");
    assert_eq!(data["details"][1]["expense_product_sl_no"], "SL002");
    assert_eq!(data["details"][1]["expense_product_name"], "Untitled");
    assert_eq!(data["details"][1]["expense_product_unit"], "Unit");

    let photo_part = parts
        .iter()
        .find(|p| p.name == "expense_product_photo_path[1]")
        .unwrap();
    assert_eq!(photo_part.file_name.as_deref(), Some("cab-receipt.png"));
    assert_eq!(photo_part.content_type.as_deref(), Some("image/png"));
    assert_eq!(photo_part.bytes, b"\x89PNG fake image");

    if let Some(dir) = photo.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}

#[tokio::test]
async fn test_refused_submission_is_rejection() {
    let (base_url, _received) = spawn_submit_stub(false).await;
    let photo = write_temp_file("receipt.png", b"png");

    let submitter = ExpenseSubmitter::new(&common::fetcher(&base_url));
    let session = MemorySessionStore::signed_in(4);

    let err = assert_err!(submitter.submit(draft_with_photo(photo.clone()), &session).await);
    assert!(matches!(err, ClientError::MutationRejected(ref m) if m == "Invalid expense head"));

    if let Some(dir) = photo.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}

#[tokio::test]
async fn test_invalid_draft_is_not_sent() {
    let (base_url, received) = spawn_submit_stub(true).await;
    let submitter = ExpenseSubmitter::new(&common::fetcher(&base_url));
    let session = MemorySessionStore::signed_in(4);

    let draft: ExpenseDraft = serde_json::from_value(json!({
        "title": "Empty",
        "head_id": null,
        "submitted_to": 8,
        "items": []
    }))
    .unwrap();

    let err = assert_err!(submitter.submit(draft, &session).await);
    assert!(matches!(err, ClientError::Validation(_)));
    assert!(received.lock().await.is_empty());
}
