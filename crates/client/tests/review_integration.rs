//! Approve/reject round trips against a stub backend.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use domain::models::{Requisition, RequisitionStatus, ReviewAction};
use expense_tracker_client::review::HttpReviewGateway;
use expense_tracker_client::screen::ListScreen;
use expense_tracker_client::session::MemorySessionStore;
use expense_tracker_client::source::HttpRecordSource;
use expense_tracker_client::ClientError;
use fake::faker::name::en::Name;
use fake::Fake;
use serde_json::{json, Value};
use shared::pagination::Paginator;
use tokio::sync::Mutex;
use tokio_test::{assert_err, assert_ok};

use common::{json_response, managed_requisition_json};

/// How the stub answers review calls.
#[derive(Clone, Copy)]
enum Verdict {
    Accept,
    Refuse,
    Crash,
}

struct Stub {
    base_url: String,
    received: Arc<Mutex<Vec<Value>>>,
}

async fn spawn_review_stub(verdict: Verdict) -> Stub {
    // Requisition 3 is already approved; the rest await a decision.
    let listing: Vec<Value> = (1..=4)
        .map(|id| {
            let mut record = managed_requisition_json(id, &Name().fake::<String>());
            record["requisition_status"] = if id == 3 { json!(1) } else { Value::Null };
            record
        })
        .collect();
    let received = Arc::new(Mutex::new(Vec::new()));

    let router = Router::new()
        .route(
            "/manage_requisitions.php",
            get(move || {
                let listing = listing.clone();
                async move { json_response(StatusCode::OK, Value::Array(listing)) }
            }),
        )
        .route(
            "/approve_reject_requisitions.php",
            post({
                let received = received.clone();
                move |Json(body): Json<Value>| {
                    let received = received.clone();
                    async move {
                        received.lock().await.push(body);
                        match verdict {
                            Verdict::Accept => json_response(
                                StatusCode::OK,
                                json!({ "status": "success", "message": "Requisition updated successfully" }),
                            ),
                            Verdict::Refuse => json_response(
                                StatusCode::OK,
                                json!({ "status": "error", "message": "Requisition already processed" }),
                            ),
                            Verdict::Crash => {
                                json_response(StatusCode::INTERNAL_SERVER_ERROR, json!({}))
                            }
                        }
                    }
                }
            }),
        );

    Stub {
        base_url: common::spawn_stub(router).await,
        received,
    }
}

async fn loaded_screen(base_url: &str) -> (ListScreen<Requisition>, HttpReviewGateway) {
    let fetcher = common::fetcher(base_url);
    let gateway = HttpReviewGateway::new(&fetcher);
    let source = HttpRecordSource::managed_requisitions(fetcher);
    let screen = ListScreen::new("manage", Arc::new(source), Paginator::default());
    assert_ok!(screen.refresh().await);
    (screen, gateway)
}

#[tokio::test]
async fn test_approve_sends_request_and_patches_one_record() {
    let stub = spawn_review_stub(Verdict::Accept).await;
    let (screen, gateway) = loaded_screen(&stub.base_url).await;
    let before = screen.snapshot().await.records().to_vec();
    let session = MemorySessionStore::signed_in(21);

    let message = assert_ok!(
        screen
            .review(&gateway, &session, "2", ReviewAction::Approve)
            .await
    );
    assert_eq!(message, "Requisition updated successfully");

    let received = stub.received.lock().await.clone();
    assert_eq!(
        received,
        vec![json!({ "recordId": "2", "action": "approve", "actingUserId": 21 })]
    );

    let after = screen.snapshot().await.records().to_vec();
    assert_eq!(after.len(), before.len());
    for (old, new) in before.iter().zip(&after) {
        if old.id == "2" {
            assert_eq!(new.status, RequisitionStatus::Approved);
            assert_eq!(new.employee, old.employee);
        } else {
            assert_eq!(old, new);
        }
    }
}

#[tokio::test]
async fn test_reject_sets_rejected_status() {
    let stub = spawn_review_stub(Verdict::Accept).await;
    let (screen, gateway) = loaded_screen(&stub.base_url).await;
    let session = MemorySessionStore::signed_in(21);

    assert_ok!(
        screen
            .review(&gateway, &session, "4", ReviewAction::Reject)
            .await
    );

    let state = screen.snapshot().await;
    let record = state.records().iter().find(|r| r.id == "4").unwrap();
    assert_eq!(record.status, RequisitionStatus::Rejected);
}

#[tokio::test]
async fn test_refused_review_leaves_collection_unchanged() {
    let stub = spawn_review_stub(Verdict::Refuse).await;
    let (screen, gateway) = loaded_screen(&stub.base_url).await;
    let before = screen.snapshot().await.records().to_vec();
    let session = MemorySessionStore::signed_in(21);

    let err = assert_err!(
        screen
            .review(&gateway, &session, "2", ReviewAction::Approve)
            .await
    );
    assert!(
        matches!(err, ClientError::MutationRejected(ref m) if m == "Requisition already processed")
    );
    assert_eq!(screen.snapshot().await.records(), before.as_slice());
}

#[tokio::test]
async fn test_server_crash_leaves_collection_unchanged() {
    let stub = spawn_review_stub(Verdict::Crash).await;
    let (screen, gateway) = loaded_screen(&stub.base_url).await;
    let before = screen.snapshot().await.records().to_vec();
    let session = MemorySessionStore::signed_in(21);

    let err = assert_err!(
        screen
            .review(&gateway, &session, "1", ReviewAction::Reject)
            .await
    );
    assert!(matches!(err, ClientError::Http { status: 500 }));
    assert_eq!(screen.snapshot().await.records(), before.as_slice());
}

#[tokio::test]
async fn test_missing_user_sends_nothing() {
    let stub = spawn_review_stub(Verdict::Accept).await;
    let (screen, gateway) = loaded_screen(&stub.base_url).await;
    let session = MemorySessionStore::new();

    let err = assert_err!(
        screen
            .review(&gateway, &session, "1", ReviewAction::Approve)
            .await
    );
    assert!(matches!(err, ClientError::MissingUser));
    assert!(stub.received.lock().await.is_empty());
}

#[tokio::test]
async fn test_decided_requisition_is_not_sent() {
    let stub = spawn_review_stub(Verdict::Accept).await;
    let (screen, gateway) = loaded_screen(&stub.base_url).await;
    let before = screen.snapshot().await.records().to_vec();
    let session = MemorySessionStore::signed_in(21);

    let err = assert_err!(
        screen
            .review(&gateway, &session, "3", ReviewAction::Reject)
            .await
    );
    assert!(matches!(err, ClientError::NotAwaitingReview { ref id } if id == "3"));
    assert!(stub.received.lock().await.is_empty());
    assert_eq!(screen.snapshot().await.records(), before.as_slice());
}
