//! Common test utilities for integration tests.
//!
//! Each test spins up an in-process axum stub of the PHP backend on an
//! ephemeral port and points a client at it.

// Not every helper is used by every test binary.
#![allow(dead_code)]

use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use expense_tracker_client::config::{ApiConfig, Config};
use expense_tracker_client::fetcher::RecordFetcher;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Serve `router` on 127.0.0.1 and return its base URL.
pub async fn spawn_stub(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub listener");
    let addr = listener.local_addr().expect("Stub has no local address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Stub server failed");
    });

    format!("http://{addr}")
}

/// Base URL of a port nothing listens on.
pub async fn closed_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("Probe has no local address");
    drop(listener);
    format!("http://{addr}")
}

pub fn api_config(base_url: &str) -> ApiConfig {
    let config = Config::load_for_test(&[("api.base_url", base_url)])
        .expect("Failed to load test config");
    config.validate().expect("Test config is invalid");
    config.api
}

pub fn fetcher(base_url: &str) -> Arc<RecordFetcher> {
    Arc::new(RecordFetcher::new(api_config(base_url)).expect("Failed to build fetcher"))
}

pub fn json_response(status: StatusCode, body: Value) -> Response {
    (status, axum::Json(body)).into_response()
}

pub fn html_response(status: StatusCode, body: &str) -> Response {
    (status, [(header::CONTENT_TYPE, "text/html; charset=UTF-8")], body.to_string()).into_response()
}

pub fn expense_json(id: i64, employee: &str, status: Option<i64>) -> Value {
    json!({
        "expense_track_id": id,
        "expense_track_title": format!("Claim {id}"),
        "expense_type_id": id % 5,
        "expense_total_amount": format!("{}.50", id * 100),
        "expense_track_status": status,
        "expense_track_app_rej_remarks": null,
        "expense_track_created_at": "2024-01-15 10:30:00",
        "expense_track_created_by": 4,
        "expense_track_submitted_to": 2,
        "expense_track_approved_rejected_by": null,
        "expense_track_approved_rejected_at": null,
        "created_by_full_name": employee,
        "submitted_to_full_name": "Mike Johnson",
        "approved_rejected_by_full_name": null
    })
}

pub fn managed_requisition_json(id: i64, user_name: &str) -> Value {
    json!({
        "requisition_id": id.to_string(),
        "requisition_title": format!("Request {id}"),
        "requisition_comment": null,
        "requisition_status": 3,
        "requisition_created_at": "2024-02-01 09:00:00",
        "user_name": user_name
    })
}
