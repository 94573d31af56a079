// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end submit/lookup/update flow against the in-process router, with a
// fake print-server backend standing in for the cloud side.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Form, Router};
use axum_test::TestServer;
use serde::Deserialize;

use spoolbridge_health::StatusReporter;
use spoolbridge_relay::{
    CompletionReconciler, JobStore, LookupService, PrintServerClient, SubmissionGateway,
};
use spoolbridge_server::{AppState, router};

#[derive(Debug, Clone, Deserialize)]
struct UpdateForm {
    id: String,
    status: String,
}

#[derive(Clone)]
struct Backend {
    requests: Arc<Mutex<Vec<UpdateForm>>>,
    respond_with: StatusCode,
}

/// Serve a stand-in for the print-server backend on an ephemeral port.
async fn spawn_backend(respond_with: StatusCode) -> (SocketAddr, Arc<Mutex<Vec<UpdateForm>>>) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let backend = Backend {
        requests: Arc::clone(&requests),
        respond_with,
    };
    let app = Router::new()
        .route(
            "/update",
            post(
                |State(backend): State<Backend>, Form(form): Form<UpdateForm>| async move {
                    backend.requests.lock().expect("requests lock").push(form);
                    backend.respond_with
                },
            ),
        )
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake backend");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    (addr, requests)
}

fn relay_server(backend_url: String) -> TestServer {
    let store = JobStore::shared();
    let reporter = StatusReporter::new("test", None);
    let state = AppState {
        gateway: SubmissionGateway::new(Arc::clone(&store), reporter.clone()),
        lookup: LookupService::new(Arc::clone(&store)),
        reconciler: CompletionReconciler::new(
            Arc::clone(&store),
            PrintServerClient::new(backend_url),
            reporter,
        ),
    };
    TestServer::new(router(state)).expect("test server")
}

#[tokio::test]
async fn remote_job_flows_from_submit_to_completion() {
    let (addr, requests) = spawn_backend(StatusCode::OK).await;
    let server = relay_server(format!("http://{addr}"));

    let submit = server
        .post("/submit")
        .form(&[("remoteJobId", "42"), ("data", "hello%20world")])
        .await;
    submit.assert_status_ok();
    let body: serde_json::Value = submit.json();
    assert_eq!(body["pass"], true);

    let lookup = server.post("/lookup").await;
    lookup.assert_status_ok();
    let body: serde_json::Value = lookup.json();
    assert_eq!(body["pass"], true);
    assert_eq!(body["version"], 5);
    assert_eq!(body["ids"], serde_json::json!(["42"]));
    assert_eq!(body["data"], serde_json::json!(["hello world"]));

    let update = server
        .post("/update")
        .form(&[
            ("id", "42"),
            ("status", "Completed"),
            ("username", "brod"),
            ("password", "1234"),
        ])
        .await;
    update.assert_status_ok();
    let body: serde_json::Value = update.json();
    assert_eq!(body["pass"], true);

    // Backend was told, queue drained.
    {
        let sent = requests.lock().expect("requests lock");
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].id, "42");
        assert_eq!(sent[0].status, "Completed");
    }
    let lookup: serde_json::Value = server.post("/lookup").await.json();
    assert_eq!(lookup["ids"], serde_json::json!([]));
}

#[tokio::test]
async fn local_jobs_queue_without_deduplication() {
    let server = relay_server("http://127.0.0.1:1".into());

    for payload in ["first", "second"] {
        let submit = server.post("/submit").form(&[("data", payload)]).await;
        submit.assert_status_ok();
    }

    let lookup: serde_json::Value = server.post("/lookup").await.json();
    assert_eq!(lookup["ids"], serde_json::json!(["-1", "-1"]));
    assert_eq!(lookup["data"], serde_json::json!(["first", "second"]));
}

#[tokio::test]
async fn redelivered_remote_job_is_queued_once() {
    let server = relay_server("http://127.0.0.1:1".into());

    for _ in 0..2 {
        let submit = server
            .post("/submit")
            .form(&[("remoteJobId", "7"), ("data", "receipt")])
            .await;
        submit.assert_status_ok();
        let body: serde_json::Value = submit.json();
        assert_eq!(body["pass"], true, "redelivery still passes");
    }

    let lookup: serde_json::Value = server.post("/lookup").await.json();
    assert_eq!(lookup["ids"], serde_json::json!(["7"]));
}

#[tokio::test]
async fn submission_without_data_is_a_bad_request() {
    let server = relay_server("http://127.0.0.1:1".into());

    let submit = server
        .post("/submit")
        .form(&[("remoteJobId", "42")])
        .await;
    submit.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn undecodable_payload_is_a_bad_request() {
    let server = relay_server("http://127.0.0.1:1".into());

    // %FF is not valid UTF-8 once percent-decoded.
    let submit = server
        .post("/submit")
        .form(&[("remoteJobId", "42"), ("data", "%FF")])
        .await;
    submit.assert_status(StatusCode::BAD_REQUEST);

    let lookup: serde_json::Value = server.post("/lookup").await.json();
    assert_eq!(lookup["ids"], serde_json::json!([]), "nothing was queued");
}

#[tokio::test]
async fn failed_print_keeps_the_job_for_retry() {
    let (addr, _) = spawn_backend(StatusCode::INTERNAL_SERVER_ERROR).await;
    let server = relay_server(format!("http://{addr}"));

    server
        .post("/submit")
        .form(&[("remoteJobId", "7"), ("data", "x")])
        .await
        .assert_status_ok();

    let update: serde_json::Value = server
        .post("/update")
        .form(&[("id", "7"), ("status", "paper jam")])
        .await
        .json();
    assert_eq!(update["pass"], false);

    let lookup: serde_json::Value = server.post("/lookup").await.json();
    assert_eq!(lookup["ids"], serde_json::json!(["7"]), "job stays queued");
}

#[tokio::test]
async fn redundant_completion_reports_both_pass() {
    let (addr, _) = spawn_backend(StatusCode::OK).await;
    let server = relay_server(format!("http://{addr}"));

    server
        .post("/submit")
        .form(&[("remoteJobId", "42"), ("data", "x")])
        .await
        .assert_status_ok();

    for _ in 0..2 {
        let update: serde_json::Value = server
            .post("/update")
            .form(&[("id", "42"), ("status", "Completed")])
            .await
            .json();
        assert_eq!(update["pass"], true);
    }
}

#[tokio::test]
async fn completed_job_passes_even_when_the_backend_is_down() {
    let (addr, _) = spawn_backend(StatusCode::INTERNAL_SERVER_ERROR).await;
    let server = relay_server(format!("http://{addr}"));

    server
        .post("/submit")
        .form(&[("remoteJobId", "42"), ("data", "x")])
        .await
        .assert_status_ok();

    let update: serde_json::Value = server
        .post("/update")
        .form(&[("id", "42"), ("status", "Completed")])
        .await
        .json();
    assert_eq!(update["pass"], true, "local success wins");

    let lookup: serde_json::Value = server.post("/lookup").await.json();
    assert_eq!(lookup["ids"], serde_json::json!([]), "job is not re-queued");
}

#[tokio::test]
async fn local_outcome_report_never_touches_the_backend() {
    // A dead port would fail any update call; local jobs must not make one.
    let server = relay_server("http://127.0.0.1:1".into());

    server
        .post("/submit")
        .form(&[("data", "receipt")])
        .await
        .assert_status_ok();

    let update: serde_json::Value = server
        .post("/update")
        .form(&[("id", "-1"), ("status", "Completed")])
        .await
        .json();
    assert_eq!(update["pass"], true);

    let lookup: serde_json::Value = server.post("/lookup").await.json();
    assert_eq!(lookup["ids"], serde_json::json!([]));
}
