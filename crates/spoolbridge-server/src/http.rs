// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HTTP surface for the relay (default port 8083).
//
// Consumed by the local print driver (lookup/update polling) and by the
// message-bus bridge (submit). The driver's polling contract is body-level:
// handled failures answer 2xx with `{"pass": false}`, never an error status.
// Only a malformed submission body earns a 400.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::warn;

use spoolbridge_core::types::{Credentials, JobId};
use spoolbridge_relay::{CompletionReconciler, LookupService, SubmissionGateway};

/// Version tag the print driver expects in every lookup response.
const LOOKUP_PROTOCOL_VERSION: u32 = 5;

/// Shared handles behind the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: SubmissionGateway,
    pub lookup: LookupService,
    pub reconciler: CompletionReconciler,
}

/// Build the relay router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/submit", post(submit))
        .route("/lookup", post(lookup))
        .route("/update", post(update))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Body of `POST /submit`. Producers send URL-encoded forms; the payload
/// value itself is still encoded once more and is decoded by the gateway.
/// `data` is optional here only so its absence maps to a 400 rather than
/// the extractor's 422.
#[derive(Debug, Deserialize)]
struct SubmitRequest {
    data: Option<String>,
    #[serde(rename = "remoteJobId")]
    remote_job_id: Option<String>,
}

/// Body of `POST /update` from the print driver.
#[derive(Debug, Deserialize)]
struct UpdateRequest {
    id: String,
    status: String,
    username: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Serialize)]
struct PassResponse {
    pass: bool,
}

#[derive(Debug, Serialize)]
struct LookupResponse {
    pass: bool,
    version: u32,
    ids: Vec<String>,
    data: Vec<String>,
}

/// Handle a job submission, remote (bus bridge) or local (counter).
async fn submit(State(state): State<AppState>, Form(request): Form<SubmitRequest>) -> Response {
    let Some(data) = request.data else {
        warn!("rejecting submission without a data field");
        return StatusCode::BAD_REQUEST.into_response();
    };

    match state
        .gateway
        .submit(request.remote_job_id.as_deref(), &data)
        .await
    {
        // Duplicates answer pass:true as well — at-least-once delivery makes
        // them expected traffic.
        Ok(_) => Json(PassResponse { pass: true }).into_response(),
        Err(e) => {
            warn!(error = %e, "rejecting malformed submission");
            StatusCode::BAD_REQUEST.into_response()
        }
    }
}

/// Hand the current queue to the polling print driver.
async fn lookup(State(state): State<AppState>) -> Json<LookupResponse> {
    let snapshot = state.lookup.lookup();
    Json(LookupResponse {
        pass: true,
        version: LOOKUP_PROTOCOL_VERSION,
        ids: snapshot.ids,
        data: snapshot.data,
    })
}

/// Apply a driver outcome report. Failures are signalled in the body so the
/// driver's retry loop keeps working.
async fn update(State(state): State<AppState>, Form(request): Form<UpdateRequest>) -> Json<PassResponse> {
    let id = JobId::from_wire(Some(&request.id));
    let credentials = Credentials::new(
        request.username.unwrap_or_default(),
        request.password.unwrap_or_default(),
    );

    let pass = state
        .reconciler
        .report_outcome(&id, &request.status, &credentials)
        .await;

    Json(PassResponse { pass })
}
