// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Submission gateway — the single ingestion point for print jobs.
//
// Both producers are retry-prone and deliver at-least-once, so a duplicate
// remote id is routine traffic, not an error: it is absorbed and answered
// with success. Payloads arrive URL-encoded with `+` for space and are
// decoded exactly once, here.

use tracing::{debug, info};

use spoolbridge_core::error::{Result, SpoolbridgeError};
use spoolbridge_core::types::{HealthState, JobId};
use spoolbridge_health::StatusReporter;

use crate::store::SharedJobStore;

/// What `submit` did with a delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The job was appended to the queue.
    Queued(JobId),
    /// The id was already queued; the delivery was absorbed.
    Duplicate(JobId),
}

/// Accepts jobs from the message-bus listener and the local HTTP producer.
#[derive(Debug, Clone)]
pub struct SubmissionGateway {
    store: SharedJobStore,
    reporter: StatusReporter,
}

impl SubmissionGateway {
    pub fn new(store: SharedJobStore, reporter: StatusReporter) -> Self {
        Self { store, reporter }
    }

    /// Ingest one delivery.
    ///
    /// `remote_id` is absent for local submissions. A malformed payload is
    /// rejected without touching the queue or the health status; every other
    /// path records a Success health event so the latest state stays visible.
    pub async fn submit(&self, remote_id: Option<&str>, encoded: &str) -> Result<SubmitOutcome> {
        let payload = decode_payload(encoded)?;
        let id = JobId::from_wire(remote_id);

        let (inserted, queued_ids) = {
            let mut store = self.store.lock().expect("job store lock poisoned");
            let inserted = store.insert(id.clone(), payload.clone());
            (inserted, store.snapshot().ids)
        };

        if inserted {
            info!(job_id = %id, queued = queued_ids.len(), "print job added to the queue");
            self.reporter
                .update_status(
                    HealthState::Success,
                    format!(
                        "Added print job to the queue. Job data: [{payload}], queue ids: {queued_ids:?}"
                    ),
                    Some(&id),
                )
                .await;
            Ok(SubmitOutcome::Queued(id))
        } else {
            debug!(job_id = %id, "duplicate delivery for queued print job ignored");
            self.reporter
                .update_status(
                    HealthState::Success,
                    format!("Ignored duplicate delivery for print job [{id}]"),
                    Some(&id),
                )
                .await;
            Ok(SubmitOutcome::Duplicate(id))
        }
    }
}

/// Decode a producer payload: `+` means space, then percent-decode.
///
/// Decoding happens once at ingestion; the queue holds driver-ready text.
pub fn decode_payload(encoded: &str) -> Result<String> {
    let normalised = encoded.replace('+', "%20");
    urlencoding::decode(&normalised)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| SpoolbridgeError::InvalidInput(format!("payload is not valid UTF-8: {e}")))
}
