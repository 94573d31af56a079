// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Completion reconciler — the only component that removes jobs.
//
// The driver retries failed update calls indefinitely and sends several
// updates for one logical completion, so everything here must stay safe
// under redundant delivery and must never let a remote failure escape as a
// panic or an error response the driver cannot handle. The caller only ever
// sees a pass/fail flag.

use tracing::{info, warn};

use spoolbridge_core::types::{Credentials, HealthState, JobId};
use spoolbridge_health::StatusReporter;

use crate::backend::{BackendJobStatus, PrintServerClient};
use crate::store::SharedJobStore;

/// Applies driver outcome reports to the queue and the backend.
#[derive(Debug, Clone)]
pub struct CompletionReconciler {
    store: SharedJobStore,
    backend: PrintServerClient,
    reporter: StatusReporter,
}

impl CompletionReconciler {
    pub fn new(store: SharedJobStore, backend: PrintServerClient, reporter: StatusReporter) -> Self {
        Self {
            store,
            backend,
            reporter,
        }
    }

    /// Process one outcome report from the driver.
    ///
    /// Returns the `pass` flag for the wire: `true` when the job is settled
    /// locally (including redundant reports and the split-brain case where
    /// the print succeeded but the backend could not be told), `false` when
    /// the driver should retry the update.
    pub async fn report_outcome(
        &self,
        id: &JobId,
        driver_status: &str,
        credentials: &Credentials,
    ) -> bool {
        // Local jobs have no cloud-side record to update.
        if id.is_local() {
            let removed = self
                .store
                .lock()
                .expect("job store lock poisoned")
                .remove(id);
            info!(removed, "local job outcome recorded");
            return true;
        }

        info!(job_id = %id, status = %driver_status, "updating print job with backend");
        let status = BackendJobStatus::from_driver_status(driver_status);

        match self.backend.update(id.as_wire(), status, credentials).await {
            Ok(()) => {
                self.release(id);
                if status.is_completed() {
                    self.reporter
                        .update_status(
                            HealthState::Success,
                            format!("Print job [{id}] completed"),
                            Some(id),
                        )
                        .await;
                    true
                } else {
                    self.reporter
                        .update_status(
                            HealthState::Failed,
                            format!("Print job [{id}] failed, status [{driver_status}]"),
                            Some(id),
                        )
                        .await;
                    false
                }
            }
            Err(e) if status.is_completed() => {
                // Split-brain: printed locally, but the backend could not be
                // told to stop retrying. Local success wins — the job is not
                // re-queued — and the divergence is recorded as a failure
                // for the operator to see.
                warn!(job_id = %id, error = %e, "backend refused update for a completed job");
                self.release(id);
                self.reporter
                    .update_status(
                        HealthState::Failed,
                        format!(
                            "Print job [{id}] update failed, but print job succeeded, status [{driver_status}]"
                        ),
                        Some(id),
                    )
                    .await;
                true
            }
            Err(e) => {
                self.reporter
                    .update_status(
                        HealthState::Failed,
                        format!("Failed to update job [{id}] [{e}]"),
                        Some(id),
                    )
                    .await;
                false
            }
        }
    }

    /// Drop the queue entry for `id`, tolerating redundant reports.
    fn release(&self, id: &JobId) {
        let removed = self
            .store
            .lock()
            .expect("job store lock poisoned")
            .remove(id);
        if removed {
            info!(job_id = %id, "print job removed from the in-memory queue");
        } else {
            info!(job_id = %id, "print job not in queue, assuming redundant update");
        }
    }
}
