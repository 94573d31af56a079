// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Status reporter — owns the process-wide health status.
//
// Every component records its successes and failures here through
// `update_status`. The reporter keeps only the most recent event (it is a
// current value, not a log), mirrors it to the optional shadow record, and
// pushes it to the vendor API on an independent heartbeat. A failed push is
// logged and forgotten; the next tick starts fresh. Nothing in this module
// may propagate an error into the job path.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use spoolbridge_core::types::{HealthState, HealthStatus, JobId, NO_JOB_ID};

use crate::shadow::ShadowClient;
use crate::vendor::{ExternalService, StatusReport, VendorApiClient};

/// Tracks and publishes the device's most recent health status.
///
/// Cheap to clone; all clones share the same current value.
#[derive(Debug, Clone)]
pub struct StatusReporter {
    current: Arc<RwLock<HealthStatus>>,
    shadow: Option<ShadowClient>,
    component_version: String,
}

impl StatusReporter {
    pub fn new(component_version: impl Into<String>, shadow: Option<ShadowClient>) -> Self {
        Self {
            current: Arc::new(RwLock::new(HealthStatus::default())),
            shadow,
            component_version: component_version.into(),
        }
    }

    /// Overwrite the current health status and log it.
    ///
    /// Infallible by contract: the shadow mirror is best-effort and its
    /// failures are swallowed after a warning.
    pub async fn update_status(
        &self,
        state: HealthState,
        message: impl Into<String>,
        job_id: Option<&JobId>,
    ) {
        let status = HealthStatus {
            status: state,
            message: message.into(),
            print_job_id: job_id
                .map(|id| id.as_wire().to_string())
                .unwrap_or_else(|| NO_JOB_ID.to_string()),
            updated_at: Utc::now(),
        };

        match state {
            HealthState::Success => info!(
                version = %self.component_version,
                job_id = %status.print_job_id,
                message = %status.message,
                "health status updated"
            ),
            HealthState::Failed => warn!(
                version = %self.component_version,
                job_id = %status.print_job_id,
                message = %status.message,
                "health status updated"
            ),
        }

        *self
            .current
            .write()
            .expect("health status lock poisoned") = status.clone();

        if let Some(shadow) = &self.shadow {
            if let Err(e) = shadow.upsert(&status).await {
                warn!(error = %e, "shadow record update failed");
            }
        }
    }

    /// The most recent health status.
    pub fn current(&self) -> HealthStatus {
        self.current
            .read()
            .expect("health status lock poisoned")
            .clone()
    }

    /// Start the heartbeat that reports the current status to the vendor API.
    ///
    /// Each tick authenticates and pushes independently; a failed tick is
    /// logged and does not cancel the timer. The first report goes out one
    /// period after start.
    pub fn start_reporting(
        &self,
        client: VendorApiClient,
        identity: ExternalService,
        period: Duration,
    ) -> ReporterTask {
        let shutdown = Arc::new(Notify::new());
        let stop = Arc::clone(&shutdown);
        let reporter = self.clone();

        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut ticker = tokio::time::interval_at(start, period);

            loop {
                tokio::select! {
                    _ = stop.notified() => {
                        info!("health reporting stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        debug!("reporting health");
                        let report =
                            StatusReport::from_health(identity.clone(), &reporter.current());
                        if let Err(e) = client.report(&report).await {
                            warn!(error = %e, "health report failed");
                        }
                    }
                }
            }
        });

        ReporterTask { shutdown, handle }
    }
}

/// Handle to the running heartbeat task.
#[derive(Debug)]
pub struct ReporterTask {
    shutdown: Arc<Notify>,
    handle: JoinHandle<()>,
}

impl ReporterTask {
    /// Stop the heartbeat and wait for the task to exit.
    pub async fn shutdown(self) {
        self.shutdown.notify_one();
        let _ = self.handle.await;
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
