// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Message-bus listener.
//
// The bus transport (connection management, certificates, reconnects) lives
// outside the core; whatever hosts it translates the transport's callbacks
// into `BusEvent`s on a channel. This task consumes that channel and turns
// each event into exactly one call on the gateway or the status reporter, so
// the transport's event model never leaks into the relay.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use spoolbridge_core::types::{HealthState, JobId};
use spoolbridge_health::StatusReporter;
use spoolbridge_relay::SubmissionGateway;

/// Connectivity and job events delivered by the bus transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    /// The transport (re)connected.
    Connected,
    /// The transport lost its connection. Reconnection is its problem.
    Disconnected,
    /// A print job arrived: producer id plus the encoded payload, the same
    /// format `POST /submit` accepts.
    JobAvailable { id: String, data: String },
}

/// Spawn the listener task. It runs until the event channel closes.
pub fn spawn_listener(
    events: mpsc::Receiver<BusEvent>,
    gateway: SubmissionGateway,
    reporter: StatusReporter,
    thing_name: String,
) -> JoinHandle<()> {
    tokio::spawn(run_listener(events, gateway, reporter, thing_name))
}

async fn run_listener(
    mut events: mpsc::Receiver<BusEvent>,
    gateway: SubmissionGateway,
    reporter: StatusReporter,
    thing_name: String,
) {
    info!("message bus listener started");

    while let Some(event) = events.recv().await {
        match event {
            BusEvent::Connected => {
                reporter
                    .update_status(
                        HealthState::Success,
                        format!("[{thing_name}] is connected"),
                        None,
                    )
                    .await;
            }
            BusEvent::Disconnected => {
                reporter
                    .update_status(
                        HealthState::Failed,
                        format!("[{thing_name}] is disconnected from the message bus"),
                        None,
                    )
                    .await;
            }
            BusEvent::JobAvailable { id, data } => {
                info!(job_id = %id, "received print job from the message bus");
                let job_id = JobId::from_wire(Some(&id));

                match gateway.submit(Some(&id), &data).await {
                    Ok(_) => {
                        reporter
                            .update_status(
                                HealthState::Success,
                                "Submitted print job.",
                                Some(&job_id),
                            )
                            .await;
                    }
                    Err(e) => {
                        error!(job_id = %id, error = %e, "failed to submit print job from bus");
                        reporter
                            .update_status(
                                HealthState::Failed,
                                format!("Failed to submit print job: {e}"),
                                Some(&job_id),
                            )
                            .await;
                    }
                }
            }
        }
    }

    info!("message bus channel closed, listener exiting");
}
