// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Spoolbridge Relay — the in-memory job queue between the cloud producers and
// the local print driver. Submission deduplicates retry-prone deliveries,
// lookup feeds the driver's poll loop, and reconciliation forwards completion
// reports to the print-server backend before releasing queue entries.

pub mod backend;
pub mod gateway;
pub mod lookup;
pub mod reconcile;
pub mod store;

pub use backend::{BackendJobStatus, PrintServerClient};
pub use gateway::{SubmissionGateway, SubmitOutcome};
pub use lookup::LookupService;
pub use reconcile::CompletionReconciler;
pub use store::{JobStore, SharedJobStore};
