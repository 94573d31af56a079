// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory job queue.
//
// Deliberately volatile: the print-server backend is the durable source of
// truth and redelivers anything lost in a restart. Entries keep insertion
// order because the driver prints in the order lookup returns them.

use std::sync::{Arc, Mutex};

use spoolbridge_core::types::{JobId, QueueSnapshot};

/// The queue as shared between the gateway (insert), the lookup service
/// (read) and the reconciler (remove). Mutations are synchronous and the
/// lock is never held across an await point.
pub type SharedJobStore = Arc<Mutex<JobStore>>;

/// One queued print job.
#[derive(Debug, Clone)]
struct QueuedJob {
    id: JobId,
    payload: String,
}

/// Ordered in-memory queue of print jobs awaiting the driver.
#[derive(Debug, Default)]
pub struct JobStore {
    jobs: Vec<QueuedJob>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh store behind the shared handle the components expect.
    pub fn shared() -> SharedJobStore {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Append a job unless it is a duplicate delivery.
    ///
    /// Remote ids are deduplicated; local jobs all share the sentinel id and
    /// are always appended. Returns whether an insertion occurred.
    pub fn insert(&mut self, id: JobId, payload: impl Into<String>) -> bool {
        if !id.is_local() && self.contains(&id) {
            return false;
        }
        self.jobs.push(QueuedJob {
            id,
            payload: payload.into(),
        });
        true
    }

    /// Whether a job with this id is currently queued.
    pub fn contains(&self, id: &JobId) -> bool {
        self.jobs.iter().any(|job| job.id == *id)
    }

    /// Remove the first entry matching `id`.
    ///
    /// Absence is not an error: the driver sends several update calls for one
    /// logical completion, so late removals routinely find nothing.
    pub fn remove(&mut self, id: &JobId) -> bool {
        match self.jobs.iter().position(|job| job.id == *id) {
            Some(index) => {
                self.jobs.remove(index);
                true
            }
            None => false,
        }
    }

    /// Current queue contents in insertion order.
    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            ids: self.jobs.iter().map(|job| job.id.as_wire().to_string()).collect(),
            data: self.jobs.iter().map(|job| job.payload.clone()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
