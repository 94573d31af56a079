// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Lookup service — the driver's read path.
//
// The print driver polls on a short fixed interval, so this is pure and
// silent when the queue is empty; an idle counter would otherwise flood the
// logs with identical lines.

use tracing::info;

use spoolbridge_core::types::QueueSnapshot;

use crate::store::SharedJobStore;

/// Read-only view over the job queue for the polling print driver.
#[derive(Debug, Clone)]
pub struct LookupService {
    store: SharedJobStore,
}

impl LookupService {
    pub fn new(store: SharedJobStore) -> Self {
        Self { store }
    }

    /// Snapshot the queue. Never fails, never mutates.
    pub fn lookup(&self) -> QueueSnapshot {
        let snapshot = self.store.lock().expect("job store lock poisoned").snapshot();

        if !snapshot.is_empty() {
            info!(ids = ?snapshot.ids, "queue looked up with jobs waiting");
        }

        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::store::JobStore;
    use spoolbridge_core::types::JobId;

    #[test]
    fn lookup_is_pure() {
        let store = JobStore::shared();
        store
            .lock()
            .expect("lock")
            .insert(JobId::Remote("42".into()), "hello world");

        let lookup = LookupService::new(Arc::clone(&store));
        let first = lookup.lookup();
        let second = lookup.lookup();

        assert_eq!(first, second);
        assert_eq!(first.ids, vec!["42"]);
        assert_eq!(store.lock().expect("lock").len(), 1);
    }

    #[test]
    fn empty_queue_yields_empty_snapshot() {
        let lookup = LookupService::new(JobStore::shared());
        assert!(lookup.lookup().is_empty());
    }
}
