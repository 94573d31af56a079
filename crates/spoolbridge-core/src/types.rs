// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Spoolbridge print relay.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire value denoting a locally submitted job with no cloud-side record.
pub const LOCAL_JOB_SENTINEL: &str = "-1";

/// Placeholder used when a health event has no associated print job.
pub const NO_JOB_ID: &str = "N/A";

/// Identity of a print job in the relay queue.
///
/// Remote jobs carry the producer-supplied identifier and are deduplicated
/// against it. Local jobs share the `-1` wire sentinel and are never
/// deduplicated — two concurrent counter submissions are two distinct jobs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JobId {
    /// Locally submitted, no upstream correlation.
    Local,
    /// Delivered from the cloud with this producer-supplied identifier.
    Remote(String),
}

impl JobId {
    /// Parse a job identifier from an optional wire string.
    ///
    /// Absent ids and the explicit sentinel both map to [`JobId::Local`], so a
    /// producer echoing `-1` back can never collide with a queued local job.
    pub fn from_wire(id: Option<&str>) -> Self {
        match id {
            None => Self::Local,
            Some(LOCAL_JOB_SENTINEL) => Self::Local,
            Some(remote) => Self::Remote(remote.to_string()),
        }
    }

    /// The identifier as it appears on the wire.
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Local => LOCAL_JOB_SENTINEL,
            Self::Remote(id) => id,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local)
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Point-in-time view of the queue as the print driver consumes it: parallel
/// id/payload sequences in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSnapshot {
    pub ids: Vec<String>,
    pub data: Vec<String>,
}

impl QueueSnapshot {
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty() && self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

/// Outcome classification for a health event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthState {
    Success,
    Failed,
}

impl std::fmt::Display for HealthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => f.write_str("Success"),
            Self::Failed => f.write_str("Failed"),
        }
    }
}

/// The most recent health event for the device.
///
/// This is a single current value, not a log: every success or failure in the
/// relay overwrites it, and the periodic reporter pushes whatever is current.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: HealthState,
    pub message: String,
    /// Wire id of the associated print job, or `N/A`.
    pub print_job_id: String,
    pub updated_at: DateTime<Utc>,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: HealthState::Success,
            message: String::new(),
            print_job_id: NO_JOB_ID.to_string(),
            updated_at: Utc::now(),
        }
    }
}

/// Vendor credentials passed through to the remote services. The relay never
/// validates these itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}
