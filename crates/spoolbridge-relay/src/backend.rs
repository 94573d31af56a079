// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Print-server backend client.
//
// The backend is the durable record of remote jobs; telling it a job is
// Completed is what stops it from retrying delivery. Anything the driver
// reports that is not literally "Completed" — including raw exception text —
// is forwarded as Active so the backend treats the job as retryable instead
// of choking on an unrecognised terminal state.

use tracing::debug;

use spoolbridge_core::error::{Result, SpoolbridgeError};
use spoolbridge_core::types::Credentials;

/// Driver status string that marks a job as done.
const DRIVER_COMPLETED: &str = "Completed";

/// The only two statuses the backend accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendJobStatus {
    Completed,
    Active,
}

impl BackendJobStatus {
    /// Normalise whatever the driver sent into a backend-valid status.
    pub fn from_driver_status(status: &str) -> Self {
        if status == DRIVER_COMPLETED {
            Self::Completed
        } else {
            Self::Active
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Active => "Active",
        }
    }

    pub fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// HTTP client for the print-server backend's job-status endpoint.
#[derive(Debug, Clone)]
pub struct PrintServerClient {
    base_url: String,
    client: reqwest::Client,
}

impl PrintServerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Use a pre-configured HTTP client (timeouts, proxies).
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Report a job's status, passing the operator credentials through.
    pub async fn update(
        &self,
        id: &str,
        status: BackendJobStatus,
        credentials: &Credentials,
    ) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/update", self.base_url))
            .form(&[
                ("id", id),
                ("status", status.as_str()),
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SpoolbridgeError::RemoteUpdate(format!("send: {e}")))?;

        if !response.status().is_success() {
            return Err(SpoolbridgeError::RemoteUpdate(format!(
                "backend answered {}",
                response.status()
            )));
        }

        debug!(job_id = id, status = status.as_str(), "backend accepted job update");
        Ok(())
    }
}
