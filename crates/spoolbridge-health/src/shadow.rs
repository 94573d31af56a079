// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shadow record writer.
//
// The shadow is a last-write-wins status document kept on a remote endpoint
// so the fleet operator can check a device's most recent state without
// trawling logs. Delivery is at-least-once and every write fully replaces
// the previous document, so redundant pushes are harmless.

use serde_json::json;
use tracing::debug;

use spoolbridge_core::error::{Result, SpoolbridgeError};
use spoolbridge_core::types::HealthStatus;

/// Pushes the current health status to the shadow endpoint.
#[derive(Debug, Clone)]
pub struct ShadowClient {
    endpoint: String,
    client: reqwest::Client,
}

impl ShadowClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Replace the shadow document with the given status.
    ///
    /// The document shape is `{"state": {"reported": <status>}}`, matching
    /// the device-shadow convention the fleet tooling expects.
    pub async fn upsert(&self, status: &HealthStatus) -> Result<()> {
        let document = json!({ "state": { "reported": status } });

        self.client
            .put(&self.endpoint)
            .json(&document)
            .send()
            .await
            .map_err(|e| SpoolbridgeError::Shadow(format!("send: {e}")))?
            .error_for_status()
            .map_err(|e| SpoolbridgeError::Shadow(format!("status: {e}")))?;

        debug!(endpoint = %self.endpoint, "shadow record updated");
        Ok(())
    }
}
