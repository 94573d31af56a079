// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Vendor public-API client.
//
// Health reports are a two-step exchange: authenticate with the vendor
// credentials to obtain a session cookie, then push the current status as a
// service-status record using that cookie. Both steps are form/JSON POSTs
// against the vendor's public API.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use spoolbridge_core::error::{Result, SpoolbridgeError};
use spoolbridge_core::types::{Credentials, HealthState, HealthStatus};

/// Path for vendor login (form-encoded credentials, cookie in response).
const LOGIN_PATH: &str = "/v1/current-vendor/login";

/// Path for pushing an external-service status record (JSON, cookie auth).
const STATUS_PATH: &str = "/v1/current-vendor/external-service/status";

/// Identity block attached to every status report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalService {
    pub service_vendor_user: String,
    pub service_type: String,
    pub service_version: String,
}

impl ExternalService {
    /// Build the identity for this device and component.
    ///
    /// The service type follows the fleet convention
    /// `print-{thing}-{component}` so one device can report its HTTP and
    /// message-bus components separately.
    pub fn for_device(
        vendor_user: impl Into<String>,
        thing_name: &str,
        component_short_name: &str,
        version: impl Into<String>,
    ) -> Self {
        Self {
            service_vendor_user: vendor_user.into(),
            service_type: format!("print-{thing_name}-{component_short_name}"),
            service_version: version.into(),
        }
    }
}

/// One health report as the vendor API expects it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub external_service: ExternalService,
    pub status: HealthState,
    pub message: String,
    pub last_success_id: String,
    pub last_success_time: DateTime<Utc>,
}

impl StatusReport {
    /// Snapshot the current health status into a report body.
    pub fn from_health(identity: ExternalService, health: &HealthStatus) -> Self {
        Self {
            external_service: identity,
            status: health.status,
            message: health.message.clone(),
            last_success_id: health.print_job_id.clone(),
            last_success_time: Utc::now(),
        }
    }
}

/// HTTP client for the vendor's public API.
#[derive(Debug, Clone)]
pub struct VendorApiClient {
    base_url: String,
    credentials: Credentials,
    client: reqwest::Client,
}

impl VendorApiClient {
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            client: reqwest::Client::new(),
        }
    }

    /// Authenticate and return the session cookie.
    pub async fn login(&self) -> Result<String> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, LOGIN_PATH))
            .form(&[
                ("username", self.credentials.username.as_str()),
                ("password", self.credentials.password.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SpoolbridgeError::VendorApi(format!("login: {e}")))?
            .error_for_status()
            .map_err(|e| SpoolbridgeError::VendorApi(format!("login: {e}")))?;

        let cookie = response
            .headers()
            .get(reqwest::header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                SpoolbridgeError::VendorApi("login response carried no auth cookie".into())
            })?;

        debug!("vendor login succeeded");
        Ok(cookie.to_string())
    }

    /// Push one status record using a previously obtained cookie.
    pub async fn push_status(&self, auth_cookie: &str, report: &StatusReport) -> Result<()> {
        self.client
            .post(format!("{}{}", self.base_url, STATUS_PATH))
            .header(reqwest::header::COOKIE, auth_cookie)
            .json(report)
            .send()
            .await
            .map_err(|e| SpoolbridgeError::VendorApi(format!("status push: {e}")))?
            .error_for_status()
            .map_err(|e| SpoolbridgeError::VendorApi(format!("status push: {e}")))?;

        debug!(status = %report.status, "health report delivered");
        Ok(())
    }

    /// Full report cycle: authenticate, then push.
    pub async fn report(&self, report: &StatusReport) -> Result<()> {
        let cookie = self.login().await?;
        self.push_status(&cookie, report).await
    }
}
