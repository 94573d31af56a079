// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Relay configuration, resolved at startup from CLI options/environment.

use std::time::Duration;

/// Default port for the relay's HTTP surface. The print driver polls this.
pub const DEFAULT_HTTP_PORT: u16 = 8083;

/// Default period between health reports to the vendor API.
pub const DEFAULT_HEARTBEAT: Duration = Duration::from_secs(60);

/// Everything the relay needs to know about its surroundings.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Port to serve `/submit`, `/lookup` and `/update` on.
    pub http_port: u16,
    /// Base URL of the print-server backend that tracks job status and
    /// decides when to stop retrying a job.
    pub print_server_url: String,
    /// Base URL of the vendor's public API, used for health reporting.
    pub datapos_api_url: String,
    /// Vendor username for authenticating with the public API.
    pub vendor_username: String,
    /// Vendor password for authenticating with the public API.
    pub vendor_password: String,
    /// Version string reported with every health push and log line.
    pub component_version: String,
    /// Name of this device in the fleet (used in the reported service type).
    pub thing_name: String,
    /// Optional endpoint for the last-write-wins shadow record.
    pub shadow_url: Option<String>,
    /// Period between health reports.
    pub heartbeat_interval: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            print_server_url: String::new(),
            datapos_api_url: String::new(),
            vendor_username: String::new(),
            vendor_password: String::new(),
            component_version: env!("CARGO_PKG_VERSION").to_string(),
            thing_name: String::new(),
            shadow_url: None,
            heartbeat_interval: DEFAULT_HEARTBEAT,
        }
    }
}
