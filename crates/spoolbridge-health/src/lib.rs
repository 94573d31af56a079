// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Spoolbridge Health — tracks the device's most recent health status and
// reports it to the vendor API on a heartbeat, plus a best-effort shadow
// record for manual inspection. Reporting failures never reach the job path.

pub mod reporter;
pub mod shadow;
pub mod vendor;

pub use reporter::{ReporterTask, StatusReporter};
pub use shadow::ShadowClient;
pub use vendor::{ExternalService, StatusReport, VendorApiClient};
