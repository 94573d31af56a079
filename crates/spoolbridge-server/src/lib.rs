// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Spoolbridge Server — the relay daemon's HTTP surface and message-bus
// listener. The router is exported so integration tests can drive the full
// submit/lookup/update flow in-process.

pub mod bus;
pub mod http;

pub use bus::{BusEvent, spawn_listener};
pub use http::{AppState, router};

/// Short name identifying this component in fleet health reports.
pub const COMPONENT_SHORT_NAME: &str = "http";
