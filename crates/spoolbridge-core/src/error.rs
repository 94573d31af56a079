// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Spoolbridge.

use thiserror::Error;

/// Top-level error type for all Spoolbridge operations.
#[derive(Debug, Error)]
pub enum SpoolbridgeError {
    // -- Job relay errors --
    #[error("invalid submission payload: {0}")]
    InvalidInput(String),

    #[error("print-server update failed: {0}")]
    RemoteUpdate(String),

    // -- Health reporting errors --
    #[error("vendor API request failed: {0}")]
    VendorApi(String),

    #[error("shadow record update failed: {0}")]
    Shadow(String),

    // -- Infrastructure --
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SpoolbridgeError>;
