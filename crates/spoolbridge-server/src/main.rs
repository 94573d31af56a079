// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Spoolbridge — Cloud-to-Counter Print Job Relay
//
// Entry point. Resolves configuration, initialises logging, wires the relay
// components, starts the health heartbeat and bus listener, and serves the
// HTTP surface the print driver polls.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;

use spoolbridge_core::config::{DEFAULT_HEARTBEAT, DEFAULT_HTTP_PORT, RelayConfig};
use spoolbridge_core::error::Result;
use spoolbridge_core::types::Credentials;
use spoolbridge_health::{ExternalService, ShadowClient, StatusReporter, VendorApiClient};
use spoolbridge_relay::{
    CompletionReconciler, JobStore, LookupService, PrintServerClient, SubmissionGateway,
};
use spoolbridge_server::{AppState, BusEvent, COMPONENT_SHORT_NAME, bus, router};

#[derive(Debug, Parser)]
#[command(name = "spoolbridge", version, about = "Cloud-to-counter print job relay")]
struct Args {
    /// Base URL of the print-server backend that tracks remote job status.
    #[arg(long, env = "PRINT_SERVER_URL")]
    print_server_url: String,

    /// Base URL of the vendor's public API, used for health reporting.
    #[arg(long, env = "DATAPOS_API_URL")]
    datapos_api_url: String,

    /// Vendor username for the public API.
    #[arg(long, env = "VENDOR_USERNAME")]
    vendor_username: String,

    /// Vendor password for the public API.
    #[arg(long, env = "VENDOR_PASSWORD")]
    vendor_password: String,

    /// Version string reported with every health push.
    #[arg(long, env = "COMPONENT_VERSION", default_value = env!("CARGO_PKG_VERSION"))]
    component_version: String,

    /// Name of this device in the fleet.
    #[arg(long, env = "AWS_IOT_THING_NAME", default_value = "unknown")]
    thing_name: String,

    /// Port to serve the relay HTTP surface on.
    #[arg(long, env = "HTTP_PORT", default_value_t = DEFAULT_HTTP_PORT)]
    http_port: u16,

    /// Optional endpoint for the last-write-wins shadow record.
    #[arg(long, env = "SHADOW_URL")]
    shadow_url: Option<String>,

    /// Seconds between health reports to the vendor API.
    #[arg(long, env = "HEARTBEAT_SECS", default_value_t = DEFAULT_HEARTBEAT.as_secs())]
    heartbeat_secs: u64,
}

impl Args {
    fn into_config(self) -> RelayConfig {
        RelayConfig {
            http_port: self.http_port,
            print_server_url: self.print_server_url,
            datapos_api_url: self.datapos_api_url,
            vendor_username: self.vendor_username,
            vendor_password: self.vendor_password,
            component_version: self.component_version,
            thing_name: self.thing_name,
            shadow_url: self.shadow_url,
            heartbeat_interval: Duration::from_secs(self.heartbeat_secs),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Args::parse().into_config();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Log the resolved options (password withheld) the way the fleet expects.
    tracing::info!(
        version = %config.component_version,
        print_server_url = %config.print_server_url,
        datapos_api_url = %config.datapos_api_url,
        vendor_username = %config.vendor_username,
        thing_name = %config.thing_name,
        http_port = config.http_port,
        "spoolbridge starting"
    );

    let shadow = config.shadow_url.as_deref().map(ShadowClient::new);
    let reporter = StatusReporter::new(&config.component_version, shadow);

    let store = JobStore::shared();
    let gateway = SubmissionGateway::new(Arc::clone(&store), reporter.clone());
    let state = AppState {
        gateway: gateway.clone(),
        lookup: LookupService::new(Arc::clone(&store)),
        reconciler: CompletionReconciler::new(
            Arc::clone(&store),
            PrintServerClient::new(&config.print_server_url),
            reporter.clone(),
        ),
    };

    // Heartbeat to the vendor API, held for the process lifetime.
    let vendor = VendorApiClient::new(
        &config.datapos_api_url,
        Credentials::new(&config.vendor_username, &config.vendor_password),
    );
    let identity = ExternalService::for_device(
        &config.vendor_username,
        &config.thing_name,
        COMPONENT_SHORT_NAME,
        &config.component_version,
    );
    let _heartbeat = reporter.start_reporting(vendor, identity, config.heartbeat_interval);

    // The embedded bus transport feeds this channel. The sender is held open
    // for the process lifetime so an attached bridge can deliver events.
    let (_bus_feed, bus_events) = mpsc::channel::<BusEvent>(32);
    let _listener = bus::spawn_listener(
        bus_events,
        gateway,
        reporter.clone(),
        config.thing_name.clone(),
    );

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "serving relay HTTP surface");
    axum::serve(listener, router(state)).await?;

    Ok(())
}
