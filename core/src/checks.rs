//! # Gateway Check Suite
//!
//! Runs the checks that tell whether a local gateway is usable:
//!
//! 1. **Ports**: is anything listening on the paper or live port?
//! 2. **API connection**: does the gateway acknowledge an API session in time?
//!
//! Each check yields a [`CheckReport`]. A missing API client yields
//! [`CheckStatus::Skipped`], never a failure.

use std::sync::Arc;
use std::time::Instant;

use gatecheck_common::config::{Config, GatewayMode};
use gatecheck_common::outcome::{CheckReport, CheckStatus, ProbeOutcome};
use gatecheck_common::{success, warn};

use crate::error::ProbeError;
use crate::network::tcp::{self, PortStatus};
use crate::prober;
use crate::session::SessionClient;

pub const PORT_CHECK: &str = "Gateway Ports";
pub const API_CHECK: &str = "API Connection";

pub async fn run_checks(
    cfg: &Config,
    client: Result<Arc<dyn SessionClient>, ProbeError>,
) -> anyhow::Result<Vec<CheckReport>> {
    let ports: CheckReport = run_port_check(cfg).await?;
    let api: CheckReport = run_api_check(cfg, client).await?;
    Ok(vec![ports, api])
}

/// Passes when either gateway port accepts a connection.
pub async fn run_port_check(cfg: &Config) -> anyhow::Result<CheckReport> {
    let targets = vec![
        (GatewayMode::Paper, cfg.endpoint(GatewayMode::Paper)?),
        (GatewayMode::Live, cfg.endpoint(GatewayMode::Live)?),
    ];

    let start: Instant = Instant::now();
    let port_timeout = cfg.port_timeout;
    let statuses: Vec<PortStatus> =
        tcp::scan_ports(targets, |endpoint| tcp::port_probe(endpoint, port_timeout)).await;

    for status in &statuses {
        if status.open {
            success!("gateway is listening on {} port {}", status.mode, status.endpoint.port);
        } else {
            warn!("gateway not detected on {} port {}", status.mode, status.endpoint.port);
        }
    }

    let passed: bool = statuses.iter().any(|status| status.open);
    let status: CheckStatus = if passed { CheckStatus::Passed } else { CheckStatus::Failed };

    let report: CheckReport = statuses.iter().fold(
        CheckReport::new(PORT_CHECK, status, start.elapsed()),
        |report, port| {
            let state: &str = if port.open { "open" } else { "closed" };
            report.with_detail(port.mode.to_string(), format!("{} {state}", port.endpoint))
        },
    );
    Ok(report)
}

/// Probes the configured API endpoint for a session acknowledgment.
pub async fn run_api_check(
    cfg: &Config,
    client: Result<Arc<dyn SessionClient>, ProbeError>,
) -> anyhow::Result<CheckReport> {
    let endpoint = cfg.api_endpoint()?;

    let client: Arc<dyn SessionClient> = match client {
        Ok(client) => client,
        Err(ProbeError::LibraryUnavailable) => {
            warn!("gateway API client not built in, skipping connection test");
            let reason: String = ProbeError::LibraryUnavailable.to_string();
            let status: CheckStatus = CheckStatus::Skipped { reason };
            return Ok(CheckReport::new(API_CHECK, status, Default::default())
                .with_detail("endpoint", endpoint.to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let start: Instant = Instant::now();
    let outcome: ProbeOutcome =
        prober::probe(client, endpoint.clone(), cfg.client_id, cfg.api_timeout).await?;
    let elapsed = start.elapsed();

    let status: CheckStatus = match &outcome {
        ProbeOutcome::Acknowledged { next_valid_id } => {
            success!("connected, next valid order id: {next_valid_id}");
            CheckStatus::Passed
        }
        ProbeOutcome::TimedOut => {
            warn!("no acknowledgment from {endpoint} within {:?}", cfg.api_timeout);
            CheckStatus::Failed
        }
        ProbeOutcome::Unavailable { reason } => {
            warn!("cannot connect to gateway: {reason}");
            CheckStatus::Failed
        }
    };

    Ok(CheckReport::new(API_CHECK, status, elapsed)
        .with_detail("endpoint", endpoint.to_string())
        .with_detail("client", cfg.client_id.to_string())
        .with_detail("outcome", outcome.to_string()))
}
