#![cfg(test)]
use std::sync::Arc;
use std::time::{Duration, Instant};

use gatecheck_common::config::Config;
use gatecheck_common::endpoint::Endpoint;
use gatecheck_common::outcome::{CheckStatus, ProbeOutcome};
use gatecheck_core::checks;
use gatecheck_core::prober;
use gatecheck_core::session::{GatewayClient, SessionClient};

use crate::support::closed_endpoint;
use crate::support::gateway::{Behavior, FakeGateway};

const CLIENT_ID: i32 = 999;

fn client() -> Arc<dyn SessionClient> {
    Arc::new(GatewayClient)
}

/// The client sees the acknowledgment shortly after the gateway sends it.
#[tokio::test]
async fn probe_acknowledged_by_gateway() {
    let gateway = FakeGateway::spawn(Behavior::Acknowledge {
        delay: Duration::from_millis(200),
        next_valid_id: 42,
    })
    .await
    .unwrap();

    let start: Instant = Instant::now();
    let outcome = prober::probe(client(), gateway.endpoint(), CLIENT_ID, Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(outcome, ProbeOutcome::Acknowledged { next_valid_id: 42 });
    assert!(start.elapsed() >= Duration::from_millis(200));
    assert!(start.elapsed() < Duration::from_secs(2), "took {:?}", start.elapsed());
    assert!(gateway.wait_for_closed(1, Duration::from_secs(2)).await, "session was not released");
}

#[tokio::test]
async fn probe_silent_gateway_times_out_and_releases_socket() {
    let gateway = FakeGateway::spawn(Behavior::Silent).await.unwrap();
    let timeout: Duration = Duration::from_millis(500);

    let start: Instant = Instant::now();
    let outcome = prober::probe(client(), gateway.endpoint(), CLIENT_ID, timeout).await.unwrap();
    let elapsed: Duration = start.elapsed();

    assert_eq!(outcome, ProbeOutcome::TimedOut);
    assert!(elapsed >= timeout);
    assert!(elapsed < timeout + Duration::from_millis(500), "took {elapsed:?}");
    assert_eq!(gateway.accepted(), 1);
    assert!(gateway.wait_for_closed(1, Duration::from_secs(2)).await, "socket leaked after timeout");
}

#[tokio::test]
async fn probe_closed_port_is_unavailable_well_before_deadline() {
    let endpoint: Endpoint = closed_endpoint().await.unwrap();

    let start: Instant = Instant::now();
    let outcome = prober::probe(client(), endpoint, CLIENT_ID, Duration::from_secs(5)).await.unwrap();

    assert!(
        matches!(outcome, ProbeOutcome::Unavailable { .. } | ProbeOutcome::TimedOut),
        "unexpected outcome {outcome:?}"
    );
    if let ProbeOutcome::Unavailable { reason } = &outcome {
        assert!(reason.contains("couldn't connect"), "reason was {reason}");
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}

#[tokio::test]
async fn probe_gateway_hanging_up_is_unavailable() {
    let gateway = FakeGateway::spawn(Behavior::HangUpAfterHello).await.unwrap();

    let outcome = prober::probe(client(), gateway.endpoint(), CLIENT_ID, Duration::from_secs(5))
        .await
        .unwrap();

    assert!(matches!(outcome, ProbeOutcome::Unavailable { .. }), "unexpected outcome {outcome:?}");
}

#[tokio::test]
async fn repeated_probes_against_silent_gateway_agree() {
    let gateway = FakeGateway::spawn(Behavior::Silent).await.unwrap();
    let timeout: Duration = Duration::from_millis(300);

    let first = prober::probe(client(), gateway.endpoint(), CLIENT_ID, timeout).await.unwrap();
    let second = prober::probe(client(), gateway.endpoint(), CLIENT_ID, timeout).await.unwrap();

    assert_eq!(first, ProbeOutcome::TimedOut);
    assert_eq!(first, second);
    assert_eq!(gateway.accepted(), 2);
    assert!(gateway.wait_for_closed(2, Duration::from_secs(2)).await, "a session leaked");
}

#[tokio::test]
async fn repeated_probes_against_closed_port_agree() {
    let endpoint: Endpoint = closed_endpoint().await.unwrap();
    let timeout: Duration = Duration::from_secs(2);

    let first = prober::probe(client(), endpoint.clone(), CLIENT_ID, timeout).await.unwrap();
    let second = prober::probe(client(), endpoint, CLIENT_ID, timeout).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn suite_passes_with_paper_gateway_and_closed_live_port() {
    let gateway = FakeGateway::spawn(Behavior::Acknowledge {
        delay: Duration::ZERO,
        next_valid_id: 1,
    })
    .await
    .unwrap();
    let live: Endpoint = closed_endpoint().await.unwrap();

    let cfg: Config = Config {
        paper_port: gateway.port,
        live_port: live.port,
        port_timeout: Duration::from_millis(500),
        api_timeout: Duration::from_secs(2),
        ..Config::default()
    };

    let reports = checks::run_checks(&cfg, Ok(client())).await.unwrap();

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].name, checks::PORT_CHECK);
    assert_eq!(reports[0].status, CheckStatus::Passed);
    assert_eq!(reports[1].name, checks::API_CHECK);
    assert_eq!(reports[1].status, CheckStatus::Passed);
}

#[tokio::test]
async fn suite_fails_when_nothing_listens() {
    let cfg: Config = Config {
        paper_port: closed_endpoint().await.unwrap().port,
        live_port: closed_endpoint().await.unwrap().port,
        port_timeout: Duration::from_millis(500),
        api_timeout: Duration::from_millis(500),
        ..Config::default()
    };

    let reports = checks::run_checks(&cfg, Ok(client())).await.unwrap();

    assert!(reports.iter().all(|report| report.status == CheckStatus::Failed));
}

/// Needs a real gateway on the paper port.
#[tokio::test]
#[ignore]
async fn probe_local_paper_gateway() {
    let endpoint: Endpoint = Endpoint::loopback(7497).unwrap();
    let outcome = prober::probe(client(), endpoint, CLIENT_ID, Duration::from_secs(5)).await.unwrap();
    assert!(outcome.is_acknowledged(), "gateway did not acknowledge: {outcome}");
}
