use gatecheck_common::config::GatewayMode;
use gatecheck_common::endpoint::Endpoint;
use std::future::Future;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

/// Reachability of one gateway port.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortStatus {
    pub mode: GatewayMode,
    pub endpoint: Endpoint,
    pub open: bool,
}

pub async fn scan_ports<F, Fut>(
    targets: Vec<(GatewayMode, Endpoint)>,
    mut prober: F,
) -> Vec<PortStatus>
where
    F: FnMut(Endpoint) -> Fut,
    Fut: Future<Output = bool>,
{
    let mut result: Vec<PortStatus> = Vec::with_capacity(targets.len());
    for (mode, endpoint) in targets {
        let open: bool = prober(endpoint.clone()).await;
        result.push(PortStatus { mode, endpoint, open });
    }
    result
}

/// Plain TCP connect. The stream is dropped as soon as it is established.
pub async fn port_probe(endpoint: Endpoint, probe_timeout: Duration) -> bool {
    match timeout(probe_timeout, TcpStream::connect(endpoint.address())).await {
        Ok(Ok(stream)) => {
            drop(stream);
            debug!("{endpoint} accepted a connection");
            true
        }
        Ok(Err(e)) => {
            debug!("{endpoint} refused: {e}");
            false
        }
        Err(_elapsed) => {
            debug!("{endpoint} did not answer within {probe_timeout:?}");
            false
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
