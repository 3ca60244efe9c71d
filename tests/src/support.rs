pub mod gateway;

use gatecheck_common::endpoint::Endpoint;
use tokio::net::TcpListener;

/// A loopback endpoint nothing listens on.
pub async fn closed_endpoint() -> anyhow::Result<Endpoint> {
    let listener: TcpListener = TcpListener::bind("127.0.0.1:0").await?;
    let port: u16 = listener.local_addr()?.port();
    drop(listener);
    Ok(Endpoint::loopback(port)?)
}
