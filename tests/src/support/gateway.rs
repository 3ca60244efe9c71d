//! A scripted stand-in for the trading gateway's socket API.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use gatecheck_common::endpoint::Endpoint;
use gatecheck_core::wire;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

pub const SERVER_VERSION: i32 = 176;

#[derive(Clone, Copy, Debug)]
pub enum Behavior {
    /// Completes the handshake, sends an informational error, then the next valid id.
    Acknowledge { delay: Duration, next_valid_id: i64 },
    /// Reads everything, answers nothing.
    Silent,
    /// Answers the version exchange, then hangs up.
    HangUpAfterHello,
}

pub struct FakeGateway {
    pub port: u16,
    accepted: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
    handle: JoinHandle<()>,
}

impl FakeGateway {
    pub async fn spawn(behavior: Behavior) -> anyhow::Result<Self> {
        let listener: TcpListener = TcpListener::bind("127.0.0.1:0").await?;
        let port: u16 = listener.local_addr()?.port();
        let accepted: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
        let closed: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));

        let accepted_ref = accepted.clone();
        let closed_ref = closed.clone();
        let handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                accepted_ref.fetch_add(1, Ordering::SeqCst);
                let closed_ref = closed_ref.clone();
                tokio::spawn(async move {
                    let _ = serve(stream, behavior).await;
                    closed_ref.fetch_add(1, Ordering::SeqCst);
                });
            }
        });

        Ok(Self { port, accepted, closed, handle })
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new("127.0.0.1", self.port).expect("listener port is never zero")
    }

    pub fn accepted(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }

    /// Sessions whose client side has gone away.
    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    /// Polls until `count` sessions have been closed by the client, or `within` passes.
    pub async fn wait_for_closed(&self, count: usize, within: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + within;
        while tokio::time::Instant::now() < deadline {
            if self.closed() >= count {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.closed() >= count
    }
}

impl Drop for FakeGateway {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve(mut stream: TcpStream, behavior: Behavior) -> anyhow::Result<()> {
    let mut prefix: [u8; 4] = [0; 4];
    stream.read_exact(&mut prefix).await?;
    anyhow::ensure!(&prefix == wire::API_PREFIX, "bad API prefix {prefix:?}");
    let _versions: Vec<u8> = wire::read_frame(&mut stream).await?;

    if let Behavior::Silent = behavior {
        return drain(stream).await;
    }

    let hello = wire::encode_fields(&[SERVER_VERSION.to_string(), "20260115 09:30:00 EST".to_string()]);
    stream.write_all(&wire::frame(&hello)).await?;

    if let Behavior::HangUpAfterHello = behavior {
        return Ok(());
    }

    let _start_api: Vec<u8> = wire::read_frame(&mut stream).await?;

    if let Behavior::Acknowledge { delay, next_valid_id } = behavior {
        tokio::time::sleep(delay).await;
        let farm_ok = wire::encode_fields(&["4", "2", "-1", "2104", "Market data farm connection is OK"]);
        stream.write_all(&wire::frame(&farm_ok)).await?;
        let accounts = wire::encode_fields(&["15", "1", "DU1234567"]);
        stream.write_all(&wire::frame(&accounts)).await?;
        let next_id = wire::encode_fields(&["9".to_string(), "1".to_string(), next_valid_id.to_string()]);
        stream.write_all(&wire::frame(&next_id)).await?;
    }

    drain(stream).await
}

/// Reads until the client hangs up.
async fn drain(mut stream: TcpStream) -> anyhow::Result<()> {
    let mut buf: [u8; 512] = [0; 512];
    while stream.read(&mut buf).await? > 0 {}
    Ok(())
}
