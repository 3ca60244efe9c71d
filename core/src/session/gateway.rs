use async_trait::async_trait;
use gatecheck_common::endpoint::Endpoint;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, trace};

use super::{SessionClient, SessionEvent};
use crate::wire::{self, InboundMessage, ServerHello, WireError};

/// Speaks the gateway socket API far enough to be handed a next valid order id.
#[derive(Debug, Default, Clone)]
pub struct GatewayClient;

#[async_trait]
impl SessionClient for GatewayClient {
    async fn run(&self, endpoint: Endpoint, client_id: i32, events: UnboundedSender<SessionEvent>) {
        let mut stream: TcpStream = match TcpStream::connect(endpoint.address()).await {
            Ok(stream) => stream,
            Err(e) => {
                debug!("connect to {endpoint} failed: {e}");
                let _ = events.send(SessionEvent::connect_failed(&endpoint, e));
                return;
            }
        };

        let reason: String = match session(&mut stream, client_id, &events).await {
            Ok(Finished::Acknowledged) => {
                let _ = stream.shutdown().await;
                return;
            }
            Ok(Finished::NobodyListening) => return,
            Ok(Finished::ClosedByPeer) => format!("{endpoint} closed the session"),
            Err(e) => format!("session with {endpoint} failed: {e}"),
        };

        debug!("{reason}");
        let _ = events.send(SessionEvent::Closed { reason });
    }
}

enum Finished {
    Acknowledged,
    ClosedByPeer,
    NobodyListening,
}

async fn session(
    stream: &mut TcpStream,
    client_id: i32,
    events: &UnboundedSender<SessionEvent>,
) -> Result<Finished, WireError> {
    stream.write_all(&wire::handshake()).await?;

    let hello: ServerHello = match wire::read_frame(stream).await {
        Ok(payload) => ServerHello::parse(&payload)?,
        Err(WireError::Closed) => return Ok(Finished::ClosedByPeer),
        Err(e) => return Err(e),
    };
    debug!(
        server_version = hello.version,
        connection_time = %hello.connection_time,
        "gateway handshake accepted"
    );

    stream.write_all(&wire::start_api(client_id, hello.version)).await?;

    loop {
        let payload: Vec<u8> = match wire::read_frame(stream).await {
            Ok(payload) => payload,
            Err(WireError::Closed) => return Ok(Finished::ClosedByPeer),
            Err(e) => return Err(e),
        };

        let event: SessionEvent = match InboundMessage::parse(&payload)? {
            InboundMessage::NextValidId { order_id } => {
                let _ = events.send(SessionEvent::Acknowledged { next_valid_id: order_id });
                return Ok(Finished::Acknowledged);
            }
            InboundMessage::Error { request_id, code, message } => {
                SessionEvent::Error { request_id, code, message }
            }
            InboundMessage::Other { id } => {
                trace!("ignoring message {id}");
                continue;
            }
        };

        if events.send(event).is_err() {
            return Ok(Finished::NobodyListening);
        }
    }
}
