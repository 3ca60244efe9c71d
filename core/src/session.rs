//! The seam between the prober and whatever speaks to the gateway.
//!
//! A [`SessionClient`] runs on a background task and reports what happens
//! through a channel. The prober only listens for the first decisive event.

use std::sync::Arc;

use async_trait::async_trait;
use gatecheck_common::endpoint::Endpoint;
use tokio::sync::mpsc::UnboundedSender;

use crate::error::ProbeError;

#[cfg(feature = "api")]
mod gateway;

#[cfg(feature = "api")]
pub use gateway::GatewayClient;

/// Gateway error code: could not connect.
pub const CONNECT_FAIL: i32 = 502;
/// Gateway error code: not connected. Emitted while disconnecting.
pub const NOT_CONNECTED: i32 = 504;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The gateway acknowledged the session with its next valid order id.
    Acknowledged { next_valid_id: i64 },
    /// An error reported by the gateway, or by the client on its behalf.
    Error { request_id: i64, code: i32, message: String },
    /// The session ended without acknowledgment.
    Closed { reason: String },
}

impl SessionEvent {
    pub fn connect_failed(endpoint: &Endpoint, cause: impl std::fmt::Display) -> Self {
        SessionEvent::Error {
            request_id: -1,
            code: CONNECT_FAIL,
            message: format!("couldn't connect to {endpoint}: {cause}"),
        }
    }
}

/// Something that can open a session and report its progress.
///
/// Implementations own the connection and must drop it before `run` returns.
/// Send failures on `events` mean nobody is listening any more and should end
/// the session.
#[async_trait]
pub trait SessionClient: Send + Sync {
    async fn run(&self, endpoint: Endpoint, client_id: i32, events: UnboundedSender<SessionEvent>);
}

/// Returns the gateway API client compiled into this build.
pub fn connector() -> Result<Arc<dyn SessionClient>, ProbeError> {
    #[cfg(feature = "api")]
    {
        Ok(Arc::new(GatewayClient::default()))
    }
    #[cfg(not(feature = "api"))]
    {
        Err(ProbeError::LibraryUnavailable)
    }
}
