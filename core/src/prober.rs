//! # Bounded Connectivity Prober
//!
//! Opens a session on a background task and waits for a single acknowledgment
//! until a deadline. The outcome is always one of three states, see
//! [`ProbeOutcome`]. Refusals and timeouts are outcomes, never errors.
//!
//! The foreground waits on the event channel with [`timeout_at`], so it wakes
//! as soon as something decisive arrives and never later than the deadline.
//! The background task owns the connection; dropping a [`ProbeAttempt`] aborts
//! the task, which drops the socket on every exit path.

use std::sync::Arc;
use std::time::Duration;

use gatecheck_common::endpoint::Endpoint;
use gatecheck_common::outcome::ProbeOutcome;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;
use tokio::time::{Instant, timeout_at};
use gatecheck_common::info;
use tracing::debug;

use crate::error::ProbeError;
use crate::session::{CONNECT_FAIL, NOT_CONNECTED, SessionClient, SessionEvent};

/// Deadline used when `now + timeout` does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// One in-flight probe.
pub struct ProbeAttempt {
    pub endpoint: Endpoint,
    pub client_id: i32,
    pub deadline: Instant,
    acknowledged: Option<i64>,
    events: UnboundedReceiver<SessionEvent>,
    session: JoinHandle<()>,
}

impl ProbeAttempt {
    /// Spawns the session and starts the clock.
    pub fn start(
        client: Arc<dyn SessionClient>,
        endpoint: Endpoint,
        client_id: i32,
        timeout: Duration,
    ) -> Result<Self, ProbeError> {
        if timeout.is_zero() {
            return Err(ProbeError::InvalidTimeout);
        }

        let now: Instant = Instant::now();
        let deadline: Instant = now.checked_add(timeout).unwrap_or_else(|| now + FAR_FUTURE);
        let (tx, events) = mpsc::unbounded_channel::<SessionEvent>();

        let target: Endpoint = endpoint.clone();
        let session: JoinHandle<()> = tokio::spawn(async move {
            client.run(target, client_id, tx).await;
        });

        debug!("probing {endpoint} as client {client_id}, waiting up to {timeout:?}");

        Ok(Self { endpoint, client_id, deadline, acknowledged: None, events, session })
    }

    pub fn acknowledged(&self) -> bool {
        self.acknowledged.is_some()
    }

    /// Waits for the first decisive event or the deadline.
    pub async fn wait(&mut self) -> ProbeOutcome {
        if let Some(next_valid_id) = self.acknowledged {
            return ProbeOutcome::Acknowledged { next_valid_id };
        }

        loop {
            let next = timeout_at(self.deadline, self.events.recv()).await;
            let event: Option<SessionEvent> = match next {
                Ok(event) => event,
                Err(_elapsed) => {
                    debug!("no acknowledgment from {} before the deadline", self.endpoint);
                    return ProbeOutcome::TimedOut;
                }
            };

            match event {
                Some(SessionEvent::Acknowledged { next_valid_id }) => {
                    self.acknowledged = Some(next_valid_id);
                    return ProbeOutcome::Acknowledged { next_valid_id };
                }
                Some(SessionEvent::Error { code: CONNECT_FAIL, message, .. }) => {
                    return ProbeOutcome::Unavailable { reason: message };
                }
                Some(SessionEvent::Error { code: NOT_CONNECTED, .. }) => continue,
                Some(SessionEvent::Error { request_id, code, message }) => {
                    info!("API message [{code}] (request {request_id}): {message}");
                }
                Some(SessionEvent::Closed { reason }) => {
                    return ProbeOutcome::Unavailable { reason };
                }
                None => {
                    return ProbeOutcome::Unavailable {
                        reason: format!("session with {} ended without a reply", self.endpoint),
                    };
                }
            }
        }
    }
}

impl Drop for ProbeAttempt {
    fn drop(&mut self) {
        self.session.abort();
    }
}

/// Runs one bounded probe against `endpoint` and releases it afterwards.
pub async fn probe(
    client: Arc<dyn SessionClient>,
    endpoint: Endpoint,
    client_id: i32,
    timeout: Duration,
) -> Result<ProbeOutcome, ProbeError> {
    let mut attempt: ProbeAttempt = ProbeAttempt::start(client, endpoint, client_id, timeout)?;
    Ok(attempt.wait().await)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
