//! # Gatecheck Core
//!
//! Connectivity checks for a locally running trading gateway.
//!
//! * **[`prober`]**: the bounded connectivity prober. Starts a session on a
//!   background task and waits for one acknowledgment until a deadline.
//! * **[`session`]**: the [`SessionClient`](session::SessionClient) seam and the
//!   gateway API handshake client behind the `api` feature.
//! * **[`network`]**: plain TCP port checks.
//! * **[`checks`]**: the check suite the CLI runs.

pub mod checks;
pub mod error;
pub mod network;
pub mod prober;
pub mod session;

#[cfg(feature = "api")]
pub mod wire;
