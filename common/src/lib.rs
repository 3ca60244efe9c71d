//! # Gatecheck Common
//!
//! Models and helpers shared by the prober core and the command line:
//!
//! * **[`endpoint`]**: validated `host:port` targets.
//! * **[`outcome`]**: probe outcomes and check reports.
//! * **[`config`]**: runtime configuration assembled by the CLI.
//! * **[`log`]**: thin `tracing` wrappers with a dedicated "success" channel.

pub mod config;
pub mod endpoint;
pub mod log;
pub mod outcome;

#[doc(hidden)]
pub use tracing;
