use thiserror::Error;

/// Faults that stop a probe from running at all.
///
/// Refusals and timeouts are not errors; they are
/// [`ProbeOutcome`](gatecheck_common::outcome::ProbeOutcome) variants.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("gateway API client is not available in this build")]
    LibraryUnavailable,

    #[error("probe timeout must be positive")]
    InvalidTimeout,
}
