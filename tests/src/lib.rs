//! Loopback integration tests for the gatecheck prober and check suite.

pub mod support;

#[cfg(test)]
mod probe;
