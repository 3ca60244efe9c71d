//! Logging macros used across the workspace.
//!
//! They forward to `tracing`. Successes go through a dedicated target so the
//! terminal formatter can render them differently from ordinary info lines.

/// Target used by [`success!`](crate::success).
pub const SUCCESS_TARGET: &str = "gatecheck::success";

/// Target used for raw, unprefixed terminal output.
pub const PRINT_TARGET: &str = "gatecheck::print";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: $crate::log::SUCCESS_TARGET, $($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::tracing::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!($($arg)*)
    };
}
