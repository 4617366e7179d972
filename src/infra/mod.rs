//! Infrastructure layer: adapters for config, logging, timers, and randomness.

pub mod config;
pub mod contracts;
pub mod error;
pub mod logging;
pub mod random;
pub mod storage_layout;
#[cfg(test)]
pub mod stubs;
pub mod timers;

/// Returns the infra module name for smoke checks.
pub fn module_name() -> &'static str {
    "infra"
}
