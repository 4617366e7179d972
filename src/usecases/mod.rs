//! Use case layer: timed sessions and shell orchestration.

pub mod bootstrap;
pub mod calculate;
pub mod chat_session;
pub mod context;
pub mod contracts;
pub mod loader;
pub mod offer_session;
pub mod shell;
pub mod shell_state;

/// Returns the usecases module name for smoke checks.
pub fn module_name() -> &'static str {
    "usecases"
}
