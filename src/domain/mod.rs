//! Domain layer: core entities and business rules.

pub mod calculator;
pub mod chat;
pub mod events;
pub mod offer;
pub mod progress;
pub mod response_rules;
pub mod text_input;
pub mod wizard;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
