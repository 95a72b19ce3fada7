//! Agora Resolution
//!
//! Winner selection and transfer application for the proposals collected
//! in one turn of the negotiation simulation.

mod engine;
mod first_come;
mod price_priority;

pub use engine::{ResolutionEngine, TurnResolution};
pub use first_come::FirstComeFirstServed;
pub use price_priority::PricePriority;

// Re-export the trait from ports for convenience
pub use agora_ports::SelectionRule;

/// Factory function to create selection rules by name
pub fn create_selection_rule(rule_type: &str) -> Box<dyn SelectionRule> {
    match rule_type.to_lowercase().as_str() {
        "first-come" | "fifo" => Box::new(FirstComeFirstServed),
        _ => Box::new(PricePriority), // Default
    }
}
