//! Agora Ports
//!
//! Port definitions (traits) for the Agora negotiation simulation.
//! These define the boundaries between the simulation core and its
//! external collaborators: the event source, the per-participant decision
//! procedures, the audit sink, and the winner-selection rule.

mod audit;
mod decider;
mod error;
mod event_source;
mod selection;

pub use audit::AuditSink;
pub use decider::{Decider, DecisionContext};
pub use error::{AuditError, DecisionError, DecisionResult, EventSourceError};
pub use event_source::EventSource;
pub use selection::SelectionRule;
