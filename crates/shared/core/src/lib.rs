//! Agora Core Domain
//!
//! Pure domain types for the Agora negotiation simulation.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod ledger;
pub mod state;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{Asset, Participant, Proposal, ProposalDraft, TransferRecord};
pub use ledger::{Ledger, LedgerError};
pub use state::{SimulationState, StateSummary};
pub use values::{AssetId, Money, ParticipantId};
