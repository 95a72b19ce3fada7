mod asset;
mod participant;
mod proposal;
mod transfer;

pub use asset::Asset;
pub use participant::Participant;
pub use proposal::{Proposal, ProposalDraft};
pub use transfer::TransferRecord;
