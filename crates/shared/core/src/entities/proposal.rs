use crate::values::{AssetId, Money, ParticipantId};
use serde::{Deserialize, Serialize};

/// What a participant's decision procedure returns: a structured request to
/// acquire an asset from its current owner at an offered price.
///
/// This is the schema boundary for decision output. Anything that does not
/// produce this shape is a malformed proposal, never a best-effort parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalDraft {
    /// Asset being requested
    pub asset_id: AssetId,
    /// Asserted current owner
    pub from: ParticipantId,
    /// Proposed new owner
    pub to: ParticipantId,
    /// Offered price (non-negative)
    pub price: Money,
}

impl ProposalDraft {
    pub fn new(
        asset_id: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            asset_id: AssetId::new(asset_id),
            from: ParticipantId::new(from),
            to: ParticipantId::new(to),
            price,
        }
    }

    /// Stamp the submitting participant, producing a full proposal.
    pub fn submitted_by(self, submitter: ParticipantId) -> Proposal {
        Proposal {
            asset_id: self.asset_id,
            from: self.from,
            to: self.to,
            price: self.price,
            submitted_by: submitter,
        }
    }
}

/// A validated, collector-stamped proposal.
///
/// Immutable once created; consumed by the resolution engine in the same
/// turn it was collected. Never carries across turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub asset_id: AssetId,
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub price: Money,
    pub submitted_by: ParticipantId,
}

impl std::fmt::Display for Proposal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} offers {} for {} (held by {})",
            self.to, self.price, self.asset_id, self.from
        )
    }
}
