use crate::values::{AssetId, Money, ParticipantId};
use serde::{Deserialize, Serialize};

/// Record of a resolved transfer, appended to the run history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    /// Turn in which the transfer was resolved
    pub turn: u64,
    pub asset_id: AssetId,
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub price: Money,
}

impl std::fmt::Display for TransferRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} moved from {} to {} for {}",
            self.asset_id, self.from, self.to, self.price
        )
    }
}
