use crate::values::{AssetId, ParticipantId};
use serde::{Deserialize, Serialize};

/// A tradeable item owned by exactly one participant at any time.
///
/// Ownership is reassigned only as the side effect of a resolved transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub owner: ParticipantId,
}

impl Asset {
    pub fn new(id: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            id: AssetId::new(id),
            owner: ParticipantId::new(owner),
        }
    }
}
