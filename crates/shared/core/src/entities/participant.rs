use crate::values::{Money, ParticipantId};
use serde::{Deserialize, Serialize};

/// A roster member with a spendable balance.
///
/// Participants are created at simulation start and persist for the whole
/// run. The balance is mutated only through `Ledger::transfer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub balance: Money,
}

impl Participant {
    pub fn new(id: impl Into<String>, balance: Money) -> Self {
        Self {
            id: ParticipantId::new(id),
            balance,
        }
    }
}
