//! Ledger: the sole mutator of balances and asset ownership.

use crate::entities::{Asset, Participant};
use crate::values::{AssetId, Money, ParticipantId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Ledger operation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The roster has no such participant. Indicates a corrupted roster or
    /// configuration; callers treat this as fatal.
    #[error("unknown participant: {0}")]
    UnknownParticipant(ParticipantId),

    /// No such asset in the simulation. Assets are never deleted mid-run,
    /// so this is also a configuration-level failure.
    #[error("unknown asset: {0}")]
    UnknownAsset(AssetId),

    /// The asset is not currently held by the claimed owner (stale
    /// proposal). Recoverable: the caller skips this transfer.
    #[error("asset {asset} is held by {actual}, not {claimed}")]
    OwnershipMismatch {
        asset: AssetId,
        claimed: ParticipantId,
        actual: ParticipantId,
    },

    #[error("duplicate participant in roster: {0}")]
    DuplicateParticipant(ParticipantId),

    #[error("duplicate asset: {0}")]
    DuplicateAsset(AssetId),
}

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// Holds every participant balance and asset assignment for one run.
///
/// All mutation goes through [`Ledger::transfer`], which applies the
/// debit/credit pair and the ownership change as a single atomic step:
/// the operation either fully applies or fails with no mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    participants: HashMap<ParticipantId, Participant>,
    assets: HashMap<AssetId, Asset>,
}

impl Ledger {
    /// Build a ledger from a roster and initial asset assignments.
    ///
    /// Every asset owner must be a roster member; ids must be unique.
    pub fn new(
        participants: impl IntoIterator<Item = Participant>,
        assets: impl IntoIterator<Item = Asset>,
    ) -> LedgerResult<Self> {
        let mut roster = HashMap::new();
        for participant in participants {
            let id = participant.id.clone();
            if roster.insert(id.clone(), participant).is_some() {
                return Err(LedgerError::DuplicateParticipant(id));
            }
        }

        let mut holdings = HashMap::new();
        for asset in assets {
            if !roster.contains_key(&asset.owner) {
                return Err(LedgerError::UnknownParticipant(asset.owner));
            }
            let id = asset.id.clone();
            if holdings.insert(id.clone(), asset).is_some() {
                return Err(LedgerError::DuplicateAsset(id));
            }
        }

        Ok(Self {
            participants: roster,
            assets: holdings,
        })
    }

    /// Current balance of a participant
    pub fn balance(&self, id: &ParticipantId) -> Option<Money> {
        self.participants.get(id).map(|p| p.balance)
    }

    /// Current owner of an asset
    pub fn owner_of(&self, id: &AssetId) -> Option<&ParticipantId> {
        self.assets.get(id).map(|a| &a.owner)
    }

    pub fn contains_participant(&self, id: &ParticipantId) -> bool {
        self.participants.contains_key(id)
    }

    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.participants.values()
    }

    pub fn assets(&self) -> impl Iterator<Item = &Asset> {
        self.assets.values()
    }

    /// Sum of all balances. Constant across transfers (money moves, it is
    /// neither created nor destroyed).
    pub fn total_money(&self) -> Money {
        self.participants.values().map(|p| p.balance).sum()
    }

    /// Move an asset from its current owner to a buyer at the given price.
    ///
    /// Preconditions: `from` currently owns the asset, both parties are
    /// roster members, `price >= 0` (enforced upstream at proposal
    /// validation). On any error nothing is mutated.
    ///
    /// Affordability is deliberately not checked: the buyer's balance may
    /// go negative. Callers wanting a hard budget cap must pre-check.
    pub fn transfer(
        &mut self,
        asset_id: &AssetId,
        from: &ParticipantId,
        to: &ParticipantId,
        price: Money,
    ) -> LedgerResult<()> {
        if !self.participants.contains_key(from) {
            return Err(LedgerError::UnknownParticipant(from.clone()));
        }
        if !self.participants.contains_key(to) {
            return Err(LedgerError::UnknownParticipant(to.clone()));
        }
        let holder = self
            .assets
            .get(asset_id)
            .ok_or_else(|| LedgerError::UnknownAsset(asset_id.clone()))?;
        if holder.owner != *from {
            return Err(LedgerError::OwnershipMismatch {
                asset: asset_id.clone(),
                claimed: from.clone(),
                actual: holder.owner.clone(),
            });
        }

        // Preconditions hold; the debit/credit pair and the ownership
        // change below are one atomic step.
        if let Some(buyer) = self.participants.get_mut(to) {
            buyer.balance -= price;
        }
        if let Some(seller) = self.participants.get_mut(from) {
            seller.balance += price;
        }
        if let Some(asset) = self.assets.get_mut(asset_id) {
            asset.owner = to.clone();
        }
        Ok(())
    }
}
