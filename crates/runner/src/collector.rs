//! Proposal Collector - gathers and validates per-turn proposals
//!
//! Invokes every participant's decision procedure for the current turn,
//! concurrently and with a bounded wait, then assembles the validated
//! proposals into a single list ordered by roster enumeration (never
//! completion order) so that downstream tie-breaks are reproducible.

use agora_core::{AssetId, Ledger, Money, ParticipantId, Proposal, ProposalDraft};
use agora_ports::{Decider, DecisionContext};
use futures_util::future::join_all;
use std::time::Duration;
use thiserror::Error;

/// Why a submitted proposal was dropped at collection time.
///
/// All of these are participant-input problems: the proposal is dropped
/// with a warning and the turn continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Structurally invalid output (negative price)
    #[error("malformed proposal: negative price {0}")]
    NegativePrice(Money),

    /// A named party is not in the roster
    #[error("invalid counterparty: {0} is not in the roster")]
    InvalidCounterparty(ParticipantId),

    /// The proposal names the same participant on both sides
    #[error("invalid counterparty: {0} cannot trade with itself")]
    SelfTransfer(ParticipantId),

    /// The named asset does not exist in this simulation
    #[error("unknown asset: {0}")]
    UnknownAsset(AssetId),

    /// The asserted current owner does not match the ledger
    #[error("asset {asset} is held by {actual}, not {claimed}")]
    StaleOwner {
        asset: AssetId,
        claimed: ParticipantId,
        actual: ParticipantId,
    },
}

/// Collects proposals from every registered decision procedure
pub struct ProposalCollector {
    /// Bounded wait per decision call; a slower procedure is treated as
    /// "no action" for the turn
    timeout: Duration,
}

impl ProposalCollector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Invoke every decider for the current turn and return the validated
    /// proposals in roster order.
    ///
    /// The decide futures run concurrently; results are gathered join-style
    /// before any validation, and the output order follows `deciders`
    /// (registration order), not completion order. Decision errors and
    /// timeouts are logged and treated as no action.
    pub async fn collect(
        &self,
        event: &str,
        roster: &[ParticipantId],
        deciders: &mut [(ParticipantId, Box<dyn Decider>)],
        ledger: &Ledger,
    ) -> Vec<Proposal> {
        let timeout = self.timeout;
        let futures: Vec<_> = deciders
            .iter_mut()
            .map(|(id, decider)| {
                let id = &*id;
                let balance = ledger.balance(id);
                async move {
                    let Some(balance) = balance else {
                        log::warn!("[{}] not in ledger; treating as no action", id);
                        return (id.clone(), None);
                    };
                    let who = decider.name().to_string();
                    let ctx = DecisionContext {
                        participant: id,
                        event,
                        balance,
                        counterparties: roster,
                    };
                    match tokio::time::timeout(timeout, decider.decide(&ctx)).await {
                        Ok(Ok(draft)) => (id.clone(), draft),
                        Ok(Err(e)) => {
                            log::warn!("[{}] {} failed, dropping decision: {}", id, who, e);
                            (id.clone(), None)
                        }
                        Err(_) => {
                            log::warn!(
                                "[{}] {} did not answer within {:?}; treating as no action",
                                id,
                                who,
                                timeout
                            );
                            (id.clone(), None)
                        }
                    }
                }
            })
            .collect();

        let mut proposals = Vec::new();
        for (submitter, draft) in join_all(futures).await {
            let Some(draft) = draft else { continue };
            match validate(&draft, roster, ledger) {
                Ok(()) => {
                    log::debug!("[{}] submitted: {:?}", submitter, draft);
                    proposals.push(draft.submitted_by(submitter));
                }
                Err(reason) => {
                    log::warn!("[{}] dropping proposal {:?}: {}", submitter, draft, reason);
                }
            }
        }

        log::debug!("collected {} validated proposals", proposals.len());
        proposals
    }
}

/// Check a draft against the static eligibility rules.
///
/// Performed here, not downstream: the resolution engine only ever sees
/// proposals whose parties are roster members and whose asserted owner
/// matched the ledger at collection time.
fn validate(
    draft: &ProposalDraft,
    roster: &[ParticipantId],
    ledger: &Ledger,
) -> Result<(), RejectReason> {
    if draft.price < 0 {
        return Err(RejectReason::NegativePrice(draft.price));
    }
    if !roster.contains(&draft.from) {
        return Err(RejectReason::InvalidCounterparty(draft.from.clone()));
    }
    if !roster.contains(&draft.to) {
        return Err(RejectReason::InvalidCounterparty(draft.to.clone()));
    }
    if draft.from == draft.to {
        return Err(RejectReason::SelfTransfer(draft.to.clone()));
    }
    match ledger.owner_of(&draft.asset_id) {
        None => Err(RejectReason::UnknownAsset(draft.asset_id.clone())),
        Some(actual) if *actual != draft.from => Err(RejectReason::StaleOwner {
            asset: draft.asset_id.clone(),
            claimed: draft.from.clone(),
            actual: actual.clone(),
        }),
        Some(_) => Ok(()),
    }
}
