//! Resolution engine - at most one accepted transfer per contested asset
//!
//! Groups the proposals collected in one turn by asset, picks a winner per
//! group through the configured selection rule, and applies each winner to
//! the ledger. Losing proposals are discarded with no side effect and are
//! never retried in a later turn.

use agora_core::{Ledger, LedgerError, Proposal, TransferRecord};
use agora_ports::SelectionRule;

use crate::PricePriority;

/// Outcome of resolving one turn's proposals
#[derive(Debug, Clone, Default)]
pub struct TurnResolution {
    /// Transfers applied to the ledger, in group order
    pub executed: Vec<TransferRecord>,
    /// Winning proposals the ledger refused (stale ownership)
    pub skipped: Vec<(Proposal, LedgerError)>,
}

/// Resolves collected proposals into ledger transfers
pub struct ResolutionEngine {
    rule: Box<dyn SelectionRule>,
}

impl ResolutionEngine {
    /// Create an engine with the standard price-priority rule
    pub fn new() -> Self {
        Self::with_rule(Box::new(PricePriority))
    }

    /// Create an engine with a custom selection rule
    pub fn with_rule(rule: Box<dyn SelectionRule>) -> Self {
        Self { rule }
    }

    pub fn rule_name(&self) -> &str {
        self.rule.name()
    }

    /// Resolve all proposals for one turn.
    ///
    /// Proposals are grouped by asset in first-seen order; within a group
    /// collection order is preserved, so the rule's tie-breaks are
    /// reproducible. A stale winner (`OwnershipMismatch`) is logged and
    /// skipped without affecting the other groups. `UnknownParticipant` and
    /// `UnknownAsset` indicate a corrupted roster and are returned as
    /// errors for the caller to abort on.
    pub fn resolve(
        &self,
        turn: u64,
        proposals: Vec<Proposal>,
        ledger: &mut Ledger,
    ) -> Result<TurnResolution, LedgerError> {
        let mut groups: Vec<Vec<Proposal>> = Vec::new();
        for proposal in proposals {
            match groups
                .iter()
                .position(|group| group[0].asset_id == proposal.asset_id)
            {
                Some(i) => groups[i].push(proposal),
                None => groups.push(vec![proposal]),
            }
        }

        let mut resolution = TurnResolution::default();
        for group in &groups {
            let Some(winner) = self.rule.select(group) else {
                continue;
            };
            log::debug!(
                "turn {}: {} selected '{}' among {} proposals for {}",
                turn,
                self.rule.name(),
                winner,
                group.len(),
                winner.asset_id
            );

            match ledger.transfer(&winner.asset_id, &winner.from, &winner.to, winner.price) {
                Ok(()) => {
                    log::info!(
                        "turn {}: {} moved from {} to {} for {}",
                        turn,
                        winner.asset_id,
                        winner.from,
                        winner.to,
                        winner.price
                    );
                    resolution.executed.push(TransferRecord {
                        turn,
                        asset_id: winner.asset_id.clone(),
                        from: winner.from.clone(),
                        to: winner.to.clone(),
                        price: winner.price,
                    });
                }
                Err(err @ LedgerError::OwnershipMismatch { .. }) => {
                    log::warn!("turn {}: skipping {}: {}", turn, winner.asset_id, err);
                    resolution.skipped.push((winner.clone(), err));
                }
                Err(err) => return Err(err),
            }
        }

        Ok(resolution)
    }
}

impl Default for ResolutionEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::{Asset, AssetId, Participant, ParticipantId, ProposalDraft};

    fn ledger() -> Ledger {
        Ledger::new(
            vec![
                Participant::new("alpha", 100),
                Participant::new("beta", 100),
                Participant::new("gamma", 100),
            ],
            vec![Asset::new("relic", "alpha"), Asset::new("idol", "beta")],
        )
        .unwrap()
    }

    fn offer(asset: &str, from: &str, to: &str, price: i64) -> Proposal {
        ProposalDraft::new(asset, from, to, price).submitted_by(ParticipantId::new(to))
    }

    fn pid(s: &str) -> ParticipantId {
        ParticipantId::new(s)
    }

    fn aid(s: &str) -> AssetId {
        AssetId::new(s)
    }

    #[test]
    fn test_highest_offer_wins_contested_asset() {
        let mut ledger = ledger();
        let proposals = vec![
            offer("relic", "alpha", "beta", 30),
            offer("relic", "alpha", "gamma", 50),
        ];

        let resolution = ResolutionEngine::new()
            .resolve(1, proposals, &mut ledger)
            .unwrap();

        assert_eq!(resolution.executed.len(), 1);
        assert_eq!(resolution.executed[0].to, pid("gamma"));
        assert_eq!(resolution.executed[0].price, 50);
        assert_eq!(ledger.balance(&pid("alpha")), Some(150));
        assert_eq!(ledger.balance(&pid("gamma")), Some(50));
        assert_eq!(ledger.balance(&pid("beta")), Some(100));
        assert_eq!(ledger.owner_of(&aid("relic")), Some(&pid("gamma")));
    }

    #[test]
    fn test_tie_break_is_collection_order() {
        let mut ledger = ledger();
        let proposals = vec![
            offer("relic", "alpha", "beta", 40),
            offer("relic", "alpha", "gamma", 40),
        ];

        let resolution = ResolutionEngine::new()
            .resolve(1, proposals, &mut ledger)
            .unwrap();

        assert_eq!(resolution.executed[0].to, pid("beta"));
        assert_eq!(ledger.owner_of(&aid("relic")), Some(&pid("beta")));
    }

    #[test]
    fn test_losers_produce_no_side_effect() {
        let mut ledger = ledger();
        let proposals = vec![
            offer("relic", "alpha", "beta", 10),
            offer("relic", "alpha", "gamma", 60),
        ];

        ResolutionEngine::new()
            .resolve(1, proposals, &mut ledger)
            .unwrap();

        // The loser's balance is untouched.
        assert_eq!(ledger.balance(&pid("beta")), Some(100));
    }

    #[test]
    fn test_groups_resolve_independently() {
        let mut ledger = ledger();
        let proposals = vec![
            offer("relic", "alpha", "gamma", 20),
            offer("idol", "beta", "alpha", 35),
        ];

        let resolution = ResolutionEngine::new()
            .resolve(1, proposals, &mut ledger)
            .unwrap();

        assert_eq!(resolution.executed.len(), 2);
        assert_eq!(ledger.owner_of(&aid("relic")), Some(&pid("gamma")));
        assert_eq!(ledger.owner_of(&aid("idol")), Some(&pid("alpha")));
    }

    #[test]
    fn test_stale_winner_is_skipped_not_fatal() {
        let mut ledger = ledger();
        // Asserts beta as the holder of relic, but alpha holds it.
        let proposals = vec![
            offer("relic", "beta", "gamma", 80),
            offer("idol", "beta", "alpha", 35),
        ];

        let resolution = ResolutionEngine::new()
            .resolve(1, proposals, &mut ledger)
            .unwrap();

        assert_eq!(resolution.skipped.len(), 1);
        assert!(matches!(
            resolution.skipped[0].1,
            LedgerError::OwnershipMismatch { .. }
        ));
        // No balance change for the skipped group.
        assert_eq!(ledger.balance(&pid("gamma")), Some(100));
        assert_eq!(ledger.owner_of(&aid("relic")), Some(&pid("alpha")));
        // The other group still resolved.
        assert_eq!(resolution.executed.len(), 1);
        assert_eq!(ledger.owner_of(&aid("idol")), Some(&pid("alpha")));
    }

    #[test]
    fn test_unknown_participant_is_fatal() {
        let mut ledger = ledger();
        let proposals = vec![offer("relic", "alpha", "nobody", 10)];

        let err = ResolutionEngine::new()
            .resolve(1, proposals, &mut ledger)
            .unwrap_err();

        assert_eq!(err, LedgerError::UnknownParticipant(pid("nobody")));
    }

    #[test]
    fn test_no_proposals_is_a_no_op() {
        let mut ledger = ledger();
        let before = ledger.clone();

        let resolution = ResolutionEngine::new()
            .resolve(1, Vec::new(), &mut ledger)
            .unwrap();

        assert!(resolution.executed.is_empty());
        assert!(resolution.skipped.is_empty());
        assert_eq!(ledger, before);
    }
}
