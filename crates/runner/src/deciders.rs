//! Deciders - deterministic stand-ins for the external decision procedure
//!
//! The core never assumes anything about how a participant decides beyond
//! the `ProposalDraft` schema. These implementations cover testing and
//! demos:
//! - `ScriptedDecider` replays a fixed per-turn script
//! - `SilentDecider` never acts
//! - `ImpulsiveBidder` bids at random on a known set of targets (seedable)

use agora_core::{AssetId, ParticipantId, ProposalDraft};
use agora_ports::{Decider, DecisionContext, DecisionResult};
use async_trait::async_trait;
use rand::Rng;
use rand::rngs::StdRng;
use std::collections::VecDeque;

/// Replays a fixed script: one entry per turn, `None` meaning no action.
/// Once the script runs out the decider stays silent.
pub struct ScriptedDecider {
    name: String,
    script: VecDeque<Option<ProposalDraft>>,
}

impl ScriptedDecider {
    pub fn new(
        name: impl Into<String>,
        script: impl IntoIterator<Item = Option<ProposalDraft>>,
    ) -> Self {
        Self {
            name: name.into(),
            script: script.into_iter().collect(),
        }
    }
}

#[async_trait]
impl Decider for ScriptedDecider {
    async fn decide(&mut self, _ctx: &DecisionContext<'_>) -> DecisionResult {
        Ok(self.script.pop_front().unwrap_or(None))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Never proposes anything
pub struct SilentDecider;

#[async_trait]
impl Decider for SilentDecider {
    async fn decide(&mut self, _ctx: &DecisionContext<'_>) -> DecisionResult {
        Ok(None)
    }

    fn name(&self) -> &str {
        "SilentDecider"
    }
}

/// Bids at random on a fixed list of targets.
///
/// The target list is the bidder's own view of who holds what; it is never
/// updated, so proposals go stale once an asset actually moves and are
/// dropped at collection. That mirrors a real participant acting on old
/// information.
pub struct ImpulsiveBidder {
    name: String,
    /// (asset, presumed holder) pairs the bidder is interested in
    targets: Vec<(AssetId, ParticipantId)>,
    /// Probability of bidding at all on a given turn (0.0 to 1.0)
    bid_probability: f64,
    rng: StdRng,
}

impl ImpulsiveBidder {
    pub fn new(name: impl Into<String>, targets: Vec<(AssetId, ParticipantId)>) -> Self {
        Self {
            name: name.into(),
            targets,
            bid_probability: 0.5,
            rng: rand::SeedableRng::from_entropy(),
        }
    }

    /// Create with a specific seed for reproducible simulations
    pub fn with_seed(
        name: impl Into<String>,
        targets: Vec<(AssetId, ParticipantId)>,
        seed: u64,
    ) -> Self {
        Self {
            name: name.into(),
            targets,
            bid_probability: 0.5,
            rng: rand::SeedableRng::seed_from_u64(seed),
        }
    }

    pub fn with_bid_probability(mut self, probability: f64) -> Self {
        self.bid_probability = probability;
        self
    }
}

#[async_trait]
impl Decider for ImpulsiveBidder {
    async fn decide(&mut self, ctx: &DecisionContext<'_>) -> DecisionResult {
        if !self.rng.gen_bool(self.bid_probability) {
            return Ok(None);
        }

        // Can only buy from someone else.
        let candidates: Vec<_> = self
            .targets
            .iter()
            .filter(|(_, holder)| holder != ctx.participant)
            .collect();
        if candidates.is_empty() {
            return Ok(None);
        }

        let (asset, holder) = candidates[self.rng.gen_range(0..candidates.len())];
        let cap = ctx.balance.max(1);
        let price = self.rng.gen_range(1..=cap);

        Ok(Some(ProposalDraft {
            asset_id: asset.clone(),
            from: holder.clone(),
            to: ctx.participant.clone(),
            price,
        }))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
