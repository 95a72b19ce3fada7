use crate::error::DecisionResult;
use agora_core::{Money, ParticipantId};
use async_trait::async_trait;

/// What a participant sees when asked to act: the broadcast event, its own
/// balance, and the static roster of valid counterparties.
#[derive(Debug, Clone)]
pub struct DecisionContext<'a> {
    /// The participant being asked to decide
    pub participant: &'a ParticipantId,
    /// Event broadcast for this turn
    pub event: &'a str,
    /// The participant's own balance
    pub balance: Money,
    /// Every valid participant id for this run, in roster order
    pub counterparties: &'a [ParticipantId],
}

/// Port for a participant's decision procedure.
///
/// Called once per participant per turn. Returns either "no action" or one
/// structured proposal draft. Calls are independent and may be issued
/// concurrently; a slow or failing procedure is treated as no action for
/// the turn and never blocks the run.
#[async_trait]
pub trait Decider: Send {
    async fn decide(&mut self, ctx: &DecisionContext<'_>) -> DecisionResult;

    /// Procedure name for logging
    fn name(&self) -> &str {
        "Decider"
    }
}
