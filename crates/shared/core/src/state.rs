//! Simulation state: the single aggregate owned by the runner.

use crate::entities::{Proposal, TransferRecord};
use crate::ledger::Ledger;
use crate::values::{AssetId, Money, ParticipantId};
use serde::{Deserialize, Serialize};

/// The whole world for one run: ledger, event history, in-flight proposals
/// and the turn bound.
///
/// Exactly one instance exists per run. It is moved through each turn stage
/// and returned, never aliased. Serializable so a run can be snapshotted
/// between turns and resumed later.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationState {
    pub ledger: Ledger,
    /// Event broadcast for the in-flight turn
    pub current_event: Option<String>,
    /// Proposals collected for the in-flight turn; always cleared before
    /// the next turn begins
    pub pending: Vec<Proposal>,
    /// Completed turns so far
    pub turn: u64,
    pub max_turns: u64,
    /// Append-only log of every event produced, in turn order
    pub event_log: Vec<String>,
    /// Every resolved transfer, in resolution order
    pub transfers: Vec<TransferRecord>,
}

impl SimulationState {
    pub fn new(ledger: Ledger, max_turns: u64) -> Self {
        Self {
            ledger,
            current_event: None,
            pending: Vec::new(),
            turn: 0,
            max_turns,
            event_log: Vec::new(),
            transfers: Vec::new(),
        }
    }

    /// Read-only digest handed to the event source.
    pub fn summary(&self) -> StateSummary {
        StateSummary::of(self)
    }
}

/// Sorted, read-only digest of the world, suitable for an external event
/// generator. Sorting keeps the digest independent of map iteration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateSummary {
    pub turn: u64,
    pub balances: Vec<(ParticipantId, Money)>,
    pub holdings: Vec<(AssetId, ParticipantId)>,
}

impl StateSummary {
    pub fn of(state: &SimulationState) -> Self {
        let mut balances: Vec<_> = state
            .ledger
            .participants()
            .map(|p| (p.id.clone(), p.balance))
            .collect();
        balances.sort_by(|a, b| a.0.cmp(&b.0));

        let mut holdings: Vec<_> = state
            .ledger
            .assets()
            .map(|a| (a.id.clone(), a.owner.clone()))
            .collect();
        holdings.sort_by(|a, b| a.0.cmp(&b.0));

        Self {
            turn: state.turn,
            balances,
            holdings,
        }
    }
}
