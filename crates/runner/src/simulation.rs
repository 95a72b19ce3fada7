//! Simulation - world construction and the run loop
//!
//! The `SimulationRunner` builds the initial `SimulationState` from a
//! `SimulationConfig`, drives the `TurnController` until `Halted`, and
//! hands the final state back to the caller. Pure orchestration; no
//! business rule lives here beyond the loop bound.

use crate::collector::ProposalCollector;
use crate::turn::TurnController;
use agora_core::{Asset, Ledger, LedgerError, Money, Participant, ParticipantId, SimulationState};
use agora_ports::{AuditSink, Decider, EventSource, EventSourceError};
use agora_resolution::ResolutionEngine;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thiserror::Error;

/// Fatal simulation failures.
///
/// Participant-input problems (malformed proposals, invalid
/// counterparties, stale ownership) are recovered locally and never
/// surface here; these variants all indicate the run cannot continue.
#[derive(Error, Debug)]
pub enum SimulationError {
    /// The event source failed; a turn cannot proceed without an event
    #[error("event source failed: {0}")]
    EventSource(#[from] EventSourceError),

    /// Internal consistency failure in the ledger (corrupted roster or
    /// asset table)
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A roster member has no registered decision procedure
    #[error("no decision procedure registered for {0}")]
    MissingDecider(ParticipantId),

    /// A decision procedure was registered for an id outside the roster
    #[error("decision procedure registered for unknown participant {0}")]
    UnknownDecider(ParticipantId),
}

/// Cooperative cancellation for a running simulation.
///
/// Cancellation takes effect between turns only: an in-flight turn always
/// completes all four phases, so the state is left consistent.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Simulation configuration
#[derive(Debug, Clone, Serialize)]
pub struct SimulationConfig {
    /// Roster with starting balances; order fixes the collection order
    pub participants: Vec<Participant>,
    /// Initial asset assignments
    pub assets: Vec<Asset>,
    /// Number of turns to run; zero runs nothing
    pub max_turns: u64,
    /// Bounded wait per decision call
    pub decision_timeout: Duration,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            participants: Vec::new(),
            assets: Vec::new(),
            max_turns: 10,
            decision_timeout: Duration::from_secs(5),
        }
    }
}

impl SimulationConfig {
    pub fn with_participant(mut self, id: impl Into<String>, balance: Money) -> Self {
        self.participants.push(Participant::new(id, balance));
        self
    }

    pub fn with_asset(mut self, id: impl Into<String>, owner: impl Into<String>) -> Self {
        self.assets.push(Asset::new(id, owner));
        self
    }

    pub fn with_max_turns(mut self, max_turns: u64) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn with_decision_timeout(mut self, timeout: Duration) -> Self {
        self.decision_timeout = timeout;
        self
    }
}

/// Final snapshot handed back to the caller
#[derive(Debug, Serialize)]
pub struct RunResult {
    /// The world as it stood when the run halted
    pub state: SimulationState,
    /// Completed turns (equals `state.turn`)
    pub turns_executed: u64,
}

/// Drives the turn controller until halted or cancelled
pub struct SimulationRunner {
    controller: TurnController,
    state: SimulationState,
    /// Registered but not yet bound decision procedures
    pending_deciders: HashMap<ParticipantId, Box<dyn Decider>>,
    bound: bool,
    cancel: CancelHandle,
}

impl SimulationRunner {
    /// Build a fresh world from the configuration
    pub fn new(
        config: SimulationConfig,
        event_source: Box<dyn EventSource>,
    ) -> Result<Self, SimulationError> {
        let ledger = Ledger::new(config.participants.clone(), config.assets.clone())?;
        let state = SimulationState::new(ledger, config.max_turns);
        Self::resume(config, state, event_source)
    }

    /// Resume from a state snapshot taken between turns.
    ///
    /// Given the same subsequent events and decisions, a resumed run ends
    /// in the same final state as an uninterrupted one.
    pub fn resume(
        config: SimulationConfig,
        state: SimulationState,
        event_source: Box<dyn EventSource>,
    ) -> Result<Self, SimulationError> {
        let roster: Vec<ParticipantId> =
            config.participants.iter().map(|p| p.id.clone()).collect();
        for id in &roster {
            if !state.ledger.contains_participant(id) {
                return Err(LedgerError::UnknownParticipant(id.clone()).into());
            }
        }
        let controller = TurnController::new(
            roster,
            event_source,
            ProposalCollector::new(config.decision_timeout),
            ResolutionEngine::new(),
        );

        Ok(Self {
            controller,
            state,
            pending_deciders: HashMap::new(),
            bound: false,
            cancel: CancelHandle::new(),
        })
    }

    /// Mirror events and resolved transfers to an audit sink
    pub fn with_audit(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.controller.set_audit(sink);
        self
    }

    /// Register the decision procedure for one roster member. Every
    /// member needs exactly one before the run starts; registration call
    /// order does not matter, collection always follows roster order.
    pub fn register_decider(&mut self, id: impl Into<String>, decider: Box<dyn Decider>) {
        self.pending_deciders
            .insert(ParticipantId::new(id), decider);
    }

    /// Handle for cancelling the run between turns
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// The current state; between turns this is a consistent snapshot
    /// suitable for serialization and later `resume`.
    pub fn snapshot(&self) -> &SimulationState {
        &self.state
    }

    fn bind_deciders(&mut self) -> Result<(), SimulationError> {
        if self.bound {
            return Ok(());
        }
        let mut pending = std::mem::take(&mut self.pending_deciders);
        for id in self.controller.roster().to_vec() {
            let decider = pending
                .remove(&id)
                .ok_or_else(|| SimulationError::MissingDecider(id.clone()))?;
            self.controller.register_decider(id, decider);
        }
        if let Some(id) = pending.into_keys().next() {
            return Err(SimulationError::UnknownDecider(id));
        }
        self.bound = true;
        Ok(())
    }

    /// Run a single turn. Returns `false` once the controller has halted.
    pub async fn step(&mut self) -> Result<bool, SimulationError> {
        self.bind_deciders()?;
        if self.controller.is_halted() {
            return Ok(false);
        }
        let state = std::mem::take(&mut self.state);
        self.state = self.controller.run_turn(state).await?;
        Ok(!self.controller.is_halted())
    }

    /// Drive the controller until halted or cancelled, then return the
    /// final state and event log.
    pub async fn run(mut self) -> Result<RunResult, SimulationError> {
        self.bind_deciders()?;
        log::info!(
            "simulation started: {} participants, max {} turns",
            self.controller.roster().len(),
            self.state.max_turns
        );

        loop {
            if self.cancel.is_cancelled() {
                log::info!(
                    "cancellation requested; stopping after {} turns",
                    self.state.turn
                );
                break;
            }
            if !self.step().await? {
                break;
            }
        }

        log::info!("simulation finished: {} turns executed", self.state.turn);
        Ok(RunResult {
            turns_executed: self.state.turn,
            state: self.state,
        })
    }
}
