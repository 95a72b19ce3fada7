//! Turn Controller - the per-turn phase machine
//!
//! One turn walks `AwaitingEvent -> CollectingProposals -> Resolving ->
//! Deciding`; `Deciding` either loops back to `AwaitingEvent` or parks the
//! controller in `Halted` once the turn bound is reached. The ledger is
//! touched only during `Resolving`, strictly after all collection work for
//! the turn has completed, so there is never a concurrent-write hazard.

use crate::collector::ProposalCollector;
use crate::simulation::SimulationError;
use agora_core::{ParticipantId, SimulationState};
use agora_ports::{AuditSink, Decider, EventSource};
use agora_resolution::ResolutionEngine;
use std::sync::Arc;

/// The four live phases of a turn plus the terminal state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingEvent,
    CollectingProposals,
    Resolving,
    Deciding,
    Halted,
}

/// Orchestrates one full turn: event, collection, resolution, decision
pub struct TurnController {
    phase: Phase,
    /// Fixed enumeration of valid participants; collection order
    roster: Vec<ParticipantId>,
    /// One decision procedure per roster member, in roster order
    deciders: Vec<(ParticipantId, Box<dyn Decider>)>,
    collector: ProposalCollector,
    engine: ResolutionEngine,
    event_source: Box<dyn EventSource>,
    audit: Option<Arc<dyn AuditSink>>,
}

impl TurnController {
    pub fn new(
        roster: Vec<ParticipantId>,
        event_source: Box<dyn EventSource>,
        collector: ProposalCollector,
        engine: ResolutionEngine,
    ) -> Self {
        Self {
            phase: Phase::AwaitingEvent,
            roster,
            deciders: Vec::new(),
            collector,
            engine,
            event_source,
            audit: None,
        }
    }

    pub fn set_audit(&mut self, sink: Arc<dyn AuditSink>) {
        self.audit = Some(sink);
    }

    /// Register a decision procedure. Collection order follows
    /// registration order, so callers register in roster order.
    pub fn register_decider(&mut self, id: ParticipantId, decider: Box<dyn Decider>) {
        self.deciders.push((id, decider));
    }

    pub fn roster(&self) -> &[ParticipantId] {
        &self.roster
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_halted(&self) -> bool {
        self.phase == Phase::Halted
    }

    /// Run one full turn, taking the state by value and returning it.
    ///
    /// If the turn bound is already reached (including `max_turns == 0`)
    /// the controller halts without side effects. Otherwise all four
    /// phases complete before this returns, even if the caller has
    /// requested cancellation.
    pub async fn run_turn(
        &mut self,
        mut state: SimulationState,
    ) -> Result<SimulationState, SimulationError> {
        if state.turn >= state.max_turns {
            log::debug!("turn bound {} reached; halting", state.max_turns);
            self.phase = Phase::Halted;
            return Ok(state);
        }

        self.phase = Phase::AwaitingEvent;
        let summary = state.summary();
        let event = self.event_source.produce_event(&summary).await?;
        log::info!("turn {} event: {}", state.turn, event);
        if let Some(sink) = &self.audit {
            if let Err(e) = sink.record_event(state.turn, &event).await {
                log::warn!("audit sink dropped event record: {}", e);
            }
        }
        state.event_log.push(event.clone());
        state.current_event = Some(event);

        self.phase = Phase::CollectingProposals;
        let event_text = state.current_event.clone().unwrap_or_default();
        state.pending = self
            .collector
            .collect(&event_text, &self.roster, &mut self.deciders, &state.ledger)
            .await;

        self.phase = Phase::Resolving;
        // Proposals never carry across turns: selected or not, all are
        // consumed here.
        let proposals = std::mem::take(&mut state.pending);
        let resolution = self.engine.resolve(state.turn, proposals, &mut state.ledger)?;
        for record in &resolution.executed {
            if let Some(sink) = &self.audit {
                if let Err(e) = sink.record_transfer(record).await {
                    log::warn!("audit sink dropped transfer record: {}", e);
                }
            }
        }
        state.transfers.extend(resolution.executed);

        self.phase = Phase::Deciding;
        state.turn += 1;
        if state.turn >= state.max_turns {
            log::info!("turn bound {} reached; halting", state.max_turns);
            self.phase = Phase::Halted;
        } else {
            self.phase = Phase::AwaitingEvent;
        }

        Ok(state)
    }
}
