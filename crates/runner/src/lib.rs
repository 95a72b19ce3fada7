//! Agora Runner - Turn-Based Negotiation Simulation
//!
//! Orchestrates the full negotiation loop with multiple participants:
//!
//! - **Collector**: concurrent proposal gathering with schema validation
//! - **Event Feed**: per-turn broadcast headlines (simulated source)
//! - **Turn Controller**: the four-phase turn state machine
//! - **Simulation**: world construction, the run loop, and cancellation
//!
//! ## Architecture
//!
//! ```text
//!                  ┌──────────────────┐
//!                  │   Event Source   │
//!                  │   (headlines)    │
//!                  └────────┬─────────┘
//!                           │ event (broadcast to all)
//!                           ▼
//! ┌─────────────────────────────────────────────────┐
//! │                  PARTICIPANTS                   │
//! │                                                 │
//! │   ┌─────────┐     ┌─────────┐     ┌─────────┐   │
//! │   │ Decider │     │ Decider │     │ Decider │   │
//! │   └────┬────┘     └────┬────┘     └────┬────┘   │
//! │        │ proposals     │               │        │
//! │        └────────────┬──┴───────────────┘        │
//! │                     ▼                           │
//! │          ┌───────────────────┐                  │
//! │          │ ProposalCollector │                  │
//! │          └─────────┬─────────┘                  │
//! └────────────────────┼────────────────────────────┘
//!                      │ validated, roster-ordered
//!                      ▼
//!           ┌────────────────────┐
//!           │  ResolutionEngine  │
//!           └─────────┬──────────┘
//!                     │ winning transfers
//!                     ▼
//!           ┌────────────────────┐
//!           │       Ledger       │
//!           └────────────────────┘
//! ```

pub mod audit;
pub mod collector;
pub mod deciders;
pub mod event_feed;
pub mod simulation;
pub mod turn;

// Re-export main types
pub use audit::{LogAudit, MemoryAudit};
pub use collector::{ProposalCollector, RejectReason};
pub use deciders::{ImpulsiveBidder, ScriptedDecider, SilentDecider};
pub use event_feed::{HeadlineFeed, HeadlineFeedConfig, ScriptedEvents};
pub use simulation::{
    CancelHandle, RunResult, SimulationConfig, SimulationError, SimulationRunner,
};
pub use turn::{Phase, TurnController};

// Re-export the port traits for convenience
pub use agora_ports::{AuditSink, Decider, DecisionContext, EventSource};
