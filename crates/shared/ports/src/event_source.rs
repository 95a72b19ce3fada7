use crate::error::EventSourceError;
use agora_core::StateSummary;
use async_trait::async_trait;

/// Port for the per-turn event generator
///
/// Called exactly once per turn, before proposals are collected. The
/// produced text is broadcast identically to every participant and
/// appended to the run's event log.
#[async_trait]
pub trait EventSource: Send {
    /// Produce the next event from a digest of the current world
    async fn produce_event(&mut self, summary: &StateSummary)
    -> Result<String, EventSourceError>;

    /// Source name for logging
    fn name(&self) -> &str {
        "EventSource"
    }
}
