use thiserror::Error;

/// Failures of a participant's decision procedure.
///
/// These are participant-input errors: the collector recovers locally by
/// dropping the decision, never by failing the turn.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecisionError {
    /// Output did not fit the proposal schema
    #[error("malformed proposal: {0}")]
    Malformed(String),

    /// The procedure could not be reached or failed internally
    #[error("decision procedure unavailable: {0}")]
    Unavailable(String),
}

pub type DecisionResult = std::result::Result<Option<agora_core::ProposalDraft>, DecisionError>;

/// Failures of the event source. A turn cannot proceed without an event,
/// so these abort the run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventSourceError {
    #[error("event source failed: {0}")]
    Failed(String),

    #[error("event source has no more events")]
    Exhausted,
}

/// Failures of the audit sink. Recording is best-effort; the run logs and
/// continues.
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("audit sink rejected record: {0}")]
    Rejected(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
