use crate::error::AuditError;
use agora_core::TransferRecord;
use async_trait::async_trait;
use std::sync::Arc;

/// Port for the optional durable audit trail
///
/// Receives a textual record of each event and each resolved transfer.
/// The core never reads the sink back; failures are logged and ignored.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Record the event broadcast for a turn
    async fn record_event(&self, turn: u64, text: &str) -> Result<(), AuditError>;

    /// Record a resolved transfer
    async fn record_transfer(&self, record: &TransferRecord) -> Result<(), AuditError>;
}

#[async_trait]
impl<T: AuditSink + ?Sized> AuditSink for Arc<T> {
    async fn record_event(&self, turn: u64, text: &str) -> Result<(), AuditError> {
        (**self).record_event(turn, text).await
    }

    async fn record_transfer(&self, record: &TransferRecord) -> Result<(), AuditError> {
        (**self).record_transfer(record).await
    }
}
