//! Audit sinks - optional durable record of events and transfers
//!
//! The core mirrors every broadcast event and every resolved transfer to
//! the configured sink; it never reads the sink back, and a sink failure
//! only produces a warning.

use agora_core::TransferRecord;
use agora_ports::{AuditError, AuditSink};
use async_trait::async_trait;
use std::sync::Mutex;
use uuid::Uuid;

/// Writes audit records to the logger, tagged with a run id and timestamp
pub struct LogAudit {
    run_id: Uuid,
}

impl LogAudit {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
        }
    }
}

impl Default for LogAudit {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditSink for LogAudit {
    async fn record_event(&self, turn: u64, text: &str) -> Result<(), AuditError> {
        log::info!(
            "[audit {}] {} turn {} event: {}",
            self.run_id,
            chrono::Utc::now().to_rfc3339(),
            turn,
            text
        );
        Ok(())
    }

    async fn record_transfer(&self, record: &TransferRecord) -> Result<(), AuditError> {
        log::info!(
            "[audit {}] {} turn {} transfer: {}",
            self.run_id,
            chrono::Utc::now().to_rfc3339(),
            record.turn,
            record
        );
        Ok(())
    }
}

/// Buffers audit records in memory; used in tests to assert the trail
#[derive(Default)]
pub struct MemoryAudit {
    records: Mutex<Vec<String>>,
}

impl MemoryAudit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every record written so far, in order
    pub fn records(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn push(&self, line: String) {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(line);
    }
}

#[async_trait]
impl AuditSink for MemoryAudit {
    async fn record_event(&self, turn: u64, text: &str) -> Result<(), AuditError> {
        self.push(format!("turn {} event: {}", turn, text));
        Ok(())
    }

    async fn record_transfer(&self, record: &TransferRecord) -> Result<(), AuditError> {
        self.push(format!("turn {} transfer: {}", record.turn, record));
        Ok(())
    }
}
