//! # Audit Adapters
//!
//! - `TracingAuditSink`: emits denials on the `audit` tracing target
//! - `MemoryAuditSink`: keeps denials for inspection in tests

use crate::domain::entities::AuditRecord;
use crate::ports::outbound::AuditSink;
use std::sync::Mutex;
use tracing::warn;

/// Writes each denial as a structured `warn` event on target `audit`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, record: AuditRecord) {
        warn!(
            target: "audit",
            tx_id = %record.tx_id,
            principal = %record.principal,
            function = %record.function,
            "{}",
            record.message
        );
    }
}

/// Collects denials in memory.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every record so far.
    pub fn records(&self) -> Vec<AuditRecord> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of records so far.
    pub fn len(&self) -> usize {
        self.records().len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, record: AuditRecord) {
        let mut records = match self.records.lock() {
            Ok(records) => records,
            Err(poisoned) => poisoned.into_inner(),
        };
        records.push(record);
    }
}
