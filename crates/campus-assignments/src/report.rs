//! Result reporting types for reconciliation.
//!
//! Callers always receive a structured report, even when some items
//! failed: per-item outcomes plus aggregate counts and the number of audit
//! entries written.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of one professor within a reconciliation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Fresh assignment row created.
    Assigned,
    /// Existing inactive row flipped back to active.
    Reactivated,
    /// Active row revoked.
    Unassigned,
    /// Already in the desired state; no mutation.
    Unchanged,
    /// The per-item mutation failed; siblings were still processed.
    Error,
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemStatus::Assigned => write!(f, "assigned"),
            ItemStatus::Reactivated => write!(f, "reactivated"),
            ItemStatus::Unassigned => write!(f, "unassigned"),
            ItemStatus::Unchanged => write!(f, "unchanged"),
            ItemStatus::Error => write!(f, "error"),
        }
    }
}

/// Per-professor outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResult {
    /// The professor this item describes.
    pub professor_id: Uuid,
    /// What happened.
    pub status: ItemStatus,
    /// Human-readable detail (error text for `Error` items).
    pub message: String,
}

impl ItemResult {
    /// Build an item result.
    #[must_use]
    pub fn new(professor_id: Uuid, status: ItemStatus, message: impl Into<String>) -> Self {
        Self {
            professor_id,
            status,
            message: message.into(),
        }
    }

    /// Whether the item completed its intended mutation (or needed none).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status != ItemStatus::Error
    }
}

/// Aggregate counts for one reconciliation call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationSummary {
    /// Successful grants (fresh or reactivated).
    pub total_assigned: usize,
    /// Successful revokes.
    pub total_unassigned: usize,
    /// Professors already in the desired state.
    pub total_unchanged: usize,
    /// All items processed, including failed ones.
    pub total_processed: usize,
}

/// Full result of one reconciliation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Outcomes for professors gaining the module (including failures).
    pub assigned: Vec<ItemResult>,
    /// Outcomes for professors losing the module (including failures).
    pub unassigned: Vec<ItemResult>,
    /// Professors reported without mutation.
    pub unchanged: Vec<ItemResult>,
    /// Aggregate counts.
    pub summary: ReconciliationSummary,
    /// Audit entries written during this call.
    pub audit_logs_created: u64,
}

impl ReconciliationReport {
    /// Assemble a report from itemized outcomes.
    ///
    /// Summary counts reflect successes only; `total_processed` counts
    /// every item, failed ones included.
    #[must_use]
    pub fn from_items(
        assigned: Vec<ItemResult>,
        unassigned: Vec<ItemResult>,
        unchanged: Vec<ItemResult>,
        audit_logs_created: u64,
    ) -> Self {
        let summary = ReconciliationSummary {
            total_assigned: assigned.iter().filter(|i| i.is_success()).count(),
            total_unassigned: unassigned.iter().filter(|i| i.is_success()).count(),
            total_unchanged: unchanged.len(),
            total_processed: assigned.len() + unassigned.len() + unchanged.len(),
        };

        Self {
            assigned,
            unassigned,
            unchanged,
            summary,
            audit_logs_created,
        }
    }

    /// Whether every item completed without error.
    #[must_use]
    pub fn is_fully_applied(&self) -> bool {
        self.assigned
            .iter()
            .chain(&self.unassigned)
            .all(ItemResult::is_success)
    }
}
