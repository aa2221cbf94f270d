//! Assignment reconciliation for campus tenant databases.
//!
//! This crate moves a module's active professor set to a caller-supplied
//! target set in one call: it validates the school, module, and professors,
//! computes the minimal grant/revoke diff against the tenant's current
//! state, applies it with per-item error recovery, writes one audit entry
//! per mutation, and dispatches best-effort notifications.
//!
//! # Components
//!
//! - [`ReconciliationEngine`] - orchestrates one reconciliation call
//! - [`AssignmentDiff`] - pure set arithmetic between current and desired
//! - [`ReconciliationReport`] - itemized outcomes plus aggregate counts
//! - [`AuditLogService`] - paginated audit reads with names resolved
//! - [`Notifier`] - delivery seam for assignment notifications
//!
//! # Example
//!
//! ```rust,no_run
//! use std::collections::HashSet;
//! use std::sync::Arc;
//!
//! use campus_assignments::{Actor, LogNotifier, ReconciliationEngine};
//! use campus_core::{ModuleId, SchoolId, UserId};
//! use campus_tenant::{TenantDbConfig, TenantRegistry};
//!
//! # async fn example(central: sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Arc::new(TenantRegistry::new(TenantDbConfig::from_env()?));
//! let engine = ReconciliationEngine::new(central, registry, Arc::new(LogNotifier));
//!
//! let desired: HashSet<UserId> = [UserId::new()].into_iter().collect();
//! let actor = Actor::new(UserId::new(), "admin");
//! let report = engine
//!     .reconcile(SchoolId::new(), ModuleId::new(), &desired, &actor)
//!     .await?;
//! println!("assigned {}", report.summary.total_assigned);
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod diff;
pub mod engine;
pub mod error;
pub mod notifier;
pub mod report;

pub use audit::{AuditLogEntryView, AuditLogPage, AuditLogService, PageInfo, PageRequest};
pub use diff::AssignmentDiff;
pub use engine::{Actor, ReconciliationEngine};
pub use error::{AssignmentError, Result};
pub use notifier::{LogNotifier, Notification, Notifier, NotifierError};
pub use report::{ItemResult, ItemStatus, ReconciliationReport, ReconciliationSummary};
