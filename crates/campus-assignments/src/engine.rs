//! Assignment reconciliation engine.
//!
//! Given a module and the desired set of professors, computes the minimal
//! grant/revoke diff against the tenant's current state and applies it:
//! one reused assignment row per (module, professor) pair, one audit entry
//! per mutation, one best-effort notification per affected professor.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use campus_core::{ModuleId, SchoolId, UserId};
use campus_db::models::{
    AssignmentAuditLog, AuditAction, CourseModule, CreateAuditLog, ModuleAssignment, User,
};
use campus_tenant::{TenantRegistry, TenantResolver};

use crate::diff::AssignmentDiff;
use crate::error::{AssignmentError, Result};
use crate::notifier::{Notification, Notifier};
use crate::report::{ItemResult, ItemStatus, ReconciliationReport};

/// The authenticated principal performing a reconciliation.
#[derive(Debug, Clone)]
pub struct Actor {
    /// Central user ID of the actor.
    pub id: UserId,
    /// Role the actor holds (recorded in audit entries).
    pub role: String,
}

impl Actor {
    /// Build an actor.
    #[must_use]
    pub fn new(id: UserId, role: impl Into<String>) -> Self {
        Self {
            id,
            role: role.into(),
        }
    }
}

/// Orchestrates assignment reconciliation across the central and tenant
/// databases.
pub struct ReconciliationEngine {
    central: PgPool,
    resolver: TenantResolver,
    registry: Arc<TenantRegistry>,
    notifier: Arc<dyn Notifier>,
}

impl ReconciliationEngine {
    /// Create a new engine.
    #[must_use]
    pub fn new(central: PgPool, registry: Arc<TenantRegistry>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            resolver: TenantResolver::new(central.clone()),
            central,
            registry,
            notifier,
        }
    }

    /// Move the module's active professor set to `desired`.
    ///
    /// Validation is all-or-nothing: the school must resolve, the module
    /// must exist in the tenant database, and every desired professor must
    /// exist centrally, belong to the school, and not be soft-deleted.
    /// Any violation aborts before the first mutation.
    ///
    /// The mutation loop is deliberately NOT transactional across items:
    /// a failing item is reported as an `error` result and its siblings
    /// still proceed. Every successful mutation writes its audit entry in
    /// the same logical step; notifications go out afterwards on detached
    /// tasks and never affect the outcome.
    pub async fn reconcile(
        &self,
        school_id: SchoolId,
        module_id: ModuleId,
        desired: &HashSet<UserId>,
        actor: &Actor,
    ) -> Result<ReconciliationReport> {
        let pool = self.resolver.resolve_pool(&self.registry, school_id).await?;
        let module = module_id.into_uuid();

        if !CourseModule::exists(&pool, module).await? {
            return Err(AssignmentError::ModuleNotFound(module_id));
        }

        let desired: HashSet<Uuid> = desired.iter().map(|id| id.into_uuid()).collect();
        self.validate_professors(school_id, &desired).await?;

        // Snapshot of the tenant state; the whole call works from this
        // point-in-time view and never re-reads mid-flight.
        let existing = ModuleAssignment::list_by_module(&pool, module).await?;
        let by_professor: HashMap<Uuid, ModuleAssignment> = existing
            .into_iter()
            .map(|a| (a.professor_id, a))
            .collect();
        let current: HashSet<Uuid> = by_professor
            .values()
            .filter(|a| a.is_active)
            .map(|a| a.professor_id)
            .collect();
        let all_existing: HashSet<Uuid> = by_professor.keys().copied().collect();

        let diff = AssignmentDiff::compute(&current, &all_existing, &desired);

        let mut assigned = Vec::with_capacity(diff.to_assign_len());
        let mut unassigned = Vec::with_capacity(diff.to_unassign.len());
        let mut audit_logs_created: u64 = 0;
        let mut to_notify: Vec<(Uuid, AuditAction)> = Vec::new();

        for &professor_id in &diff.to_create {
            match self.apply_create(&pool, module, professor_id, actor).await {
                Ok(()) => {
                    audit_logs_created += 1;
                    to_notify.push((professor_id, AuditAction::Assign));
                    assigned.push(ItemResult::new(professor_id, ItemStatus::Assigned, "assigned"));
                }
                Err(e) => {
                    tracing::warn!(
                        module_id = %module_id,
                        professor_id = %professor_id,
                        error = %e,
                        "Failed to assign professor; continuing with remaining items"
                    );
                    assigned.push(ItemResult::new(professor_id, ItemStatus::Error, e.to_string()));
                }
            }
        }

        for &professor_id in &diff.to_reactivate {
            let previous = by_professor.get(&professor_id);
            match self
                .apply_reactivate(&pool, module, professor_id, previous, actor)
                .await
            {
                Ok(()) => {
                    audit_logs_created += 1;
                    to_notify.push((professor_id, AuditAction::Assign));
                    assigned.push(ItemResult::new(
                        professor_id,
                        ItemStatus::Reactivated,
                        "reactivated",
                    ));
                }
                Err(e) => {
                    tracing::warn!(
                        module_id = %module_id,
                        professor_id = %professor_id,
                        error = %e,
                        "Failed to reactivate professor; continuing with remaining items"
                    );
                    assigned.push(ItemResult::new(professor_id, ItemStatus::Error, e.to_string()));
                }
            }
        }

        for &professor_id in &diff.to_unassign {
            let previous = by_professor.get(&professor_id);
            match self
                .apply_unassign(&pool, module, professor_id, previous, actor)
                .await
            {
                Ok(()) => {
                    audit_logs_created += 1;
                    to_notify.push((professor_id, AuditAction::Unassign));
                    unassigned.push(ItemResult::new(
                        professor_id,
                        ItemStatus::Unassigned,
                        "unassigned",
                    ));
                }
                Err(e) => {
                    tracing::warn!(
                        module_id = %module_id,
                        professor_id = %professor_id,
                        error = %e,
                        "Failed to unassign professor; continuing with remaining items"
                    );
                    unassigned.push(ItemResult::new(professor_id, ItemStatus::Error, e.to_string()));
                }
            }
        }

        let unchanged: Vec<ItemResult> = diff
            .unchanged
            .iter()
            .map(|&id| ItemResult::new(id, ItemStatus::Unchanged, "already assigned"))
            .collect();

        self.dispatch_notifications(module, &to_notify, actor);

        let report =
            ReconciliationReport::from_items(assigned, unassigned, unchanged, audit_logs_created);

        tracing::info!(
            school_id = %school_id,
            module_id = %module_id,
            total_assigned = report.summary.total_assigned,
            total_unassigned = report.summary.total_unassigned,
            total_unchanged = report.summary.total_unchanged,
            audit_logs_created = report.audit_logs_created,
            "Reconciliation completed"
        );

        Ok(report)
    }

    /// Verify every desired professor exists, belongs to the school, and is
    /// not soft-deleted. Fails before any mutation.
    async fn validate_professors(
        &self,
        school_id: SchoolId,
        desired: &HashSet<Uuid>,
    ) -> Result<()> {
        if desired.is_empty() {
            return Ok(());
        }

        let ids: Vec<Uuid> = desired.iter().copied().collect();
        let found = User::find_professors_in_school(&self.central, school_id.into_uuid(), &ids)
            .await?;
        let found_ids: HashSet<Uuid> = found.iter().map(|u| u.id).collect();

        if let Some(&missing) = desired.iter().find(|id| !found_ids.contains(id)) {
            return Err(AssignmentError::ProfessorNotFound(UserId::from_uuid(missing)));
        }

        Ok(())
    }

    async fn apply_create(
        &self,
        pool: &PgPool,
        module_id: Uuid,
        professor_id: Uuid,
        actor: &Actor,
    ) -> Result<()> {
        let created = ModuleAssignment::create(
            pool,
            module_id,
            professor_id,
            actor.id.into_uuid(),
            &actor.role,
        )
        .await?;

        AssignmentAuditLog::create(
            pool,
            CreateAuditLog {
                module_id,
                professor_id,
                action: AuditAction::Assign,
                performed_by: actor.id.into_uuid(),
                performed_by_role: actor.role.clone(),
                description: "assigned".to_string(),
                previous_data: None,
                new_data: Some(serde_json::to_value(created.snapshot()).unwrap_or_default()),
            },
        )
        .await?;

        Ok(())
    }

    async fn apply_reactivate(
        &self,
        pool: &PgPool,
        module_id: Uuid,
        professor_id: Uuid,
        previous: Option<&ModuleAssignment>,
        actor: &Actor,
    ) -> Result<()> {
        let row = previous.ok_or_else(|| {
            // Snapshot said an inactive row exists; treat its absence as a
            // per-item failure rather than a structural one.
            AssignmentError::Db(campus_db::DbError::NotFound(format!(
                "assignment row for professor {professor_id}"
            )))
        })?;

        let previous_data = serde_json::to_value(row.snapshot()).ok();
        let updated =
            ModuleAssignment::reactivate(pool, row.id, actor.id.into_uuid(), &actor.role).await?;

        AssignmentAuditLog::create(
            pool,
            CreateAuditLog {
                module_id,
                professor_id,
                action: AuditAction::Assign,
                performed_by: actor.id.into_uuid(),
                performed_by_role: actor.role.clone(),
                description: "reactivated".to_string(),
                previous_data,
                new_data: Some(serde_json::to_value(updated.snapshot()).unwrap_or_default()),
            },
        )
        .await?;

        Ok(())
    }

    async fn apply_unassign(
        &self,
        pool: &PgPool,
        module_id: Uuid,
        professor_id: Uuid,
        previous: Option<&ModuleAssignment>,
        actor: &Actor,
    ) -> Result<()> {
        let row = previous.ok_or_else(|| {
            AssignmentError::Db(campus_db::DbError::NotFound(format!(
                "assignment row for professor {professor_id}"
            )))
        })?;

        let previous_data = serde_json::to_value(row.snapshot()).ok();
        let updated =
            ModuleAssignment::deactivate(pool, row.id, actor.id.into_uuid(), &actor.role).await?;

        AssignmentAuditLog::create(
            pool,
            CreateAuditLog {
                module_id,
                professor_id,
                action: AuditAction::Unassign,
                performed_by: actor.id.into_uuid(),
                performed_by_role: actor.role.clone(),
                description: "unassigned".to_string(),
                previous_data,
                new_data: Some(serde_json::to_value(updated.snapshot()).unwrap_or_default()),
            },
        )
        .await?;

        Ok(())
    }

    /// Fire-and-forget delivery, one message per successful mutation.
    ///
    /// Runs on detached tasks after the authoritative writes; failures are
    /// logged and never reach the caller.
    fn dispatch_notifications(&self, module_id: Uuid, items: &[(Uuid, AuditAction)], actor: &Actor) {
        for &(professor_id, action) in items {
            let notification = build_notification(module_id, professor_id, action, actor);
            let notifier = Arc::clone(&self.notifier);

            tokio::spawn(async move {
                if let Err(e) = notifier.notify(&notification).await {
                    tracing::warn!(
                        recipient_id = %notification.recipient_id,
                        error = %e,
                        "Failed to deliver assignment notification"
                    );
                }
            });
        }
    }
}

fn build_notification(
    module_id: Uuid,
    professor_id: Uuid,
    action: AuditAction,
    actor: &Actor,
) -> Notification {
    let (title, message) = match action {
        AuditAction::Assign => (
            "Module assigned".to_string(),
            "You have been assigned to a module.".to_string(),
        ),
        AuditAction::Unassign => (
            "Module unassigned".to_string(),
            "You have been unassigned from a module.".to_string(),
        ),
    };

    Notification {
        recipient_id: professor_id,
        recipient_type: "professor".to_string(),
        title,
        message,
        kind: "module_assignment".to_string(),
        metadata: serde_json::json!({
            "module_id": module_id,
            "action": action.to_string(),
            "performed_by": actor.id,
        }),
    }
}
