//! Module assignment model (tenant database).
//!
//! One row per (module, professor) pair. The row is reused across
//! assign/unassign/reassign cycles: reconciliation toggles `is_active`
//! instead of inserting duplicates, and never hard-deletes. History lives
//! in the append-only audit log, not in this table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::DbError;

/// The professor↔module relation inside a tenant database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ModuleAssignment {
    /// Unique identifier for the assignment row.
    pub id: Uuid,

    /// The module being assigned.
    pub module_id: Uuid,

    /// The professor assigned to the module (central user ID).
    pub professor_id: Uuid,

    /// Who performed the current grant. NULL while inactive so a stale
    /// actor is never attributed to a revoked assignment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_by: Option<Uuid>,

    /// Role of the granting actor at grant time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_by_role: Option<String>,

    /// When the current grant happened. NULL while inactive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_at: Option<DateTime<Utc>>,

    /// Whether the assignment is currently in force.
    pub is_active: bool,

    /// When the last revoke happened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unassigned_at: Option<DateTime<Utc>>,

    /// Who performed the last revoke.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unassigned_by: Option<Uuid>,

    /// Role of the revoking actor at revoke time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unassigned_by_role: Option<String>,

    /// Row creation time (first grant).
    pub created_at: DateTime<Utc>,

    /// Last mutation time.
    pub updated_at: DateTime<Utc>,
}

/// Point-in-time view of an assignment's attribution fields, stored in
/// audit entries as `previous_data`/`new_data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentSnapshot {
    /// When the grant happened (if active).
    pub assigned_at: Option<DateTime<Utc>>,
    /// Who performed the grant (if active).
    pub assigned_by: Option<Uuid>,
    /// Whether the assignment was in force.
    pub is_active: bool,
}

impl ModuleAssignment {
    /// Capture the attribution fields for an audit snapshot.
    #[must_use]
    pub fn snapshot(&self) -> AssignmentSnapshot {
        AssignmentSnapshot {
            assigned_at: self.assigned_at,
            assigned_by: self.assigned_by,
            is_active: self.is_active,
        }
    }

    /// Lists every assignment row (active and inactive) for a module.
    ///
    /// Reconciliation reads this once to build its point-in-time view of
    /// both the active set and the set of reusable inactive rows.
    pub async fn list_by_module(pool: &PgPool, module_id: Uuid) -> Result<Vec<Self>, DbError> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT id, module_id, professor_id, assigned_by, assigned_by_role,
                   assigned_at, is_active, unassigned_at, unassigned_by,
                   unassigned_by_role, created_at, updated_at
            FROM module_assignments
            WHERE module_id = $1
            "#,
        )
        .bind(module_id)
        .fetch_all(pool)
        .await
        .map_err(DbError::QueryFailed)
    }

    /// Lists active assignments for a module.
    pub async fn list_active_by_module(
        pool: &PgPool,
        module_id: Uuid,
    ) -> Result<Vec<Self>, DbError> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT id, module_id, professor_id, assigned_by, assigned_by_role,
                   assigned_at, is_active, unassigned_at, unassigned_by,
                   unassigned_by_role, created_at, updated_at
            FROM module_assignments
            WHERE module_id = $1 AND is_active = TRUE
            "#,
        )
        .bind(module_id)
        .fetch_all(pool)
        .await
        .map_err(DbError::QueryFailed)
    }

    /// Finds the assignment row for a (module, professor) pair, if any.
    pub async fn find_by_module_and_professor(
        pool: &PgPool,
        module_id: Uuid,
        professor_id: Uuid,
    ) -> Result<Option<Self>, DbError> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT id, module_id, professor_id, assigned_by, assigned_by_role,
                   assigned_at, is_active, unassigned_at, unassigned_by,
                   unassigned_by_role, created_at, updated_at
            FROM module_assignments
            WHERE module_id = $1 AND professor_id = $2
            "#,
        )
        .bind(module_id)
        .bind(professor_id)
        .fetch_optional(pool)
        .await
        .map_err(DbError::QueryFailed)
    }

    /// Creates a fresh active assignment for a (module, professor) pair.
    pub async fn create(
        pool: &PgPool,
        module_id: Uuid,
        professor_id: Uuid,
        assigned_by: Uuid,
        assigned_by_role: &str,
    ) -> Result<Self, DbError> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO module_assignments
                (module_id, professor_id, assigned_by, assigned_by_role,
                 assigned_at, is_active)
            VALUES ($1, $2, $3, $4, NOW(), TRUE)
            RETURNING id, module_id, professor_id, assigned_by, assigned_by_role,
                      assigned_at, is_active, unassigned_at, unassigned_by,
                      unassigned_by_role, created_at, updated_at
            "#,
        )
        .bind(module_id)
        .bind(professor_id)
        .bind(assigned_by)
        .bind(assigned_by_role)
        .fetch_one(pool)
        .await
        .map_err(DbError::QueryFailed)
    }

    /// Reactivates an inactive assignment row.
    ///
    /// Restores active attribution and clears all revoke fields, so the row
    /// reads exactly like a fresh grant.
    pub async fn reactivate(
        pool: &PgPool,
        id: Uuid,
        assigned_by: Uuid,
        assigned_by_role: &str,
    ) -> Result<Self, DbError> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE module_assignments
            SET is_active = TRUE,
                assigned_by = $2,
                assigned_by_role = $3,
                assigned_at = NOW(),
                unassigned_at = NULL,
                unassigned_by = NULL,
                unassigned_by_role = NULL,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, module_id, professor_id, assigned_by, assigned_by_role,
                      assigned_at, is_active, unassigned_at, unassigned_by,
                      unassigned_by_role, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(assigned_by)
        .bind(assigned_by_role)
        .fetch_one(pool)
        .await
        .map_err(DbError::QueryFailed)
    }

    /// Deactivates an active assignment row.
    ///
    /// Records revoke attribution and nulls the grant fields so the revoked
    /// row carries no stale attribution.
    pub async fn deactivate(
        pool: &PgPool,
        id: Uuid,
        unassigned_by: Uuid,
        unassigned_by_role: &str,
    ) -> Result<Self, DbError> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE module_assignments
            SET is_active = FALSE,
                unassigned_at = NOW(),
                unassigned_by = $2,
                unassigned_by_role = $3,
                assigned_at = NULL,
                assigned_by = NULL,
                assigned_by_role = NULL,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, module_id, professor_id, assigned_by, assigned_by_role,
                      assigned_at, is_active, unassigned_at, unassigned_by,
                      unassigned_by_role, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(unassigned_by)
        .bind(unassigned_by_role)
        .fetch_one(pool)
        .await
        .map_err(DbError::QueryFailed)
    }
}
