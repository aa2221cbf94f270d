//! Assignment audit log model (tenant database).
//!
//! Append-only trail of every assignment mutation. Entries are written
//! exactly once, in the same logical step as the mutation they describe,
//! and are never updated or deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::DbError;

/// The kind of mutation an audit entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    /// A professor was granted the module (fresh grant or reactivation).
    Assign,
    /// A professor's grant was revoked.
    Unassign,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditAction::Assign => write!(f, "ASSIGN"),
            AuditAction::Unassign => write!(f, "UNASSIGN"),
        }
    }
}

impl std::str::FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ASSIGN" => Ok(AuditAction::Assign),
            "UNASSIGN" => Ok(AuditAction::Unassign),
            other => Err(format!("unknown audit action: {other}")),
        }
    }
}

/// An assignment audit log entry.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AssignmentAuditLog {
    /// Unique identifier for the log entry.
    pub id: Uuid,

    /// The module the mutation targeted.
    pub module_id: Uuid,

    /// The professor the mutation targeted.
    pub professor_id: Uuid,

    /// The mutation kind ("ASSIGN" or "UNASSIGN").
    pub action: String,

    /// Who performed the mutation.
    pub performed_by: Uuid,

    /// Role of the performing actor.
    pub performed_by_role: String,

    /// Human description (e.g., "assigned", "reactivated").
    pub description: String,

    /// Attribution fields before the mutation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_data: Option<serde_json::Value>,

    /// Attribution fields after the mutation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_data: Option<serde_json::Value>,

    /// When the mutation was performed.
    pub created_at: DateTime<Utc>,
}

/// Request to create an audit log entry.
#[derive(Debug, Clone)]
pub struct CreateAuditLog {
    pub module_id: Uuid,
    pub professor_id: Uuid,
    pub action: AuditAction,
    pub performed_by: Uuid,
    pub performed_by_role: String,
    pub description: String,
    pub previous_data: Option<serde_json::Value>,
    pub new_data: Option<serde_json::Value>,
}

/// Filter for audit log listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditLogFilter {
    /// Restrict to one module.
    pub module_id: Option<Uuid>,
    /// Restrict to one professor.
    pub professor_id: Option<Uuid>,
}

impl AssignmentAuditLog {
    /// Create a new audit log entry.
    pub async fn create(pool: &PgPool, log: CreateAuditLog) -> Result<Self, DbError> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO assignment_audit_logs (
                module_id, professor_id, action, performed_by,
                performed_by_role, description, previous_data, new_data
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, module_id, professor_id, action, performed_by,
                      performed_by_role, description, previous_data, new_data,
                      created_at
            "#,
        )
        .bind(log.module_id)
        .bind(log.professor_id)
        .bind(log.action.to_string())
        .bind(log.performed_by)
        .bind(&log.performed_by_role)
        .bind(&log.description)
        .bind(&log.previous_data)
        .bind(&log.new_data)
        .fetch_one(pool)
        .await
        .map_err(DbError::QueryFailed)
    }

    /// List audit log entries, newest first, with pagination.
    pub async fn list(
        pool: &PgPool,
        filter: &AuditLogFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, DbError> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT id, module_id, professor_id, action, performed_by,
                   performed_by_role, description, previous_data, new_data,
                   created_at
            FROM assignment_audit_logs
            WHERE ($1::uuid IS NULL OR module_id = $1)
              AND ($2::uuid IS NULL OR professor_id = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filter.module_id)
        .bind(filter.professor_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .map_err(DbError::QueryFailed)
    }

    /// Count audit log entries matching a filter.
    pub async fn count(pool: &PgPool, filter: &AuditLogFilter) -> Result<i64, DbError> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM assignment_audit_logs
            WHERE ($1::uuid IS NULL OR module_id = $1)
              AND ($2::uuid IS NULL OR professor_id = $2)
            "#,
        )
        .bind(filter.module_id)
        .bind(filter.professor_id)
        .fetch_one(pool)
        .await
        .map_err(DbError::QueryFailed)?;

        Ok(result.0)
    }
}
