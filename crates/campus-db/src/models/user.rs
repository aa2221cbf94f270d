//! User model (central database).
//!
//! Users (professors, admins) live in the central database and are
//! referenced from tenant databases by raw UUID. The core reads users for
//! professor validation and display-name resolution only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use uuid::Uuid;

use crate::DbError;

/// Role name for professors.
pub const ROLE_PROFESSOR: &str = "professor";

/// A user in the central database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: Uuid,

    /// The school this user belongs to.
    pub school_id: Uuid,

    /// Display name shown in audit log listings.
    pub display_name: String,

    /// Email address.
    pub email: String,

    /// Role name (e.g., "professor", "admin").
    pub role: String,

    /// Timestamp when the user was soft deleted. NULL means active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,

    /// Timestamp when the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Returns `true` if this user has been soft deleted.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Finds a user by its ID.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, DbError> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT id, school_id, display_name, email, role, deleted_at, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(DbError::QueryFailed)
    }

    /// Finds the professors among `ids` that belong to `school_id` and are
    /// not soft-deleted.
    ///
    /// Callers compare the returned set against the requested set to detect
    /// unknown, foreign, or deleted professors before mutating anything.
    pub async fn find_professors_in_school(
        pool: &PgPool,
        school_id: Uuid,
        ids: &[Uuid],
    ) -> Result<Vec<Self>, DbError> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT id, school_id, display_name, email, role, deleted_at, created_at
            FROM users
            WHERE id = ANY($1)
              AND school_id = $2
              AND role = $3
              AND deleted_at IS NULL
            "#,
        )
        .bind(ids)
        .bind(school_id)
        .bind(ROLE_PROFESSOR)
        .fetch_all(pool)
        .await
        .map_err(DbError::QueryFailed)
    }

    /// Resolves display names for a batch of user IDs.
    ///
    /// Missing or deleted users are simply absent from the returned map;
    /// read paths fall back to the raw UUID in that case.
    pub async fn display_names(
        pool: &PgPool,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, String>, DbError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(Uuid, String)> = sqlx::query_as(
            r#"
            SELECT id, display_name
            FROM users
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(pool)
        .await
        .map_err(DbError::QueryFailed)?;

        Ok(rows.into_iter().collect())
    }
}
