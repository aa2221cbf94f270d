//! Course module model (tenant database).
//!
//! Module CRUD belongs to the excluded content layers; the core only needs
//! an existence check before reconciling assignments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::DbError;

/// A course module inside a school's tenant database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CourseModule {
    /// Unique identifier for the module.
    pub id: Uuid,

    /// Module title.
    pub title: String,

    /// Timestamp when the module was created.
    pub created_at: DateTime<Utc>,
}

impl CourseModule {
    /// Finds a module by its ID.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, DbError> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT id, title, created_at
            FROM modules
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(DbError::QueryFailed)
    }

    /// Check if a module exists.
    pub async fn exists(pool: &PgPool, id: Uuid) -> Result<bool, DbError> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(SELECT 1 FROM modules WHERE id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(DbError::QueryFailed)?;

        Ok(result.0)
    }
}
