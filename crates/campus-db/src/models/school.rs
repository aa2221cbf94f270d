//! School model (central database).
//!
//! A school is the unit of tenancy: its `tenant_key` names the isolated
//! database holding its operational data. The core only reads school
//! records; school management flows live elsewhere.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Type};
use uuid::Uuid;

use crate::DbError;

/// Lifecycle status of a school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Type, Serialize, Deserialize)]
#[sqlx(type_name = "school_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SchoolStatus {
    /// School is operating normally.
    #[default]
    Active,
    /// School is disabled; its tenant database may still exist.
    Inactive,
}

impl std::fmt::Display for SchoolStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchoolStatus::Active => write!(f, "active"),
            SchoolStatus::Inactive => write!(f, "inactive"),
        }
    }
}

/// A school registered in the central database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct School {
    /// Unique identifier for the school.
    pub id: Uuid,

    /// Human-readable name (e.g., "Lakeside High").
    pub name: String,

    /// Name of the school's isolated tenant database.
    /// NULL means the school has not been provisioned yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_key: Option<String>,

    /// Lifecycle status.
    pub status: SchoolStatus,

    /// Timestamp when the school was created.
    pub created_at: DateTime<Utc>,
}

impl School {
    /// Returns `true` if the school is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == SchoolStatus::Active
    }

    /// Finds a school by its ID.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, DbError> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT id, name, tenant_key, status, created_at
            FROM schools
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(DbError::QueryFailed)
    }

    /// Finds a school by its tenant key.
    pub async fn find_by_tenant_key(pool: &PgPool, tenant_key: &str) -> Result<Option<Self>, DbError> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT id, name, tenant_key, status, created_at
            FROM schools
            WHERE tenant_key = $1
            "#,
        )
        .bind(tenant_key)
        .fetch_optional(pool)
        .await
        .map_err(DbError::QueryFailed)
    }

    /// Lists all active schools.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Self>, DbError> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT id, name, tenant_key, status, created_at
            FROM schools
            WHERE status = 'active'
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(DbError::QueryFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn school(tenant_key: Option<&str>, status: SchoolStatus) -> School {
        School {
            id: Uuid::new_v4(),
            name: "Lakeside High".to_string(),
            tenant_key: tenant_key.map(str::to_string),
            status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_school_status_default() {
        assert_eq!(SchoolStatus::default(), SchoolStatus::Active);
    }

    #[test]
    fn test_school_status_display() {
        assert_eq!(SchoolStatus::Active.to_string(), "active");
        assert_eq!(SchoolStatus::Inactive.to_string(), "inactive");
    }

    #[test]
    fn test_is_active() {
        assert!(school(Some("school_lakeside"), SchoolStatus::Active).is_active());
        assert!(!school(Some("school_lakeside"), SchoolStatus::Inactive).is_active());
    }

    #[test]
    fn test_serialization_skips_missing_tenant_key() {
        let json = serde_json::to_string(&school(None, SchoolStatus::Active)).unwrap();
        assert!(!json.contains("tenant_key"));

        let json = serde_json::to_string(&school(Some("school_lakeside"), SchoolStatus::Active))
            .unwrap();
        assert!(json.contains("\"tenant_key\":\"school_lakeside\""));
    }
}
