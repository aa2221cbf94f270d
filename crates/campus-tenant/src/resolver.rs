//! School identity to tenant key resolution.

use campus_core::SchoolId;
use campus_db::models::School;
use sqlx::PgPool;

use crate::error::TenantError;
use crate::registry::TenantRegistry;

/// Resolves a school's logical identity to its tenant key.
///
/// Pure read against the central database; no caching beyond what the
/// driver provides.
#[derive(Debug, Clone)]
pub struct TenantResolver {
    central: PgPool,
}

impl TenantResolver {
    /// Create a resolver over the central database pool.
    #[must_use]
    pub fn new(central: PgPool) -> Self {
        Self { central }
    }

    /// Resolve a school ID to its tenant key.
    ///
    /// # Errors
    ///
    /// - `TenantError::SchoolNotFound` if no school record exists
    /// - `TenantError::TenantKeyMissing` if the record has no tenant key
    pub async fn resolve_tenant_key(&self, school_id: SchoolId) -> Result<String, TenantError> {
        let school = School::find_by_id(&self.central, school_id.into_uuid())
            .await?
            .ok_or(TenantError::SchoolNotFound(school_id))?;

        if !school.is_active() {
            tracing::debug!(school_id = %school_id, "Resolving tenant key for inactive school");
        }

        school
            .tenant_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(TenantError::TenantKeyMissing(school_id))
    }

    /// Resolve a school ID straight to its shared tenant pool.
    pub async fn resolve_pool(
        &self,
        registry: &TenantRegistry,
        school_id: SchoolId,
    ) -> Result<PgPool, TenantError> {
        let tenant_key = self.resolve_tenant_key(school_id).await?;
        registry.get_pool(&tenant_key).await
    }
}
