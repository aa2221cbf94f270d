//! Error types for tenant resolution and routing.

use campus_core::{CampusError, SchoolId};
use campus_db::DbError;
use thiserror::Error;

/// Errors raised while resolving or opening tenant database connections.
#[derive(Debug, Error)]
pub enum TenantError {
    /// The tenant database base URL is missing or unusable.
    ///
    /// Fatal; surfaced to the caller as a server-side failure and never
    /// retried.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A tenant key contains characters that cannot name a database.
    #[error("Invalid tenant key: {0}")]
    InvalidTenantKey(String),

    /// No school record exists for the given ID.
    #[error("School not found: {0}")]
    SchoolNotFound(SchoolId),

    /// The school record exists but carries no tenant key.
    ///
    /// Configuration-class failure: the school has not been provisioned.
    #[error("School {0} has no tenant key configured")]
    TenantKeyMissing(SchoolId),

    /// Opening the tenant database connection failed.
    ///
    /// The tenant key is not cached after this error, so a subsequent call
    /// retries cleanly.
    #[error("Failed to open tenant database: {0}")]
    Connection(#[source] sqlx::Error),

    /// Central database lookup failed.
    #[error(transparent)]
    Db(#[from] DbError),
}

impl TenantError {
    /// Check if this error is a configuration-class failure.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            TenantError::Configuration(_) | TenantError::TenantKeyMissing(_)
        )
    }

    /// Check if this error indicates a missing school.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, TenantError::SchoolNotFound(_))
    }
}

/// Fold routing errors into the shared tagged taxonomy for callers that
/// serialize errors across crate boundaries.
impl From<TenantError> for CampusError {
    fn from(err: TenantError) -> Self {
        match err {
            TenantError::Configuration(message) => CampusError::Configuration { message },
            TenantError::InvalidTenantKey(key) => CampusError::ValidationError {
                field: "tenant_key".to_string(),
                message: format!("'{key}' cannot name a tenant database"),
            },
            TenantError::SchoolNotFound(id) => CampusError::NotFound {
                resource: "School".to_string(),
                id: Some(id.to_string()),
            },
            TenantError::TenantKeyMissing(id) => CampusError::Configuration {
                message: format!("school {id} has no tenant key configured"),
            },
            TenantError::Connection(e) => CampusError::Internal {
                message: e.to_string(),
            },
            TenantError::Db(e) => CampusError::Internal {
                message: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_display() {
        let err = TenantError::Configuration("base URL is not set".to_string());
        assert_eq!(err.to_string(), "Configuration error: base URL is not set");
        assert!(err.is_configuration());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_tenant_key_missing_is_configuration_class() {
        let err = TenantError::TenantKeyMissing(SchoolId::new());
        assert!(err.is_configuration());
    }

    #[test]
    fn test_school_not_found_display() {
        let id = SchoolId::new();
        let err = TenantError::SchoolNotFound(id);
        assert!(err.to_string().contains(&id.to_string()));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_school_not_found_folds_to_tagged_not_found() {
        let id = SchoolId::new();
        let campus: CampusError = TenantError::SchoolNotFound(id).into();

        assert!(campus.is_not_found());
        let json = serde_json::to_value(&campus).unwrap();
        assert_eq!(json["type"], "not_found");
        assert_eq!(json["resource"], "School");
        assert_eq!(json["id"], id.to_string());
    }

    #[test]
    fn test_missing_key_folds_to_configuration() {
        let campus: CampusError = TenantError::TenantKeyMissing(SchoolId::new()).into();
        assert!(campus.is_configuration());
    }

    #[test]
    fn test_invalid_key_folds_to_validation() {
        let campus: CampusError = TenantError::InvalidTenantKey("bad key".to_string()).into();
        let json = serde_json::to_value(&campus).unwrap();
        assert_eq!(json["type"], "validation_error");
        assert_eq!(json["field"], "tenant_key");
    }
}
