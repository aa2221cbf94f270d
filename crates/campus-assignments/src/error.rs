//! Error types for assignment reconciliation.

use campus_core::{CampusError, ModuleId, UserId};
use campus_db::DbError;
use campus_tenant::TenantError;
use thiserror::Error;

/// Errors raised by reconciliation and audit log reads.
///
/// Structural precondition failures (school, module, professor existence)
/// abort the whole call before any mutation. Failures inside the per-item
/// mutation loop never surface here; they become `error` items in the
/// result set.
#[derive(Debug, Error)]
pub enum AssignmentError {
    /// The module does not exist in the school's tenant database.
    #[error("Module not found: {0}")]
    ModuleNotFound(ModuleId),

    /// A desired professor does not exist, belongs to a different school,
    /// or is soft-deleted.
    #[error("Professor not found in school: {0}")]
    ProfessorNotFound(UserId),

    /// Tenant resolution or routing failed.
    #[error(transparent)]
    Tenant(#[from] TenantError),

    /// A database operation outside the per-item loop failed.
    #[error(transparent)]
    Db(#[from] DbError),
}

impl AssignmentError {
    /// Check if this error is a NotFound-class precondition failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            AssignmentError::ModuleNotFound(_) | AssignmentError::ProfessorNotFound(_) => true,
            AssignmentError::Tenant(e) => e.is_not_found(),
            AssignmentError::Db(e) => e.is_not_found(),
        }
    }
}

/// Fold assignment errors into the shared tagged taxonomy for callers
/// that serialize errors across crate boundaries.
impl From<AssignmentError> for CampusError {
    fn from(err: AssignmentError) -> Self {
        match err {
            AssignmentError::ModuleNotFound(id) => CampusError::NotFound {
                resource: "Module".to_string(),
                id: Some(id.to_string()),
            },
            AssignmentError::ProfessorNotFound(id) => CampusError::NotFound {
                resource: "Professor".to_string(),
                id: Some(id.to_string()),
            },
            AssignmentError::Tenant(e) => e.into(),
            AssignmentError::Db(e) => CampusError::Internal {
                message: e.to_string(),
            },
        }
    }
}

/// Result type for assignment operations.
pub type Result<T> = std::result::Result<T, AssignmentError>;
