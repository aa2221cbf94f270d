//! Error Types
//!
//! This module provides standardized error types for the campus backend.
//!
//! # Example
//!
//! ```
//! use campus_core::{CampusError, Result};
//!
//! fn find_school(id: &str) -> Result<String> {
//!     if id.is_empty() {
//!         return Err(CampusError::NotFound {
//!             resource: "School".to_string(),
//!             id: None,
//!         });
//!     }
//!     Ok(format!("School {}", id))
//! }
//! ```

use serde::Serialize;
use thiserror::Error;

/// Standardized error type for the campus backend.
///
/// Each variant maps to one of the error classes of the core:
///
/// - `NotFound` - structural precondition failure, aborts the whole call
/// - `Configuration` - fatal server-side misconfiguration, never retried
/// - `ValidationError` - input validation failure
/// - `Internal` - unexpected infrastructure failure
///
/// The domain crates convert their own error enums into this type
/// (`CampusError::from(TenantError)`, `CampusError::from(AssignmentError)`)
/// so callers serialize one tagged taxonomy regardless of which layer
/// failed.
#[derive(Debug, Clone, Error, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CampusError {
    /// Requested resource was not found.
    ///
    /// Use when a database lookup returns no results. Calls failing with
    /// this error have performed no mutation.
    #[error("{resource} not found{}", id.as_ref().map(|i| format!(": {i}")).unwrap_or_default())]
    NotFound {
        /// The type of resource that was not found (e.g., "School", "Module")
        resource: String,
        /// Optional identifier of the resource
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },

    /// Server-side configuration problem.
    ///
    /// Use for missing connection URIs or school records with no tenant
    /// key. Fatal; not retried.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the misconfiguration
        message: String,
    },

    /// Input validation failure.
    #[error("Validation error on field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Description of the validation failure
        message: String,
    },

    /// Unexpected server-side failure.
    ///
    /// Wraps database and connection errors whose details callers cannot
    /// act on.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the failure
        message: String,
    },
}

impl CampusError {
    /// Check if this error indicates a missing resource.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, CampusError::NotFound { .. })
    }

    /// Check if this error indicates a configuration problem.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, CampusError::Configuration { .. })
    }
}

/// Type alias for Results using `CampusError`.
///
/// ```
/// use campus_core::{Result, CampusError};
///
/// fn example() -> Result<String> {
///     Ok("success".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, CampusError>;
