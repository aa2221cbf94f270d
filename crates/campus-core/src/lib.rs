//! campus Core Library
//!
//! Shared types for the campus multi-school backend.
//!
//! # Modules
//!
//! - [`ids`] - Strongly typed identifiers (SchoolId, ModuleId, UserId)
//! - [`error`] - Standardized error types (CampusError)
//!
//! # Example
//!
//! ```
//! use campus_core::{SchoolId, UserId, CampusError, Result};
//!
//! // Create strongly typed IDs
//! let school_id = SchoolId::new();
//! let user_id = UserId::new();
//!
//! // Use Result type alias
//! fn example() -> Result<()> {
//!     Err(CampusError::NotFound {
//!         resource: "School".to_string(),
//!         id: None,
//!     })
//! }
//! ```

pub mod error;
pub mod ids;

// Re-export main types for convenient access
pub use error::{CampusError, Result};
pub use ids::{ModuleId, SchoolId, UserId};
