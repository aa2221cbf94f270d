//! # campus-db
//!
//! Database layer for the campus multi-school backend.
//!
//! The platform splits its data across one central database (schools,
//! users) and one isolated database per school (modules, assignments,
//! audit trail). This crate holds the entity models for both, the shared
//! [`DbError`] type, and the embedded migration sets.
//!
//! Connection routing to tenant databases lives in `campus-tenant`; models
//! here take whichever `PgPool` the caller resolved.
//!
//! ## Example
//!
//! ```rust,ignore
//! use campus_db::models::School;
//!
//! let school = School::find_by_id(&central_pool, school_id).await?;
//! ```

pub mod error;
pub mod migrations;
pub mod models;

pub use error::DbError;
pub use migrations::{run_central_migrations, run_tenant_migrations};
