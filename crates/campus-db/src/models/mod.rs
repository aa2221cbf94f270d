//! Database entity models for campus-db.
//!
//! Central database models (`School`, `User`) and tenant database models
//! (`CourseModule`, `ModuleAssignment`, `AssignmentAuditLog`). These models
//! represent the tables and provide type-safe interactions with PostgreSQL.

pub mod assignment_audit_log;
pub mod course_module;
pub mod module_assignment;
pub mod school;
pub mod user;

pub use assignment_audit_log::{
    AssignmentAuditLog, AuditAction, AuditLogFilter, CreateAuditLog,
};
pub use course_module::CourseModule;
pub use module_assignment::{AssignmentSnapshot, ModuleAssignment};
pub use school::{School, SchoolStatus};
pub use user::{User, ROLE_PROFESSOR};
