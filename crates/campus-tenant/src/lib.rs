//! # campus-tenant
//!
//! Tenant database routing for the campus multi-school backend.
//!
//! Each school owns an isolated database. This crate turns a school's
//! logical identity into a live, shared connection pool on that database:
//!
//! 1. [`TenantResolver`] looks the school up in the central database and
//!    returns its tenant key (the database name).
//! 2. [`TenantRegistry`] maps tenant keys to pools, creating each pool on
//!    first use and sharing it for the process lifetime. Creation is
//!    single-flight per key; a failed creation is never cached.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use campus_tenant::{TenantDbConfig, TenantRegistry, TenantResolver};
//!
//! let registry = TenantRegistry::new(TenantDbConfig::from_env()?);
//! let resolver = TenantResolver::new(central_pool);
//!
//! let pool = resolver.resolve_pool(&registry, school_id).await?;
//! // All tenant-scoped queries for this school go through `pool`.
//! ```

mod config;
mod error;
mod registry;
mod resolver;

pub use config::{TenantDbConfig, TenantDbConfigBuilder, TENANT_DATABASE_URL_VAR};
pub use error::TenantError;
pub use registry::TenantRegistry;
pub use resolver::TenantResolver;
