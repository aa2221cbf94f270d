//! Paginated audit log reads with display-name resolution.
//!
//! Audit entries live in the tenant database and carry raw user UUIDs;
//! display names live centrally. The reader pages the tenant rows first,
//! then resolves names for just that page with one batched central query.
//! A missing name never fails the read; the view falls back to the UUID.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use campus_core::SchoolId;
use campus_db::models::{AssignmentAuditLog, AuditLogFilter, User};
use campus_tenant::{TenantRegistry, TenantResolver};

use crate::error::Result;

const DEFAULT_PER_PAGE: i64 = 20;
const MAX_PER_PAGE: i64 = 100;

/// Page selection for audit log listings. Pages are 1-based.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    /// Requested page number; values below 1 are clamped to 1.
    pub page: i64,
    /// Requested page size; clamped to `[1, 100]`.
    pub per_page: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    /// Build a page request; out-of-range values are clamped on use.
    #[must_use]
    pub fn new(page: i64, per_page: i64) -> Self {
        Self { page, per_page }
    }

    fn page_clamped(&self) -> i64 {
        self.page.max(1)
    }

    fn per_page_clamped(&self) -> i64 {
        self.per_page.clamp(1, MAX_PER_PAGE)
    }

    fn offset(&self) -> i64 {
        (self.page_clamped() - 1) * self.per_page_clamped()
    }
}

/// Pagination metadata returned alongside a page of entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// The page actually served (after clamping).
    pub page: i64,
    /// The page size actually used (after clamping).
    pub per_page: i64,
    /// Total entries matching the filter.
    pub total: i64,
    /// Total pages at this page size.
    pub total_pages: i64,
}

impl PageInfo {
    fn new(page: i64, per_page: i64, total: i64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + per_page - 1) / per_page
        };
        Self {
            page,
            per_page,
            total,
            total_pages,
        }
    }
}

/// One audit entry enriched with resolved display names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntryView {
    pub id: Uuid,
    pub module_id: Uuid,
    pub professor_id: Uuid,
    /// Professor display name; `None` when the central user is gone.
    pub professor_name: Option<String>,
    pub action: String,
    pub performed_by: Uuid,
    /// Actor display name; `None` when the central user is gone.
    pub performed_by_name: Option<String>,
    pub performed_by_role: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_data: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl AuditLogEntryView {
    fn from_log(log: AssignmentAuditLog, names: &HashMap<Uuid, String>) -> Self {
        Self {
            professor_name: names.get(&log.professor_id).cloned(),
            performed_by_name: names.get(&log.performed_by).cloned(),
            id: log.id,
            module_id: log.module_id,
            professor_id: log.professor_id,
            action: log.action,
            performed_by: log.performed_by,
            performed_by_role: log.performed_by_role,
            description: log.description,
            previous_data: log.previous_data,
            new_data: log.new_data,
            created_at: log.created_at,
        }
    }
}

/// One page of audit log entries, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogPage {
    pub entries: Vec<AuditLogEntryView>,
    pub page_info: PageInfo,
}

/// Read access to a school's assignment audit trail.
pub struct AuditLogService {
    central: PgPool,
    resolver: TenantResolver,
    registry: Arc<TenantRegistry>,
}

impl AuditLogService {
    /// Create a new audit log service.
    #[must_use]
    pub fn new(central: PgPool, registry: Arc<TenantRegistry>) -> Self {
        Self {
            resolver: TenantResolver::new(central.clone()),
            central,
            registry,
        }
    }

    /// List audit entries for a school, newest first, with names resolved.
    pub async fn list(
        &self,
        school_id: SchoolId,
        filter: &AuditLogFilter,
        page: &PageRequest,
    ) -> Result<AuditLogPage> {
        let pool = self.resolver.resolve_pool(&self.registry, school_id).await?;

        let per_page = page.per_page_clamped();
        let logs = AssignmentAuditLog::list(&pool, filter, per_page, page.offset()).await?;
        let total = AssignmentAuditLog::count(&pool, filter).await?;

        let names = self.resolve_names(&logs).await?;
        let entries = logs
            .into_iter()
            .map(|log| AuditLogEntryView::from_log(log, &names))
            .collect();

        Ok(AuditLogPage {
            entries,
            page_info: PageInfo::new(page.page_clamped(), per_page, total),
        })
    }

    async fn resolve_names(
        &self,
        logs: &[AssignmentAuditLog],
    ) -> Result<HashMap<Uuid, String>> {
        let ids: HashSet<Uuid> = logs
            .iter()
            .flat_map(|log| [log.professor_id, log.performed_by])
            .collect();
        let ids: Vec<Uuid> = ids.into_iter().collect();

        Ok(User::display_names(&self.central, &ids).await?)
    }
}
