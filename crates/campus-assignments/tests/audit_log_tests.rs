//! Integration tests for audit log reads.
//!
//! These tests require a running PostgreSQL instance with the central and
//! tenant test databases created.
//! Run with: `cargo test -p campus-assignments --features integration`

mod common;

#[cfg(feature = "integration")]
mod integration_tests {
    use super::common::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    use campus_assignments::{
        Actor, AuditLogService, LogNotifier, PageRequest, ReconciliationEngine,
    };
    use campus_core::{ModuleId, UserId};
    use campus_db::models::AuditLogFilter;

    struct AuditSetup {
        fixture: TestFixture,
        service: AuditLogService,
        engine: ReconciliationEngine,
        actor: Actor,
        module_id: ModuleId,
    }

    async fn setup(module_title: &str) -> AuditSetup {
        let fixture = TestFixture::new().await;
        let service = AuditLogService::new(fixture.central.clone(), Arc::clone(&fixture.registry));
        let engine = ReconciliationEngine::new(
            fixture.central.clone(),
            Arc::clone(&fixture.registry),
            Arc::new(LogNotifier),
        );
        let actor = Actor::new(fixture.create_user("Audit Admin", "admin").await, "admin");
        let module_id = fixture.create_module(module_title).await;

        AuditSetup {
            fixture,
            service,
            engine,
            actor,
            module_id,
        }
    }

    async fn reconcile(setup: &AuditSetup, ids: &[UserId]) {
        let desired: HashSet<UserId> = ids.iter().copied().collect();
        setup
            .engine
            .reconcile(setup.fixture.school_id, setup.module_id, &desired, &setup.actor)
            .await
            .expect("reconcile");
    }

    fn module_filter(module_id: ModuleId) -> AuditLogFilter {
        AuditLogFilter {
            module_id: Some(module_id.into_uuid()),
            professor_id: None,
        }
    }

    #[tokio::test]
    async fn test_list_resolves_names_newest_first() {
        let s = setup("Audit Module").await;
        let a = s.fixture.create_professor("Ada Lovelace").await;
        let b = s.fixture.create_professor("Grace Hopper").await;

        reconcile(&s, &[a]).await;
        reconcile(&s, &[b]).await; // unassigns A, assigns B

        let page = s
            .service
            .list(
                s.fixture.school_id,
                &module_filter(s.module_id),
                &PageRequest::default(),
            )
            .await
            .expect("list");

        assert_eq!(page.page_info.total, 3);
        assert_eq!(page.entries.len(), 3);

        // Newest first: the second reconcile's entries precede the first's.
        assert_eq!(page.entries[2].action, "ASSIGN");
        assert_eq!(page.entries[2].professor_name.as_deref(), Some("Ada Lovelace"));

        for entry in &page.entries {
            assert_eq!(entry.performed_by_name.as_deref(), Some("Audit Admin"));
            assert_eq!(entry.performed_by_role, "admin");
        }

        let names: Vec<_> = page
            .entries
            .iter()
            .filter_map(|e| e.professor_name.as_deref())
            .collect();
        assert!(names.contains(&"Ada Lovelace"));
        assert!(names.contains(&"Grace Hopper"));

        s.fixture.cleanup(s.module_id).await;
    }

    #[tokio::test]
    async fn test_pagination_math_and_bounds() {
        let s = setup("Paged Module").await;
        let a = s.fixture.create_professor("Prof A").await;

        // Three assign/unassign cycles produce six audit entries.
        for _ in 0..3 {
            reconcile(&s, &[a]).await;
            reconcile(&s, &[]).await;
        }

        let filter = module_filter(s.module_id);

        let first = s
            .service
            .list(s.fixture.school_id, &filter, &PageRequest::new(1, 4))
            .await
            .expect("page 1");
        assert_eq!(first.entries.len(), 4);
        assert_eq!(first.page_info.total, 6);
        assert_eq!(first.page_info.total_pages, 2);

        let second = s
            .service
            .list(s.fixture.school_id, &filter, &PageRequest::new(2, 4))
            .await
            .expect("page 2");
        assert_eq!(second.entries.len(), 2);
        assert_eq!(second.page_info.page, 2);

        // Past the end: empty page, same totals.
        let beyond = s
            .service
            .list(s.fixture.school_id, &filter, &PageRequest::new(9, 4))
            .await
            .expect("page beyond end");
        assert!(beyond.entries.is_empty());
        assert_eq!(beyond.page_info.total, 6);

        s.fixture.cleanup(s.module_id).await;
    }

    #[tokio::test]
    async fn test_filter_by_professor() {
        let s = setup("Filtered Module").await;
        let a = s.fixture.create_professor("Prof A").await;
        let b = s.fixture.create_professor("Prof B").await;

        reconcile(&s, &[a, b]).await;
        reconcile(&s, &[b]).await; // unassigns A

        let filter = AuditLogFilter {
            module_id: Some(s.module_id.into_uuid()),
            professor_id: Some(a.into_uuid()),
        };
        let page = s
            .service
            .list(s.fixture.school_id, &filter, &PageRequest::default())
            .await
            .expect("list");

        assert_eq!(page.page_info.total, 2);
        assert!(page
            .entries
            .iter()
            .all(|e| e.professor_id == a.into_uuid()));
        assert_eq!(page.entries[0].action, "UNASSIGN");
        assert_eq!(page.entries[1].action, "ASSIGN");

        s.fixture.cleanup(s.module_id).await;
    }

    #[tokio::test]
    async fn test_missing_central_user_falls_back_to_none() {
        let s = setup("Orphaned Module").await;
        let a = s.fixture.create_professor("Leaving Prof").await;

        reconcile(&s, &[a]).await;

        // Hard-delete the professor centrally; the audit entry survives.
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(a.into_uuid())
            .execute(&s.fixture.central)
            .await
            .expect("delete user");

        let page = s
            .service
            .list(
                s.fixture.school_id,
                &module_filter(s.module_id),
                &PageRequest::default(),
            )
            .await
            .expect("list");

        assert_eq!(page.entries.len(), 1);
        assert!(page.entries[0].professor_name.is_none());
        assert_eq!(page.entries[0].professor_id, a.into_uuid());

        s.fixture.cleanup(s.module_id).await;
    }
}
