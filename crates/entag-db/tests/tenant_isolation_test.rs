//! Tenant isolation tests: identical tag names in different tenants are
//! distinct rows, and garbage collection never crosses tenants.
//!
//! Requires the Postgres test database; run with `cargo test -- --ignored`.

use entag_core::TagRepository;
use entag_db::test_fixtures::TestDatabase;
use uuid::Uuid;

#[tokio::test]
#[ignore]
async fn test_same_name_in_two_tenants_is_two_tags() {
    let db = TestDatabase::new().await;
    let ctx_a = TestDatabase::context();
    let ctx_b = TestDatabase::context();
    let names = vec!["shared-name".to_string()];

    db.repo
        .add_tags(&ctx_a, Uuid::new_v4(), "post", &names)
        .await
        .expect("tenant A add failed");
    db.repo
        .add_tags(&ctx_b, Uuid::new_v4(), "post", &names)
        .await
        .expect("tenant B add failed");

    let tags_a = db.repo.list(&ctx_a).await.expect("list A failed");
    let tags_b = db.repo.list(&ctx_b).await.expect("list B failed");

    assert_eq!(tags_a.len(), 1);
    assert_eq!(tags_b.len(), 1);
    assert_ne!(tags_a[0].id, tags_b[0].id, "distinct rows per tenant");
    assert_eq!(tags_a[0].frequency, 1);
    assert_eq!(tags_b[0].frequency, 1);

    db.cleanup().await;
}

#[tokio::test]
#[ignore]
async fn test_zero_frequency_cleanup_is_tenant_scoped() {
    let db = TestDatabase::new().await;
    let ctx_a = TestDatabase::context();
    let ctx_b = TestDatabase::context();
    let entity_a = Uuid::new_v4();
    let names = vec!["cleanup-probe".to_string()];

    db.repo
        .add_tags(&ctx_a, entity_a, "post", &names)
        .await
        .expect("tenant A add failed");
    db.repo
        .add_tags(&ctx_b, Uuid::new_v4(), "post", &names)
        .await
        .expect("tenant B add failed");

    // Dropping tenant A's only association deletes A's tag row. Tenant B's
    // row with the same name must survive the cleanup.
    db.repo
        .remove_tags(&ctx_a, entity_a, "post", &names)
        .await
        .expect("tenant A remove failed");

    let tags_a = db.repo.list(&ctx_a).await.expect("list A failed");
    let tags_b = db.repo.list(&ctx_b).await.expect("list B failed");
    assert!(tags_a.is_empty());
    assert_eq!(tags_b.len(), 1);
    assert_eq!(tags_b[0].frequency, 1);

    db.cleanup().await;
}

#[tokio::test]
#[ignore]
async fn test_remove_never_resolves_names_across_tenants() {
    let db = TestDatabase::new().await;
    let ctx_a = TestDatabase::context();
    let ctx_b = TestDatabase::context();
    let entity_b = Uuid::new_v4();
    let names = vec!["b-only".to_string()];

    db.repo
        .add_tags(&ctx_b, entity_b, "post", &names)
        .await
        .expect("tenant B add failed");

    // Tenant A asking to remove a name that only exists in tenant B is a
    // no-op, even for tenant B's entity id.
    let removed = db
        .repo
        .remove_tags(&ctx_a, entity_b, "post", &names)
        .await
        .expect("tenant A remove failed");
    assert_eq!(removed, 0);

    let tags_b = db.repo.list(&ctx_b).await.expect("list B failed");
    assert_eq!(tags_b.len(), 1);
    assert_eq!(tags_b[0].frequency, 1);

    db.cleanup().await;
}
