//! Postgres-backed catalog stores.
//!
//! Needs `DATABASE_URL` pointing at a server where the test user may create
//! databases; run with `cargo test -- --ignored`.

use carapp::application::repos::{CatalogStore, RepoError};
use carapp::domain::types::CatalogKind;
use carapp::infra::db::{PostgresCatalogStore, PostgresRepositories};
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn crud_round_trip_on_body_types(pool: PgPool) {
    let store = PostgresCatalogStore::new(PostgresRepositories::new(pool), CatalogKind::Body);

    let id = store.create("Sedan").await.expect("insert row");
    let row = store.get_by_id(id).await.expect("select row");
    assert_eq!(row.map(|entry| entry.name), Some("Sedan".to_string()));

    store.update(id, "Estate").await.expect("update row");
    let all = store.get_all().await.expect("select all");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Estate");

    store.delete(id).await.expect("delete row");
    assert!(store.get_by_id(id).await.expect("select row").is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn missing_rows_report_not_found(pool: PgPool) {
    let store = PostgresCatalogStore::new(PostgresRepositories::new(pool), CatalogKind::Fuel);

    assert!(matches!(store.update(404, "LPG").await, Err(RepoError::NotFound)));
    assert!(matches!(store.delete(404).await, Err(RepoError::NotFound)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn kinds_map_to_separate_tables(pool: PgPool) {
    let repositories = PostgresRepositories::new(pool);
    let drive = PostgresCatalogStore::new(repositories.clone(), CatalogKind::Drive);
    let fuel = PostgresCatalogStore::new(repositories.clone(), CatalogKind::Fuel);

    drive.create("RWD").await.expect("insert drive");

    assert_eq!(drive.get_all().await.expect("drive rows").len(), 1);
    assert!(fuel.get_all().await.expect("fuel rows").is_empty());
    repositories.health_check().await.expect("pool is healthy");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn named_delete_only_removes_matching_row(pool: PgPool) {
    let store = PostgresCatalogStore::new(PostgresRepositories::new(pool), CatalogKind::Body);
    let id = store.create("Coupe").await.expect("insert row");

    assert!(matches!(
        store.delete_named(id, "Roadster").await,
        Err(RepoError::NameMismatch { stored }) if stored == "Coupe"
    ));
    assert!(matches!(
        store.delete_named(id + 1, "Coupe").await,
        Err(RepoError::NotFound)
    ));

    store.delete_named(id, "Coupe").await.expect("delete matching row");
    assert!(store.get_by_id(id).await.expect("select row").is_none());
}
