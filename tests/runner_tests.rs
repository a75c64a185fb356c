use capella::error::MigrateError;
use capella::migrate::{Runner, registry};
use capella::store::SchemaDao;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::time::SystemTime;
use tokio::fs;

fn temp_database(label: &str) -> (String, PathBuf) {
    let mut hasher = DefaultHasher::new();
    SystemTime::now().hash(&mut hasher);
    label.hash(&mut hasher);
    let db_path = std::env::temp_dir().join(format!("test_db_{label}_{}.sqlite", hasher.finish()));
    (format!("sqlite:{}", db_path.to_str().unwrap()), db_path)
}

async fn cleanup(db_path: &PathBuf) {
    let wal = PathBuf::from(format!("{}-wal", db_path.to_string_lossy()));
    let shm = PathBuf::from(format!("{}-shm", db_path.to_string_lossy()));
    let _ = fs::remove_file(&wal).await;
    let _ = fs::remove_file(&shm).await;
    fs::remove_file(db_path).await.unwrap();
}

#[tokio::test]
async fn test_up_applies_in_order_and_is_idempotent() {
    let (database_url, db_path) = temp_database("runner_up");
    let dao = SchemaDao::connect(&database_url).await.unwrap();
    let runner = Runner::new(&dao, registry()).unwrap();

    let ran = runner.up().await.unwrap();
    assert_eq!(ran, 2);
    assert_eq!(
        dao.applied_keys().await.unwrap(),
        vec![
            "1715977555_created_pictures".to_string(),
            "1715980319_updated_pictures".to_string(),
        ]
    );

    // Both migrations ran: the collection exists with opened rules.
    let collection = dao.find_collection_by_name_or_id("pictures").await.unwrap();
    assert_eq!(collection.create_rule, Some(String::new()));

    // Re-running applies nothing.
    let ran = runner.up().await.unwrap();
    assert_eq!(ran, 0);

    let statuses = runner.status().await.unwrap();
    assert_eq!(statuses.len(), 2);
    assert!(statuses.iter().all(|s| s.applied_at.is_some()));

    cleanup(&db_path).await;
}

#[tokio::test]
async fn test_down_reverts_newest_first() {
    let (database_url, db_path) = temp_database("runner_down");
    let dao = SchemaDao::connect(&database_url).await.unwrap();
    let runner = Runner::new(&dao, registry()).unwrap();
    runner.up().await.unwrap();

    // One step back: the rules migration is reverted, the collection stays.
    let reverted = runner.down(1).await.unwrap();
    assert_eq!(reverted, 1);
    assert_eq!(
        dao.applied_keys().await.unwrap(),
        vec!["1715977555_created_pictures".to_string()]
    );
    let collection = dao.find_collection_by_name_or_id("pictures").await.unwrap();
    assert_eq!(collection.create_rule, None);

    // Asking for more steps than remain reverts what is left.
    let reverted = runner.down(5).await.unwrap();
    assert_eq!(reverted, 1);
    assert!(dao.applied_keys().await.unwrap().is_empty());
    let err = dao
        .find_collection_by_name_or_id("pictures")
        .await
        .unwrap_err();
    assert!(matches!(err, MigrateError::CollectionNotFound { .. }));

    cleanup(&db_path).await;
}

#[tokio::test]
async fn test_misordered_registry_is_rejected() {
    let (database_url, db_path) = temp_database("runner_order");
    let dao = SchemaDao::connect(&database_url).await.unwrap();

    let mut migrations = registry();
    migrations.reverse();
    let err = Runner::new(&dao, migrations).unwrap_err();
    assert!(matches!(err, MigrateError::Registry(_)));

    cleanup(&db_path).await;
}

#[tokio::test]
async fn test_failed_migration_halts_and_is_not_recorded() {
    let (database_url, db_path) = temp_database("runner_failfast");
    let dao = SchemaDao::connect(&database_url).await.unwrap();

    // A registry missing the create migration: the rules migration cannot
    // find its collection and must fail without being recorded.
    let mut migrations = registry();
    migrations.remove(0);
    let runner = Runner::new(&dao, migrations).unwrap();

    let err = runner.up().await.unwrap_err();
    assert!(matches!(err, MigrateError::CollectionNotFound { .. }));
    assert!(dao.applied_keys().await.unwrap().is_empty());

    cleanup(&db_path).await;
}
