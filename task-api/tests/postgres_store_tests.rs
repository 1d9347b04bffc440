//! Runs the store against a real Postgres. Needs Docker: `cargo test -- --ignored`.

use sea_orm::DatabaseConnection;
use task_api::task::{DatabaseTaskStore, TaskPayload, TaskStore};
use testcontainers_modules::{postgres, testcontainers};

mod common;

pub struct TestContext {
    #[allow(dead_code)] // container is kept to ensure it's not dropped
    pub container: testcontainers::ContainerAsync<postgres::Postgres>,
    pub db: DatabaseConnection,
}

async fn setup() -> anyhow::Result<TestContext> {
    // Allow multiple calls to init for tests.
    let _ = tracing_subscriber::fmt().try_init();
    let container = common::setup_container().await?;
    let db = common::setup_postgres_db(&container).await?;
    Ok(TestContext { db, container })
}

#[tokio::test]
#[ignore = "requires docker"]
async fn can_run_task_lifecycle_on_postgres() {
    let state = setup().await.expect("Failed to setup test context");
    let store = DatabaseTaskStore::new(state.db.clone());

    let created = store
        .create(TaskPayload::new("Buy milk", "2%", false))
        .await
        .expect("Failed to create task");
    assert_eq!(created.id, 1);

    let updated = store
        .update(created.id, TaskPayload::new("Buy milk", "2%", true))
        .await
        .expect("Failed to update task")
        .expect("Task should exist");
    assert!(updated.completed);

    assert!(store.delete(created.id).await.unwrap());
    assert!(!store.exists(created.id).await.unwrap());

    let next = store
        .create(TaskPayload::new("Next", "", false))
        .await
        .expect("Failed to create task");
    assert!(next.id > created.id);
}
