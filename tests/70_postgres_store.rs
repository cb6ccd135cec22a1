//! PostgreSQL backend tests. They need a reachable database in `DATABASE_URL`
//! and pass trivially without one. Each test uses fresh owner ids and its own
//! location tag, so runs against a shared database do not interfere.
use anyhow::Result;
use uuid::Uuid;

use task_manager_api::config::{StoreBackend, StoreConfig};
use task_manager_api::database::models::{parse_timestamp, TaskCriteria, TaskFields};
use task_manager_api::database::{DatabaseError, DatabaseManager, PgTaskStore, TaskStore};

async fn store() -> Result<Option<PgTaskStore>> {
    dotenvy::dotenv().ok();
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping postgres store test");
        return Ok(None);
    };

    let config = StoreConfig {
        backend: StoreBackend::Postgres,
        database_url: Some(database_url),
        max_connections: 2,
        connection_timeout: 5,
    };
    let store = PgTaskStore::new(DatabaseManager::connect(&config).await?);
    store.ensure_schema().await?;
    Ok(Some(store))
}

fn fields(event_name: &str, start: &str, end: &str, location: &str) -> TaskFields {
    TaskFields {
        event_name: Some(event_name.to_string()),
        start_time: Some(start.to_string()),
        end_time: Some(end.to_string()),
        location: Some(location.to_string()),
        description: Some("desc".to_string()),
        category: Some("Social event".to_string()),
    }
}

fn tag() -> String {
    format!("Hall {}", Uuid::new_v4())
}

#[tokio::test]
async fn insert_assigns_owner_and_lists_in_order() -> Result<()> {
    let Some(store) = store().await? else { return Ok(()) };
    let owner = Uuid::new_v4();
    let location = tag();

    let a = store.insert(owner, &fields("A", "2024-01-01T10:00", "2024-01-01T11:00", &location)).await?;
    let b = store.insert(owner, &fields("B", "2024-01-02T10:00", "2024-01-02T11:00", &location)).await?;

    assert_ne!(a.id, b.id);
    assert_eq!(a.user, owner);
    assert_eq!(a.start_time, parse_timestamp("2024-01-01T10:00").unwrap());
    assert_eq!(store.list_by_owner(owner).await?, vec![a, b]);
    assert!(store.list_by_owner(Uuid::new_v4()).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn find_owned_is_scoped_to_the_owner() -> Result<()> {
    let Some(store) = store().await? else { return Ok(()) };
    let owner = Uuid::new_v4();
    let task = store
        .insert(owner, &fields("A", "2024-01-01T10:00", "2024-01-01T11:00", &tag()))
        .await?;

    assert_eq!(store.find_owned(owner, task.id).await?, Some(task.clone()));
    assert_eq!(store.find_owned(Uuid::new_v4(), task.id).await?, None);
    assert_eq!(store.find_by_id(task.id).await?, Some(task));
    Ok(())
}

#[tokio::test]
async fn replace_keeps_owner_and_reports_vanished_rows() -> Result<()> {
    let Some(store) = store().await? else { return Ok(()) };
    let owner = Uuid::new_v4();
    let task = store
        .insert(owner, &fields("A", "2024-01-01T10:00", "2024-01-01T11:00", &tag()))
        .await?;

    let updated = store
        .replace(task.id, &fields("A2", "2024-02-01T10:00", "2024-02-01T11:00", "Hall C"))
        .await?
        .expect("task exists");
    assert_eq!(updated.id, task.id);
    assert_eq!(updated.user, owner);
    assert_eq!(updated.event_name, "A2");
    assert_eq!(updated.location, "Hall C");
    assert_eq!(updated.created_at, task.created_at);
    assert!(updated.updated_at >= task.updated_at);

    assert!(store.delete(task.id).await?);
    let vanished = store
        .replace(task.id, &fields("X", "2024-01-01T10:00", "2024-01-01T11:00", "X"))
        .await?;
    assert!(vanished.is_none());
    Ok(())
}

#[tokio::test]
async fn delete_is_permanent() -> Result<()> {
    let Some(store) = store().await? else { return Ok(()) };
    let task = store
        .insert(Uuid::new_v4(), &fields("A", "2024-01-01T10:00", "2024-01-01T11:00", &tag()))
        .await?;

    assert!(store.delete(task.id).await?);
    assert!(!store.delete(task.id).await?);
    assert!(store.find_by_id(task.id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn find_matching_spans_owners_with_inclusive_bounds() -> Result<()> {
    let Some(store) = store().await? else { return Ok(()) };
    let location = tag();

    store
        .insert(Uuid::new_v4(), &fields("Early", "2024-05-01T08:00", "2024-05-01T09:00", &location))
        .await?;
    store
        .insert(Uuid::new_v4(), &fields("Edge", "2024-05-02T15:00", "2024-05-03T12:00", &location))
        .await?;
    store
        .insert(Uuid::new_v4(), &fields("Late", "2024-05-04T20:00", "2024-05-04T23:00", &location))
        .await?;

    let everyone = TaskCriteria {
        location: Some(location.clone()),
        ..Default::default()
    };
    assert_eq!(store.find_matching(&everyone).await?.len(), 3);

    let window = TaskCriteria {
        start_time: parse_timestamp("2024-05-02T15:00"),
        end_time: parse_timestamp("2024-05-03T12:00"),
        location: Some(location.clone()),
        category: Some("Social event".to_string()),
    };
    let matched = store.find_matching(&window).await?;
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].event_name, "Edge");

    let other_category = TaskCriteria {
        location: Some(location),
        category: Some("social event".to_string()),
        ..Default::default()
    };
    assert!(store.find_matching(&other_category).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn incomplete_fields_are_rejected_before_writing() -> Result<()> {
    let Some(store) = store().await? else { return Ok(()) };
    let owner = Uuid::new_v4();
    let partial = TaskFields {
        location: Some(tag()),
        ..Default::default()
    };

    match store.insert(owner, &partial).await {
        Err(DatabaseError::Validation(errors)) => assert_eq!(errors.len(), 5),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(store.list_by_owner(owner).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn table_refuses_empty_text() -> Result<()> {
    let Some(store) = store().await? else { return Ok(()) };
    let Ok(database_url) = std::env::var("DATABASE_URL") else { return Ok(()) };
    // Schema creation is idempotent
    store.ensure_schema().await?;

    let pool = sqlx::PgPool::connect(&database_url).await?;
    let result = sqlx::query(
        "INSERT INTO tasks (id, user_id, event_name, start_time, end_time, location, description, category) \
         VALUES ($1, $2, '', now(), now(), 'x', 'x', 'x')",
    )
    .bind(Uuid::new_v4())
    .bind(Uuid::new_v4())
    .execute(&pool)
    .await;

    assert!(result.is_err(), "empty event_name was accepted");
    Ok(())
}
