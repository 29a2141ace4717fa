//! Tests for the credential store

use super::*;
use crate::auth::SessionToken;
use crate::schema::{DataType, FieldDescriptor, Schema};
use std::sync::Arc;
use tempfile::tempdir;

fn memory_store() -> (MemoryStore, CredentialStore) {
    let backend = MemoryStore::new();
    let store = CredentialStore::new(Arc::new(backend.clone()));
    (backend, store)
}

fn sample_schema() -> Schema {
    Schema::from_fields(vec![
        FieldDescriptor::dimension("Placa", DataType::String),
        FieldDescriptor::dimension("Modelo", DataType::Number),
        FieldDescriptor::dimension("Activo", DataType::Boolean),
    ])
}

// ============================================================================
// Backend Tests
// ============================================================================

#[tokio::test]
async fn test_memory_store_get_set_delete() {
    let store = MemoryStore::new();
    assert!(store.get("k").await.unwrap().is_none());

    store.set("k", "v1").await.unwrap();
    store.set("k", "v2").await.unwrap();
    assert_eq!(store.get("k").await.unwrap(), Some("v2".to_string()));

    store.delete("k").await.unwrap();
    store.delete("k").await.unwrap();
    assert!(store.get("k").await.unwrap().is_none());
}

#[tokio::test]
async fn test_file_store_persists_across_instances() {
    let dir = tempdir().unwrap();

    let store = FileStore::for_user(dir.path(), "ana@example.com").unwrap();
    store.set(keys::USERNAME, "ana").await.unwrap();
    assert!(store.path().ends_with("ana_example_com.json"));
    assert!(store.path().exists());

    let reopened = FileStore::for_user(dir.path(), "ana@example.com").unwrap();
    assert_eq!(
        reopened.get(keys::USERNAME).await.unwrap(),
        Some("ana".to_string())
    );

    let other_user = FileStore::for_user(dir.path(), "bob").unwrap();
    assert!(other_user.get(keys::USERNAME).await.unwrap().is_none());
}

#[tokio::test]
async fn test_file_store_creates_missing_directory() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("props.json");

    let store = FileStore::open(&path).unwrap();
    store.set("k", "v").await.unwrap();

    assert!(path.exists());
    assert!(!path.with_extension("tmp").exists());
}

#[tokio::test]
async fn test_file_store_delete_persists() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("props.json");

    let store = FileStore::open(&path).unwrap();
    store.set("a", "1").await.unwrap();
    store.set("b", "2").await.unwrap();
    store.delete("a").await.unwrap();

    let reopened = FileStore::open(&path).unwrap();
    assert!(reopened.get("a").await.unwrap().is_none());
    assert_eq!(reopened.get("b").await.unwrap(), Some("2".to_string()));
}

#[tokio::test]
async fn test_file_store_failed_set_leaves_cache_unchanged() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ana.json");

    let store = FileStore::open(&path).unwrap();
    store.set(keys::TOKEN, "old").await.unwrap();

    // A directory in the temp file's place makes the write fail
    std::fs::create_dir(path.with_extension("tmp")).unwrap();

    assert!(store.set(keys::TOKEN, "new").await.is_err());
    assert_eq!(store.get(keys::TOKEN).await.unwrap(), Some("old".to_string()));

    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(
        reopened.get(keys::TOKEN).await.unwrap(),
        Some("old".to_string())
    );
}

#[tokio::test]
async fn test_file_store_failed_delete_keeps_value() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ana.json");

    let store = FileStore::open(&path).unwrap();
    store.set(keys::SCHEMA, "[]").await.unwrap();
    std::fs::create_dir(path.with_extension("tmp")).unwrap();

    assert!(store.delete(keys::SCHEMA).await.is_err());
    assert_eq!(store.get(keys::SCHEMA).await.unwrap(), Some("[]".to_string()));
}

#[test]
fn test_file_store_rejects_corrupt_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("props.json");
    std::fs::write(&path, "{not json").unwrap();

    let err = FileStore::open(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse property file"));
}

// ============================================================================
// Credential Store Tests
// ============================================================================

#[tokio::test]
async fn test_set_and_get_credentials() {
    let (_, store) = memory_store();

    assert!(store.set_credentials("ana", "s3cret").await.unwrap());
    store.set_company_id("7").await.unwrap();

    let creds = store.get_credentials().await.unwrap();
    assert_eq!(creds.username.as_deref(), Some("ana"));
    assert_eq!(creds.password.as_deref(), Some("s3cret"));
    assert_eq!(creds.company_id.as_deref(), Some("7"));
    assert!(creds.is_complete());
    assert!(!format!("{creds:?}").contains("s3cret"));
}

#[tokio::test]
async fn test_get_credentials_partially_absent() {
    let (_, store) = memory_store();
    store.set_company_id("7").await.unwrap();

    let creds = store.get_credentials().await.unwrap();
    assert_eq!(creds.company_id.as_deref(), Some("7"));
    assert!(creds.username.is_none());
    assert!(!creds.is_complete());
}

#[tokio::test]
async fn test_reset_credentials_keeps_company_id() {
    let (backend, store) = memory_store();
    store.set_company_id("7").await.unwrap();
    store.set_credentials("ana", "s3cret").await.unwrap();

    store.reset_credentials().await.unwrap();

    let creds = store.get_credentials().await.unwrap();
    assert!(creds.username.is_none());
    assert!(creds.password.is_none());
    assert_eq!(creds.company_id.as_deref(), Some("7"));
    assert!(backend.get(keys::TOKEN).await.unwrap().is_none());
}

#[tokio::test]
async fn test_token_round_trip() {
    let (_, store) = memory_store();
    assert!(store.get_token().await.unwrap().is_none());

    store.set_token(&SessionToken::new("tok-1")).await.unwrap();
    assert_eq!(
        store.get_token().await.unwrap(),
        Some(SessionToken::new("tok-1"))
    );
}

#[tokio::test]
async fn test_schema_round_trip() {
    let (backend, store) = memory_store();
    let schema = sample_schema();

    store.set_schema(&schema).await.unwrap();

    let raw = backend.get(keys::SCHEMA).await.unwrap().unwrap();
    assert!(raw.starts_with('['));

    let reloaded = store.get_schema().await.unwrap().unwrap();
    assert_eq!(reloaded, schema);
    assert_eq!(reloaded.names(), vec!["placa", "modelo", "activo"]);
}

#[tokio::test]
async fn test_schema_round_trip_through_file() {
    let dir = tempdir().unwrap();
    let schema = sample_schema();

    let store = CredentialStore::new(Arc::new(FileStore::for_user(dir.path(), "ana").unwrap()));
    store.set_schema(&schema).await.unwrap();

    let reopened =
        CredentialStore::new(Arc::new(FileStore::for_user(dir.path(), "ana").unwrap()));
    assert_eq!(reopened.get_schema().await.unwrap(), Some(schema));
}

#[tokio::test]
async fn test_corrupt_schema_is_storage_error() {
    let (backend, store) = memory_store();
    backend.set(keys::SCHEMA, "{oops").await.unwrap();

    let err = store.get_schema().await.unwrap_err();
    assert!(matches!(err, crate::error::Error::Storage { .. }));
}

#[tokio::test]
async fn test_clear_session() {
    let (_, store) = memory_store();
    store.set_credentials("ana", "s3cret").await.unwrap();
    store.set_token(&SessionToken::new("tok")).await.unwrap();
    store.set_schema(&sample_schema()).await.unwrap();

    store.clear_session().await.unwrap();

    assert!(store.get_token().await.unwrap().is_none());
    assert!(store.get_schema().await.unwrap().is_none());
    assert!(store.get_credentials().await.unwrap().username.is_some());
}
