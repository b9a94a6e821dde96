// ABOUTME: Integration tests for the in-memory and JSON file history stores
// ABOUTME: Verifies chronological listing, latest lookup, clearing, and on-disk behavior
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, missing_docs)]

mod common;

use std::sync::Arc;

use anyhow::Result;
use common::{init_test_logging, record_on_day};
use mobility_age::config::{AppConfig, HistoryBackend};
use mobility_age::errors::ErrorCode;
use mobility_age::history::{
    HistoryStorage, HistoryStore, InMemoryHistoryStore, JsonFileHistoryStore,
};
use tempfile::TempDir;

async fn exercise_store(store: &dyn HistoryStore) -> Result<()> {
    assert!(store.list().await?.is_empty());
    assert!(store.latest().await?.is_none());

    // Appended out of order on purpose
    store.append(record_on_day(10, 40, 44)).await?;
    store.append(record_on_day(2, 40, 47)).await?;
    store.append(record_on_day(30, 41, 42)).await?;

    let ages: Vec<u32> = store
        .list()
        .await?
        .iter()
        .map(|r| r.overall_mobility_age)
        .collect();
    assert_eq!(ages, vec![47, 44, 42]);

    let latest = store.latest().await?.unwrap();
    assert_eq!(latest.overall_mobility_age, 42);
    assert_eq!(latest.biological_age, 41);

    store.clear().await?;
    assert!(store.list().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_in_memory_store_contract() -> Result<()> {
    init_test_logging();
    exercise_store(&InMemoryHistoryStore::new()).await
}

#[tokio::test]
async fn test_json_file_store_contract() -> Result<()> {
    init_test_logging();
    let dir = TempDir::new()?;
    exercise_store(&JsonFileHistoryStore::new(dir.path().join("history.json"))).await
}

#[tokio::test]
async fn test_json_file_store_creates_parent_directories() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("nested").join("deeper").join("history.json");
    let store = JsonFileHistoryStore::new(&path);

    assert!(store.list().await?.is_empty(), "missing file reads as empty");
    assert!(!path.exists());

    store.append(record_on_day(0, 35, 38)).await?;
    assert!(path.exists());
    Ok(())
}

#[tokio::test]
async fn test_json_file_store_persists_across_instances() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("history.json");

    let record = record_on_day(5, 50, 55);
    JsonFileHistoryStore::new(&path).append(record.clone()).await?;

    let reopened = JsonFileHistoryStore::new(&path);
    assert_eq!(reopened.list().await?, vec![record]);

    let raw = tokio::fs::read_to_string(&path).await?;
    let json: serde_json::Value = serde_json::from_str(&raw)?;
    assert!(json.is_array());
    assert_eq!(json[0]["overallMobilityAge"], 55);
    assert_eq!(json[0]["poseAges"]["deep_squat"], 55);
    Ok(())
}

#[tokio::test]
async fn test_json_file_store_rejects_corrupt_file() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("history.json");
    tokio::fs::write(&path, "{ not an array").await?;

    let error = JsonFileHistoryStore::new(&path).list().await.unwrap_err();
    assert_eq!(error.code, ErrorCode::StorageError);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_appends_to_file_store_are_not_lost() -> Result<()> {
    let dir = TempDir::new()?;
    let store = Arc::new(JsonFileHistoryStore::new(dir.path().join("history.json")));

    let mut handles = Vec::new();
    for day in 0..8 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.append(record_on_day(day, 40, 40 + u32::try_from(day).unwrap())).await
        }));
    }
    for handle in handles {
        handle.await??;
    }
    assert_eq!(store.list().await?.len(), 8);
    Ok(())
}

#[tokio::test]
async fn test_storage_factory_selects_backend() -> Result<()> {
    let dir = TempDir::new()?;
    let mut config = AppConfig {
        history_backend: HistoryBackend::Memory,
        history_path: dir.path().join("history.json"),
        ..AppConfig::default()
    };
    let memory = HistoryStorage::from_config(&config);
    assert_eq!(memory.backend_name(), "memory");
    memory.append(record_on_day(0, 30, 30)).await?;
    assert!(!config.history_path.exists());

    config.history_backend = HistoryBackend::File;
    let file = HistoryStorage::from_config(&config);
    assert_eq!(file.backend_name(), "file");
    file.append(record_on_day(0, 30, 30)).await?;
    assert!(config.history_path.exists());
    Ok(())
}
