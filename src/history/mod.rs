// ABOUTME: History storage abstraction for completed assessment sessions
// ABOUTME: Pluggable backends (in-memory, JSON file) behind one async trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Backend selection from configuration
pub mod factory;
/// JSON file backend
pub mod file;
/// In-memory backend
pub mod memory;

pub use factory::HistoryStorage;
pub use file::JsonFileHistoryStore;
pub use memory::InMemoryHistoryStore;

use mobility_core::models::HistoryRecord;

use crate::errors::AppResult;

/// Append-only store of completed sessions
///
/// # Examples
///
/// ```rust,no_run
/// use std::collections::BTreeMap;
/// use chrono::Utc;
/// use mobility_age::history::{HistoryStore, InMemoryHistoryStore};
/// use mobility_age::models::{HistoryRecord, PoseKind};
/// # async fn example() -> Result<(), mobility_age::errors::AppError> {
///
/// let store = InMemoryHistoryStore::new();
/// let mut pose_ages = BTreeMap::new();
/// pose_ages.insert(PoseKind::DeepSquat, 42);
/// store.append(HistoryRecord::new(Utc::now(), 40, pose_ages, 42)).await?;
///
/// if let Some(latest) = store.latest().await? {
///     println!("Latest mobility age: {}", latest.overall_mobility_age);
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait::async_trait]
pub trait HistoryStore: Send + Sync {
    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;

    /// Record a completed session
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot persist the record
    async fn append(&self, record: HistoryRecord) -> AppResult<()>;

    /// All records ordered by date, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    async fn list(&self) -> AppResult<Vec<HistoryRecord>>;

    /// Most recent record by date
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    async fn latest(&self) -> AppResult<Option<HistoryRecord>> {
        Ok(self.list().await?.pop())
    }

    /// Remove every record
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    async fn clear(&self) -> AppResult<()>;
}

/// Stable chronological order; records sharing a date keep insertion order
pub(crate) fn sort_chronologically(records: &mut [HistoryRecord]) {
    records.sort_by_key(|record| record.date);
}
