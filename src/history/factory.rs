// ABOUTME: History backend selection from application configuration
// ABOUTME: Enum dispatch over the in-memory and JSON file stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use mobility_core::models::HistoryRecord;
use tracing::info;

use super::{file::JsonFileHistoryStore, memory::InMemoryHistoryStore, HistoryStore};
use crate::config::{AppConfig, HistoryBackend};
use crate::errors::AppResult;

/// Configured history backend
#[derive(Debug)]
pub enum HistoryStorage {
    /// In-memory records
    Memory(InMemoryHistoryStore),
    /// JSON file records
    File(JsonFileHistoryStore),
}

impl HistoryStorage {
    /// Create the backend named by the configuration
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        match config.history_backend {
            HistoryBackend::Memory => {
                info!("Initializing in-memory history store");
                Self::Memory(InMemoryHistoryStore::new())
            }
            HistoryBackend::File => {
                info!(path = %config.history_path.display(), "Initializing JSON file history store");
                Self::File(JsonFileHistoryStore::new(config.history_path.clone()))
            }
        }
    }

    fn inner(&self) -> &dyn HistoryStore {
        match self {
            Self::Memory(store) => store,
            Self::File(store) => store,
        }
    }
}

#[async_trait::async_trait]
impl HistoryStore for HistoryStorage {
    fn backend_name(&self) -> &'static str {
        self.inner().backend_name()
    }

    async fn append(&self, record: HistoryRecord) -> AppResult<()> {
        self.inner().append(record).await
    }

    async fn list(&self) -> AppResult<Vec<HistoryRecord>> {
        self.inner().list().await
    }

    async fn latest(&self) -> AppResult<Option<HistoryRecord>> {
        self.inner().latest().await
    }

    async fn clear(&self) -> AppResult<()> {
        self.inner().clear().await
    }
}
