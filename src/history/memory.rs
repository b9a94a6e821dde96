// ABOUTME: In-memory history store backed by a tokio RwLock
// ABOUTME: Used for tests and for runs that should not touch the filesystem
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use mobility_core::models::HistoryRecord;
use tokio::sync::RwLock;

use super::{sort_chronologically, HistoryStore};
use crate::errors::AppResult;

/// Process-local history
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistoryStore {
    records: Arc<RwLock<Vec<HistoryRecord>>>,
}

impl InMemoryHistoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl HistoryStore for InMemoryHistoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn append(&self, record: HistoryRecord) -> AppResult<()> {
        self.records.write().await.push(record);
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<HistoryRecord>> {
        let mut records = self.records.read().await.clone();
        sort_chronologically(&mut records);
        Ok(records)
    }

    async fn clear(&self) -> AppResult<()> {
        self.records.write().await.clear();
        Ok(())
    }
}
