// ABOUTME: JSON file history store persisting sessions as a single array
// ABOUTME: Creates parent directories on first write and treats a missing file as empty
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use mobility_core::models::HistoryRecord;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use super::{sort_chronologically, HistoryStore};
use crate::errors::{AppError, AppResult};

/// History persisted to one JSON file
///
/// Writes go to a sibling temporary file which is then renamed over the
/// target, so readers never observe a half-written array.
#[derive(Debug)]
pub struct JsonFileHistoryStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl JsonFileHistoryStore {
    /// Store backed by `path`; nothing is touched until the first call
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// File this store reads and writes
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> AppResult<Vec<HistoryRecord>> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(AppError::storage(format!(
                    "failed to read history file {}: {e}",
                    self.path.display()
                ))
                .with_source(e))
            }
        };
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&contents).map_err(|e| {
            AppError::storage(format!(
                "history file {} is not a JSON array of records: {e}",
                self.path.display()
            ))
            .with_resource_id(self.path.display().to_string())
            .with_source(e)
        })
    }

    async fn write_all(&self, records: &[HistoryRecord]) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &self.path).await?;
        debug!(
            path = %self.path.display(),
            records = records.len(),
            "history file written"
        );
        Ok(())
    }
}

#[async_trait::async_trait]
impl HistoryStore for JsonFileHistoryStore {
    fn backend_name(&self) -> &'static str {
        "file"
    }

    async fn append(&self, record: HistoryRecord) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_all().await?;
        records.push(record);
        self.write_all(&records).await
    }

    async fn list(&self) -> AppResult<Vec<HistoryRecord>> {
        let mut records = self.read_all().await?;
        sort_chronologically(&mut records);
        Ok(records)
    }

    async fn clear(&self) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        self.write_all(&[]).await
    }
}
