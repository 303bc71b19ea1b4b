use crate::domain::model::{parse_puzzle_id, PuzzleRecord};
use crate::domain::ports::{PuzzleStore, WriteMode};
use crate::utils::error::{JumbleError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Stores each puzzle as `<base_path>/<YYYY-MM-DD>.json`.
#[derive(Debug, Clone)]
pub struct FilePuzzleStore {
    base_path: PathBuf,
}

impl FilePuzzleStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn tmp_path_for(&self, id: &str) -> PathBuf {
        let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
        self.base_path
            .join(format!(".{}.{}.{}.json.tmp", id, std::process::id(), seq))
    }

    /// Only valid date keys map to a file, so ids can never escape the directory.
    pub fn path_for(&self, id: &str) -> Option<PathBuf> {
        parse_puzzle_id(id).map(|_| self.base_path.join(format!("{}.json", id)))
    }
}

#[async_trait]
impl PuzzleStore for FilePuzzleStore {
    async fn put(&self, record: &PuzzleRecord, mode: WriteMode) -> Result<()> {
        let full_path = self
            .path_for(&record.id)
            .ok_or_else(|| JumbleError::InvariantViolation {
                message: format!("record id '{}' is not a YYYY-MM-DD date", record.id),
            })?;

        tokio::fs::create_dir_all(&self.base_path).await?;

        let mut data = serde_json::to_vec_pretty(record)?;
        data.push(b'\n');

        // 先寫入暫存檔再改名，避免讀取端看到寫到一半的檔案
        let tmp_path = self.tmp_path_for(&record.id);
        tokio::fs::write(&tmp_path, &data).await?;

        let published = match mode {
            WriteMode::Overwrite => tokio::fs::rename(&tmp_path, &full_path).await,
            // hard_link 在目標已存在時失敗，檢查與寫入是同一個動作
            WriteMode::CreateNew => {
                let linked = tokio::fs::hard_link(&tmp_path, &full_path).await;
                let _ = tokio::fs::remove_file(&tmp_path).await;
                linked
            }
        };

        match published {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(JumbleError::AlreadyExistsError {
                    id: record.id.clone(),
                });
            }
            Err(e) => {
                let _ = tokio::fs::remove_file(&tmp_path).await;
                return Err(e.into());
            }
        }

        tracing::debug!("Wrote {} ({} bytes)", full_path.display(), data.len());
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<PuzzleRecord>> {
        let Some(full_path) = self.path_for(id) else {
            return Ok(None);
        };

        let data = match tokio::fs::read(&full_path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&data)
            .map(Some)
            .map_err(|e| JumbleError::CorruptRecordError {
                id: id.to_string(),
                reason: format!("invalid JSON: {}", e),
            })
    }
}

/// In-process store, handy for tests and throwaway servers.
#[derive(Debug, Clone, Default)]
pub struct MemoryPuzzleStore {
    records: Arc<RwLock<HashMap<String, PuzzleRecord>>>,
}

impl MemoryPuzzleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl PuzzleStore for MemoryPuzzleStore {
    async fn put(&self, record: &PuzzleRecord, mode: WriteMode) -> Result<()> {
        let mut records = self.records.write().await;
        if mode == WriteMode::CreateNew && records.contains_key(&record.id) {
            return Err(JumbleError::AlreadyExistsError {
                id: record.id.clone(),
            });
        }
        records.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<PuzzleRecord>> {
        Ok(self.records.read().await.get(id).cloned())
    }
}
