use crate::core::vocabulary::VocabularyPool;
use crate::domain::model::PuzzleRecord;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// How `PuzzleStore::put` treats an existing record for the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Last write wins.
    #[default]
    Overwrite,
    /// Refuse with `AlreadyExistsError` when the id is taken.
    CreateNew,
}

/// Key-value store of puzzle records keyed by `YYYY-MM-DD`.
///
/// Implementations do not validate record shape; the generator checks before
/// `put` and the query service checks after `get`.
#[async_trait]
pub trait PuzzleStore: Send + Sync {
    /// Stores `record` under `record.id`.
    async fn put(&self, record: &PuzzleRecord, mode: WriteMode) -> Result<()>;

    /// `Ok(None)` is a miss, not an error.
    async fn get(&self, id: &str) -> Result<Option<PuzzleRecord>>;
}

pub trait VocabularySource: Send + Sync {
    fn load(&self) -> Result<VocabularyPool>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
