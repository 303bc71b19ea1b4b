use crate::core::generator::PuzzleGenerator;
use crate::domain::model::PuzzleRecord;
use crate::domain::ports::{PuzzleStore, VocabularySource, WriteMode};
use crate::utils::error::Result;
use chrono::NaiveDate;
use rand::Rng;

/// One generation run: load vocabulary, generate, write.
///
/// Every failure happens before `put`, so a failed run leaves the store
/// untouched.
pub struct GenerationEngine<V: VocabularySource, S: PuzzleStore> {
    vocabulary: V,
    store: S,
    generator: PuzzleGenerator,
    write_mode: WriteMode,
}

impl<V: VocabularySource, S: PuzzleStore> GenerationEngine<V, S> {
    pub fn new(vocabulary: V, store: S, generator: PuzzleGenerator) -> Self {
        Self {
            vocabulary,
            store,
            generator,
            write_mode: WriteMode::default(),
        }
    }

    pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Generates and validates without writing.
    pub fn preview<R: Rng + ?Sized>(&self, date: NaiveDate, rng: &mut R) -> Result<PuzzleRecord> {
        tracing::info!("Loading vocabulary...");
        let pool = self.vocabulary.load()?;
        tracing::info!("Loaded {} candidate words", pool.len());

        tracing::info!("Generating puzzle for {}...", date);
        self.generator.generate(&pool, date, rng)
    }

    pub async fn run<R: Rng + ?Sized>(&self, date: NaiveDate, rng: &mut R) -> Result<PuzzleRecord> {
        let record = self.preview(date, rng)?;

        tracing::info!("Storing puzzle {} ({:?})", record.id, self.write_mode);
        self.store.put(&record, self.write_mode).await?;

        Ok(record)
    }
}
