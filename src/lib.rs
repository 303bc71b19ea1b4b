pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::storage::{FilePuzzleStore, MemoryPuzzleStore};
pub use adapters::wordlist::{FileVocabulary, StaticVocabulary};
pub use config::JumbleConfig;
pub use crate::core::{
    engine::GenerationEngine, generator::PuzzleGenerator, query::PuzzleQueryService,
    vocabulary::VocabularyPool,
};
pub use domain::model::{GridShape, PuzzleRecord, PuzzleView, Word};
pub use utils::error::{JumbleError, Result};
