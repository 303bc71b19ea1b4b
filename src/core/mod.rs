pub mod engine;
pub mod generator;
pub mod query;
pub mod vocabulary;

pub use crate::domain::model::{GridShape, PuzzleRecord, PuzzleView, Word};
pub use crate::domain::ports::{Clock, PuzzleStore, VocabularySource, WriteMode};
pub use crate::utils::error::Result;
