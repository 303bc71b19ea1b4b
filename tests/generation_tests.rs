use chrono::NaiveDate;
use daily_jumble::adapters::wordlist::{FileVocabulary, StaticVocabulary};
use daily_jumble::domain::ports::{PuzzleStore, VocabularySource, WriteMode};
use daily_jumble::{
    FilePuzzleStore, GenerationEngine, GridShape, JumbleError, MemoryPuzzleStore, PuzzleGenerator,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{BTreeMap, HashSet};
use tempfile::TempDir;

const WORDS: &[&str] = &[
    "frail", "cider", "track", "leafy", "crane", "slate", "irate", "pound", "ghost", "blimp",
    "steal", "least", "tales", "speed", "eerie", "mamma", "civic", "queue", "jazzy", "fluff",
];

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 24).unwrap()
}

fn letter_counts(letters: impl Iterator<Item = char>) -> BTreeMap<char, usize> {
    let mut counts = BTreeMap::new();
    for c in letters {
        *counts.entry(c).or_insert(0) += 1;
    }
    counts
}

#[tokio::test]
async fn test_generated_records_satisfy_puzzle_properties() {
    let vocabulary = StaticVocabulary::new(WORDS.iter().copied(), 5, 4);
    let pool = vocabulary.load().unwrap();
    let engine = GenerationEngine::new(vocabulary, MemoryPuzzleStore::new(), PuzzleGenerator::default());

    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let record = engine.run(date(), &mut rng).await.unwrap();

        assert_eq!(record.id, "2025-07-24");
        assert_eq!(record.grid.len(), 4);
        assert_eq!(record.solution.len(), 4);

        let distinct: HashSet<&String> = record.solution.iter().collect();
        assert_eq!(distinct.len(), 4, "solution words must be distinct");

        for (row, word) in record.grid.iter().zip(&record.solution) {
            assert_eq!(row.len(), 5);
            assert_eq!(word.len(), 5);
            assert!(pool.contains(word));
            assert!(row.iter().all(|cell| cell.chars().count() == 1));

            let row_letters = letter_counts(row.iter().flat_map(|cell| cell.chars()));
            assert_eq!(row_letters, letter_counts(word.chars()));

            let joined = row.concat();
            assert!(
                !record.solution.contains(&joined),
                "row {joined} is an unscrambled solution word"
            );
        }
    }
}

#[tokio::test]
async fn test_run_writes_record_to_file_store() {
    let temp_dir = TempDir::new().unwrap();
    let words_path = temp_dir.path().join("words5.txt");
    std::fs::write(&words_path, WORDS.join("\n")).unwrap();

    let vocabulary = FileVocabulary::new(&words_path, 5, 10);
    let store = FilePuzzleStore::new(temp_dir.path().join("puzzles"));
    let engine = GenerationEngine::new(vocabulary, store.clone(), PuzzleGenerator::default());

    let mut rng = StdRng::seed_from_u64(2025);
    let record = engine.run(date(), &mut rng).await.unwrap();

    let path = temp_dir.path().join("puzzles").join("2025-07-24.json");
    assert!(path.exists());

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(stored["id"], "2025-07-24");
    assert_eq!(stored["grid"].as_array().unwrap().len(), 4);
    assert_eq!(stored["solution"].as_array().unwrap().len(), 4);

    assert_eq!(store.get("2025-07-24").await.unwrap(), Some(record));
}

#[tokio::test]
async fn test_repeated_generation_overwrites_by_default() {
    let vocabulary = StaticVocabulary::new(WORDS.iter().copied(), 5, 4);
    let store = MemoryPuzzleStore::new();
    let engine = GenerationEngine::new(vocabulary, store.clone(), PuzzleGenerator::default());

    engine.run(date(), &mut StdRng::seed_from_u64(1)).await.unwrap();
    let second = engine.run(date(), &mut StdRng::seed_from_u64(2)).await.unwrap();

    assert_eq!(store.len().await, 1);
    assert_eq!(store.get("2025-07-24").await.unwrap(), Some(second));
}

#[tokio::test]
async fn test_create_new_mode_keeps_existing_record() {
    let vocabulary = StaticVocabulary::new(WORDS.iter().copied(), 5, 4);
    let store = MemoryPuzzleStore::new();
    let engine = GenerationEngine::new(vocabulary, store.clone(), PuzzleGenerator::default())
        .with_write_mode(WriteMode::CreateNew);

    let first = engine.run(date(), &mut StdRng::seed_from_u64(1)).await.unwrap();
    let err = engine
        .run(date(), &mut StdRng::seed_from_u64(2))
        .await
        .unwrap_err();

    assert!(matches!(err, JumbleError::AlreadyExistsError { .. }));
    assert_eq!(store.get("2025-07-24").await.unwrap(), Some(first));
}

#[tokio::test]
async fn test_pool_of_rows_minus_one_is_insufficient_and_writes_nothing() {
    let shape = GridShape::default();
    let words: Vec<&str> = WORDS.iter().copied().take(shape.rows - 1).collect();
    // min_words of 1 so the pool itself loads, the generator must refuse it
    let vocabulary = StaticVocabulary::new(words, 5, 1);
    let store = MemoryPuzzleStore::new();
    let engine = GenerationEngine::new(vocabulary, store.clone(), PuzzleGenerator::new(shape));

    let err = engine
        .run(date(), &mut StdRng::seed_from_u64(1))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        JumbleError::InsufficientPoolError {
            available: 3,
            required: 4
        }
    ));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_unscramblable_words_abort_without_partial_write() {
    let temp_dir = TempDir::new().unwrap();
    let vocabulary = StaticVocabulary::new(["aaaaa", "bbbbb", "ccccc", "ddddd"], 5, 4);
    let store = FilePuzzleStore::new(temp_dir.path());
    let engine = GenerationEngine::new(
        vocabulary,
        store.clone(),
        PuzzleGenerator::default().with_max_scramble_attempts(20),
    );

    let err = engine
        .run(date(), &mut StdRng::seed_from_u64(1))
        .await
        .unwrap_err();

    assert!(matches!(err, JumbleError::ScrambleExhaustedError { .. }));
    assert_eq!(store.get("2025-07-24").await.unwrap(), None);
}

#[tokio::test]
async fn test_missing_word_list_aborts_run() {
    let temp_dir = TempDir::new().unwrap();
    let vocabulary = FileVocabulary::new(temp_dir.path().join("missing.txt"), 5, 10);
    let store = MemoryPuzzleStore::new();
    let engine = GenerationEngine::new(vocabulary, store.clone(), PuzzleGenerator::default());

    let err = engine
        .run(date(), &mut StdRng::seed_from_u64(1))
        .await
        .unwrap_err();

    assert!(matches!(err, JumbleError::VocabularyError { .. }));
    assert!(store.is_empty().await);
}

#[test]
fn test_preview_does_not_need_a_store_write() {
    let vocabulary = StaticVocabulary::new(WORDS.iter().copied(), 5, 4);
    let engine = GenerationEngine::new(vocabulary, MemoryPuzzleStore::new(), PuzzleGenerator::default());

    let record = engine
        .preview(date(), &mut StdRng::seed_from_u64(9))
        .unwrap();
    assert_eq!(record.check(&GridShape::default()), Ok(()));
}
