use crate::core::vocabulary::VocabularyPool;
use crate::domain::model::{puzzle_id, GridShape, PuzzleRecord, Word};
use crate::utils::error::{JumbleError, Result};
use chrono::NaiveDate;
use rand::seq::{index, SliceRandom};
use rand::Rng;

pub const DEFAULT_MAX_SCRAMBLE_ATTEMPTS: usize = 200;

/// Builds one puzzle: picks distinct words, then shuffles each word's letters
/// within its own row.
#[derive(Debug, Clone)]
pub struct PuzzleGenerator {
    shape: GridShape,
    max_scramble_attempts: usize,
}

impl PuzzleGenerator {
    pub fn new(shape: GridShape) -> Self {
        Self {
            shape,
            max_scramble_attempts: DEFAULT_MAX_SCRAMBLE_ATTEMPTS,
        }
    }

    pub fn with_max_scramble_attempts(mut self, attempts: usize) -> Self {
        self.max_scramble_attempts = attempts.max(1);
        self
    }

    /// Generates the record for `date`. Nothing is returned unless the whole
    /// grid passed validation.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        pool: &VocabularyPool,
        date: NaiveDate,
        rng: &mut R,
    ) -> Result<PuzzleRecord> {
        if pool.word_length() != self.shape.word_length {
            return Err(JumbleError::VocabularyError {
                message: format!(
                    "pool holds {}-letter words but the grid needs {}",
                    pool.word_length(),
                    self.shape.word_length
                ),
            });
        }

        let solution = self.select(pool, rng)?;
        let grid = solution
            .iter()
            .map(|word| self.scramble(word, &solution, rng))
            .collect::<Result<Vec<_>>>()?;

        let record = PuzzleRecord {
            id: puzzle_id(date),
            grid,
            solution: solution.iter().map(|w| w.as_str().to_string()).collect(),
        };

        if let Err(message) = record.check(&self.shape) {
            tracing::error!("Generated puzzle {} failed validation: {}", record.id, message);
            return Err(JumbleError::InvariantViolation { message });
        }

        tracing::debug!("Puzzle {} solution: {:?}", record.id, record.solution);
        Ok(record)
    }

    /// Draws `rows` distinct words uniformly without replacement.
    pub fn select<R: Rng + ?Sized>(&self, pool: &VocabularyPool, rng: &mut R) -> Result<Vec<Word>> {
        if pool.len() < self.shape.rows {
            return Err(JumbleError::InsufficientPoolError {
                available: pool.len(),
                required: self.shape.rows,
            });
        }

        let words = pool.words();
        Ok(index::sample(rng, words.len(), self.shape.rows)
            .into_iter()
            .map(|i| words[i].clone())
            .collect())
    }

    /// Shuffles the letters of `word` until the row spells none of the
    /// `solution` words, giving up after the configured number of attempts.
    pub fn scramble<R: Rng + ?Sized>(
        &self,
        word: &Word,
        solution: &[Word],
        rng: &mut R,
    ) -> Result<Vec<String>> {
        let mut letters = word.letters();

        for attempt in 1..=self.max_scramble_attempts {
            letters.shuffle(rng);
            let row: String = letters.iter().collect();

            if solution.iter().all(|w| w.as_str() != row) {
                if attempt > 1 {
                    tracing::debug!("Scrambled {} after {} attempts", word, attempt);
                }
                return Ok(letters.iter().map(|c| c.to_string()).collect());
            }
        }

        Err(JumbleError::ScrambleExhaustedError {
            word: word.to_string(),
            attempts: self.max_scramble_attempts,
        })
    }
}

impl Default for PuzzleGenerator {
    fn default() -> Self {
        Self::new(GridShape::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const WORDS: &[&str] = &[
        "frail", "cider", "track", "leafy", "crane", "slate", "irate", "pound", "ghost", "blimp",
    ];

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 24).unwrap()
    }

    #[test]
    fn generate_produces_valid_record() {
        let pool = VocabularyPool::from_lines(WORDS, 5);
        let generator = PuzzleGenerator::default();

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let record = generator.generate(&pool, date(), &mut rng).unwrap();

            assert_eq!(record.id, "2025-07-24");
            assert_eq!(record.grid.len(), 4);
            assert!(record.grid.iter().all(|row| row.len() == 5));
            assert!(record.solution.iter().all(|w| pool.contains(w)));
            assert_eq!(record.check(&GridShape::default()), Ok(()));
        }
    }

    #[test]
    fn same_seed_reproduces_record() {
        let pool = VocabularyPool::from_lines(WORDS, 5);
        let generator = PuzzleGenerator::default();

        let first = generator
            .generate(&pool, date(), &mut StdRng::seed_from_u64(7))
            .unwrap();
        let second = generator
            .generate(&pool, date(), &mut StdRng::seed_from_u64(7))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn select_returns_distinct_words() {
        let pool = VocabularyPool::from_lines(["crane", "slate", "irate", "pound"], 5);
        let generator = PuzzleGenerator::default();
        let mut rng = StdRng::seed_from_u64(1);

        let mut words = generator.select(&pool, &mut rng).unwrap();
        words.sort();
        words.dedup();
        assert_eq!(words.len(), 4);
    }

    #[test]
    fn pool_smaller_than_rows_is_insufficient() {
        let pool = VocabularyPool::from_lines(["crane", "slate", "irate"], 5);
        let generator = PuzzleGenerator::default();
        let mut rng = StdRng::seed_from_u64(1);

        let err = generator.generate(&pool, date(), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            JumbleError::InsufficientPoolError {
                available: 3,
                required: 4
            }
        ));
    }

    #[test]
    fn single_letter_word_exhausts_scramble() {
        let pool = VocabularyPool::from_lines(["aaaaa", "bbbbb", "ccccc", "ddddd"], 5);
        let generator = PuzzleGenerator::default().with_max_scramble_attempts(10);
        let mut rng = StdRng::seed_from_u64(1);

        let err = generator.generate(&pool, date(), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            JumbleError::ScrambleExhaustedError { attempts: 10, .. }
        ));
    }

    #[test]
    fn scramble_avoids_anagram_solution_words() {
        let generator = PuzzleGenerator::default();
        let solution: Vec<Word> = ["STEAL", "LEAST", "TALES", "SLATE"]
            .iter()
            .map(|w| Word::parse(w, 5).unwrap())
            .collect();

        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let row = generator
                .scramble(&solution[0], &solution, &mut rng)
                .unwrap()
                .concat();
            assert!(!["STEAL", "LEAST", "TALES", "SLATE"].contains(&row.as_str()));
        }
    }

    #[test]
    fn pool_with_wrong_word_length_is_rejected() {
        let pool = VocabularyPool::from_lines(["cranes", "slates", "irates", "pounds"], 6);
        let generator = PuzzleGenerator::default();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(matches!(
            generator.generate(&pool, date(), &mut rng),
            Err(JumbleError::VocabularyError { .. })
        ));
    }

    #[test]
    fn custom_shape_is_respected() {
        let shape = GridShape {
            rows: 2,
            word_length: 6,
        };
        let pool = VocabularyPool::from_lines(["cranes", "slates", "pounds"], 6);
        let generator = PuzzleGenerator::new(shape);
        let mut rng = StdRng::seed_from_u64(3);

        let record = generator.generate(&pool, date(), &mut rng).unwrap();
        assert_eq!(record.grid.len(), 2);
        assert!(record.grid.iter().all(|row| row.len() == 6));
        assert_eq!(record.check(&shape), Ok(()));
    }
}
