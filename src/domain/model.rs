use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use thiserror::Error;

/// ISO-8601 calendar date format used for puzzle ids and store keys.
pub const ID_FORMAT: &str = "%Y-%m-%d";

pub fn puzzle_id(date: NaiveDate) -> String {
    date.format(ID_FORMAT).to_string()
}

/// Parses a strict `YYYY-MM-DD` key. Non-padded forms such as `2025-7-4` are
/// rejected so that every date has exactly one key.
pub fn parse_puzzle_id(id: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(id, ID_FORMAT).ok()?;
    (puzzle_id(date) == id).then_some(date)
}

/// Grid dimensions: `rows` words of `word_length` letters each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    pub rows: usize,
    pub word_length: usize,
}

impl Default for GridShape {
    fn default() -> Self {
        Self {
            rows: 4,
            word_length: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("word must be exactly {expected} letters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("word must contain only ASCII letters")]
    InvalidCharacters,
}

/// An uppercase, ASCII-alphabetic word of a fixed length.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Word(String);

impl Word {
    /// Trims and uppercases `raw`, then checks it is `length` ASCII letters.
    pub fn parse(raw: &str, length: usize) -> Result<Self, WordError> {
        let text = raw.trim().to_ascii_uppercase();

        if !text.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(WordError::InvalidCharacters);
        }

        if text.len() != length {
            return Err(WordError::InvalidLength {
                expected: length,
                actual: text.chars().count(),
            });
        }

        Ok(Self(text))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn letters(&self) -> Vec<char> {
        self.0.chars().collect()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persisted puzzle: `{"id": "YYYY-MM-DD", "grid": [[..]], "solution": [..]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleRecord {
    pub id: String,
    pub grid: Vec<Vec<String>>,
    pub solution: Vec<String>,
}

/// Client-facing projection of a record. It has no `solution` field at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleView {
    pub id: String,
    pub grid: Vec<Vec<String>>,
}

impl From<PuzzleRecord> for PuzzleView {
    fn from(record: PuzzleRecord) -> Self {
        Self {
            id: record.id,
            grid: record.grid,
        }
    }
}

fn letter_counts<'a>(letters: impl Iterator<Item = &'a str>) -> BTreeMap<&'a str, usize> {
    let mut counts = BTreeMap::new();
    for letter in letters {
        *counts.entry(letter).or_insert(0) += 1;
    }
    counts
}

impl PuzzleRecord {
    /// Checks the record schema and the puzzle invariants against `shape`.
    ///
    /// Returns the first violated rule as a human readable reason.
    pub fn check(&self, shape: &GridShape) -> Result<(), String> {
        if parse_puzzle_id(&self.id).is_none() {
            return Err(format!("id '{}' is not a YYYY-MM-DD date", self.id));
        }

        if self.solution.len() != shape.rows {
            return Err(format!(
                "solution has {} words, expected {}",
                self.solution.len(),
                shape.rows
            ));
        }

        let mut seen = HashSet::new();
        for word in &self.solution {
            let parsed = Word::parse(word, shape.word_length)
                .map_err(|e| format!("solution word '{}': {}", word, e))?;
            if parsed.as_str() != word {
                return Err(format!("solution word '{}' is not uppercase", word));
            }
            if !seen.insert(word.as_str()) {
                return Err(format!("solution word '{}' appears twice", word));
            }
        }

        if self.grid.len() != shape.rows {
            return Err(format!(
                "grid has {} rows, expected {}",
                self.grid.len(),
                shape.rows
            ));
        }

        for (index, (row, word)) in self.grid.iter().zip(&self.solution).enumerate() {
            if row.len() != shape.word_length {
                return Err(format!(
                    "row {} has {} cells, expected {}",
                    index,
                    row.len(),
                    shape.word_length
                ));
            }

            if let Some(cell) = row
                .iter()
                .find(|cell| cell.len() != 1 || !cell.chars().all(|c| c.is_ascii_uppercase()))
            {
                return Err(format!("row {} has invalid cell '{}'", index, cell));
            }

            let word_letters: Vec<String> = word.chars().map(String::from).collect();
            if letter_counts(row.iter().map(String::as_str))
                != letter_counts(word_letters.iter().map(String::as_str))
            {
                return Err(format!(
                    "row {} letters are not a permutation of '{}'",
                    index, word
                ));
            }

            let joined = row.concat();
            if seen.contains(joined.as_str()) {
                return Err(format!(
                    "row {} reads '{}', which is an unscrambled solution word",
                    index, joined
                ));
            }
        }

        Ok(())
    }
}
