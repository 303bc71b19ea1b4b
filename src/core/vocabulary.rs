//! Candidate word pool and the optional quality filter.

use crate::domain::model::Word;
use crate::utils::error::{JumbleError, Result};
use std::collections::{BTreeSet, HashMap, HashSet};

/// De-duplicated set of fixed-length uppercase words.
///
/// Words are kept sorted so a seeded RNG picks the same words for the same
/// source list regardless of the order of lines in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyPool {
    words: Vec<Word>,
    word_length: usize,
}

impl VocabularyPool {
    /// Normalizes raw lines: trim, uppercase, keep exactly `word_length`
    /// ASCII letters, drop duplicates. Anything else is skipped silently.
    pub fn from_lines<I, S>(lines: I, word_length: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: BTreeSet<Word> = lines
            .into_iter()
            .filter_map(|line| Word::parse(line.as_ref(), word_length).ok())
            .collect();

        Self {
            words: words.into_iter().collect(),
            word_length,
        }
    }

    pub fn filtered(self, filter: &QualityFilter) -> Self {
        let before = self.words.len();
        let words: Vec<Word> = self.words.into_iter().filter(|w| filter.keeps(w)).collect();
        tracing::debug!("Quality filter kept {} of {} words", words.len(), before);

        Self {
            words,
            word_length: self.word_length,
        }
    }

    /// Rejects a pool smaller than `min_words`, which usually means a
    /// truncated or wrong word list.
    pub fn ensure_min_size(self, min_words: usize) -> Result<Self> {
        if self.words.len() < min_words {
            return Err(JumbleError::VocabularyError {
                message: format!(
                    "only {} usable {}-letter words, at least {} required",
                    self.words.len(),
                    self.word_length,
                    min_words
                ),
            });
        }
        Ok(self)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[inline]
    pub fn word_length(&self) -> usize {
        self.word_length
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words
            .binary_search_by(|w| w.as_str().cmp(word))
            .is_ok()
    }
}

/// Frequency threshold plus a static denylist.
///
/// Frequencies are Zipf values (log10 of occurrences per billion words). A
/// word missing from the table counts as frequency 0.
#[derive(Debug, Clone, Default)]
pub struct QualityFilter {
    frequencies: HashMap<String, f64>,
    min_zipf: Option<f64>,
    denylist: HashSet<String>,
}

impl QualityFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frequencies(mut self, frequencies: HashMap<String, f64>, min_zipf: f64) -> Self {
        self.frequencies = frequencies
            .into_iter()
            .map(|(word, zipf)| (word.trim().to_ascii_uppercase(), zipf))
            .collect();
        self.min_zipf = Some(min_zipf);
        self
    }

    pub fn with_denylist<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.denylist
            .extend(words.into_iter().map(|w| w.as_ref().trim().to_ascii_uppercase()));
        self
    }

    pub fn zipf(&self, word: &Word) -> f64 {
        self.frequencies.get(word.as_str()).copied().unwrap_or(0.0)
    }

    pub fn keeps(&self, word: &Word) -> bool {
        if self.denylist.contains(word.as_str()) {
            return false;
        }
        match self.min_zipf {
            Some(min) => self.zipf(word) >= min,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_lines_normalizes_and_dedupes() {
        let pool = VocabularyPool::from_lines(
            ["crane", " Crane ", "SLATE", "toolong", "abc", "sl4te", "", "irate"],
            5,
        );

        let words: Vec<&str> = pool.words().iter().map(Word::as_str).collect();
        assert_eq!(words, vec!["CRANE", "IRATE", "SLATE"]);
        assert_eq!(pool.word_length(), 5);
        assert!(pool.contains("SLATE"));
        assert!(!pool.contains("slate"));
    }

    #[test]
    fn ensure_min_size_rejects_small_pool() {
        let pool = VocabularyPool::from_lines(["crane", "slate"], 5);
        assert!(matches!(
            pool.clone().ensure_min_size(3),
            Err(JumbleError::VocabularyError { .. })
        ));
        assert_eq!(pool.ensure_min_size(2).unwrap().len(), 2);
    }

    #[test]
    fn denylist_matches_after_normalization() {
        let filter = QualityFilter::new().with_denylist(["cimex "]);
        let pool = VocabularyPool::from_lines(["cimex", "crane"], 5).filtered(&filter);
        assert_eq!(pool.len(), 1);
        assert!(pool.contains("CRANE"));
    }

    #[test]
    fn frequency_threshold_drops_rare_and_unknown_words() {
        let frequencies = HashMap::from([
            ("crane".to_string(), 3.4),
            ("xylyl".to_string(), 1.1),
            ("slate".to_string(), 2.2),
        ]);
        let filter = QualityFilter::new().with_frequencies(frequencies, 2.2);
        let pool =
            VocabularyPool::from_lines(["crane", "xylyl", "slate", "zzzzz"], 5).filtered(&filter);

        let words: Vec<&str> = pool.words().iter().map(Word::as_str).collect();
        assert_eq!(words, vec!["CRANE", "SLATE"]);
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let pool = VocabularyPool::from_lines(["crane", "slate"], 5).filtered(&QualityFilter::new());
        assert_eq!(pool.len(), 2);
    }
}
