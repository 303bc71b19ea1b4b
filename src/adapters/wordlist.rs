use crate::core::vocabulary::{QualityFilter, VocabularyPool};
use crate::domain::model::Word;
use crate::domain::ports::VocabularySource;
use crate::utils::error::{JumbleError, Result};
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Word list file, one word per line. Raw or pre-cleaned lists both work.
#[derive(Debug, Clone)]
pub struct FileVocabulary {
    path: PathBuf,
    word_length: usize,
    min_words: usize,
    filter: Option<QualityFilter>,
}

impl FileVocabulary {
    pub fn new(path: impl Into<PathBuf>, word_length: usize, min_words: usize) -> Self {
        Self {
            path: path.into(),
            word_length,
            min_words,
            filter: None,
        }
    }

    pub fn with_filter(mut self, filter: QualityFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Reads and normalizes the list, applying the filter but not the
    /// minimum size check.
    pub fn read_pool(&self) -> Result<VocabularyPool> {
        self.read_pool_counted().map(|(pool, _)| pool)
    }

    /// Like `read_pool`, also returning how many non-blank lines the file had.
    pub fn read_pool_counted(&self) -> Result<(VocabularyPool, usize)> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            JumbleError::VocabularyError {
                message: format!("cannot read word list {}: {}", self.path.display(), e),
            }
        })?;

        let raw_lines = content.lines().filter(|line| !line.trim().is_empty()).count();
        let pool = VocabularyPool::from_lines(content.lines(), self.word_length);
        tracing::debug!(
            "Read {} distinct {}-letter words from {} lines of {}",
            pool.len(),
            self.word_length,
            raw_lines,
            self.path.display()
        );

        let pool = match &self.filter {
            Some(filter) => pool.filtered(filter),
            None => pool,
        };
        Ok((pool, raw_lines))
    }
}

impl VocabularySource for FileVocabulary {
    fn load(&self) -> Result<VocabularyPool> {
        self.read_pool()?.ensure_min_size(self.min_words)
    }
}

/// In-memory word list.
#[derive(Debug, Clone)]
pub struct StaticVocabulary {
    words: Vec<String>,
    word_length: usize,
    min_words: usize,
}

impl StaticVocabulary {
    pub fn new<I, S>(words: I, word_length: usize, min_words: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            word_length,
            min_words,
        }
    }
}

impl VocabularySource for StaticVocabulary {
    fn load(&self) -> Result<VocabularyPool> {
        VocabularyPool::from_lines(&self.words, self.word_length).ensure_min_size(self.min_words)
    }
}

/// Parses a tab separated `<word>\t<zipf>` table. Lines starting with `#`
/// are comments.
pub fn parse_frequency_table<R: Read>(reader: R) -> Result<HashMap<String, f64>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut table = HashMap::new();
    for row in rdr.deserialize::<(String, f64)>() {
        let (word, zipf) = row?;
        table.insert(word.to_ascii_uppercase(), zipf);
    }
    Ok(table)
}

pub fn load_frequency_table<P: AsRef<Path>>(path: P) -> Result<HashMap<String, f64>> {
    let file = std::fs::File::open(&path).map_err(|e| JumbleError::VocabularyError {
        message: format!(
            "cannot open frequency table {}: {}",
            path.as_ref().display(),
            e
        ),
    })?;
    parse_frequency_table(file)
}

/// Writes the pool one word per line, sorted.
pub fn write_word_list<P: AsRef<Path>>(path: P, words: &[Word]) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut content = words.iter().map(Word::as_str).collect::<Vec<_>>().join("\n");
    content.push('\n');
    std::fs::write(path, content)?;
    Ok(())
}
