use crate::adapters::storage::FilePuzzleStore;
use crate::adapters::wordlist::{load_frequency_table, FileVocabulary};
use crate::core::generator::{PuzzleGenerator, DEFAULT_MAX_SCRAMBLE_ATTEMPTS};
use crate::core::vocabulary::QualityFilter;
use crate::domain::model::GridShape;
use crate::domain::ports::WriteMode;
use crate::utils::error::{JumbleError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_range,
    validate_required_field, validate_socket_addr, validate_time_zone, Validate,
};
use chrono_tz::Tz;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JumbleConfig {
    pub puzzle: PuzzleConfig,
    pub vocabulary: VocabularyConfig,
    pub store: StoreConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    pub rows: usize,
    pub word_length: usize,
    pub max_scramble_attempts: usize,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        let shape = GridShape::default();
        Self {
            rows: shape.rows,
            word_length: shape.word_length,
            max_scramble_attempts: DEFAULT_MAX_SCRAMBLE_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    /// 生成時讀取的（通常是清理過的）字表
    pub path: String,
    /// prune-words 的原始輸入字表
    pub raw_path: String,
    pub min_words: usize,
    pub frequency_table: Option<String>,
    pub min_zipf: Option<f64>,
    pub denylist: Vec<String>,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            path: "data/words5_clean.txt".to_string(),
            raw_path: "data/words5.txt".to_string(),
            min_words: 5000,
            frequency_table: None,
            min_zipf: None,
            denylist: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub puzzle_dir: String,
    pub overwrite: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            puzzle_dir: "puzzles".to_string(),
            overwrite: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub time_zone: String,
    pub allowed_origins: Vec<String>,
    pub json_logs: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8000".to_string(),
            time_zone: "UTC".to_string(),
            allowed_origins: vec!["*".to_string()],
            json_logs: false,
        }
    }
}

impl JumbleConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| JumbleError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| JumbleError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PUZZLE_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| JumbleError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_positive_number("puzzle.rows", self.puzzle.rows, 1)?;
        validate_range("puzzle.word_length", self.puzzle.word_length, 1, 32)?;
        validate_positive_number(
            "puzzle.max_scramble_attempts",
            self.puzzle.max_scramble_attempts,
            1,
        )?;

        validate_path("vocabulary.path", &self.vocabulary.path)?;
        validate_path("vocabulary.raw_path", &self.vocabulary.raw_path)?;
        // 清理結果不可覆寫原始字表
        if self.vocabulary.raw_path == self.vocabulary.path {
            return Err(JumbleError::InvalidConfigValueError {
                field: "vocabulary.raw_path".to_string(),
                value: self.vocabulary.raw_path.clone(),
                reason: "must differ from vocabulary.path".to_string(),
            });
        }
        validate_positive_number("vocabulary.min_words", self.vocabulary.min_words, self.puzzle.rows)?;

        // 頻率表與門檻必須一起設定
        if let Some(table) = &self.vocabulary.frequency_table {
            validate_path("vocabulary.frequency_table", table)?;
            let min_zipf = *validate_required_field("vocabulary.min_zipf", &self.vocabulary.min_zipf)?;
            if !min_zipf.is_finite() || min_zipf < 0.0 {
                return Err(JumbleError::InvalidConfigValueError {
                    field: "vocabulary.min_zipf".to_string(),
                    value: min_zipf.to_string(),
                    reason: "Zipf threshold must be a finite, non-negative number".to_string(),
                });
            }
        } else if self.vocabulary.min_zipf.is_some() {
            return Err(JumbleError::MissingConfigError {
                field: "vocabulary.frequency_table".to_string(),
            });
        }

        for word in &self.vocabulary.denylist {
            validate_non_empty_string("vocabulary.denylist", word)?;
        }

        validate_path("store.puzzle_dir", &self.store.puzzle_dir)?;

        validate_time_zone("server.time_zone", &self.server.time_zone)?;
        validate_socket_addr("server.bind", &self.server.bind)?;

        Ok(())
    }

    pub fn grid_shape(&self) -> GridShape {
        GridShape {
            rows: self.puzzle.rows,
            word_length: self.puzzle.word_length,
        }
    }

    pub fn write_mode(&self) -> WriteMode {
        if self.store.overwrite {
            WriteMode::Overwrite
        } else {
            WriteMode::CreateNew
        }
    }

    pub fn time_zone(&self) -> Result<Tz> {
        validate_time_zone("server.time_zone", &self.server.time_zone)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        validate_socket_addr("server.bind", &self.server.bind)
    }

    /// Builds the quality filter; `None` when neither frequencies nor a
    /// denylist are configured.
    pub fn quality_filter(&self) -> Result<Option<QualityFilter>> {
        let vocabulary = &self.vocabulary;
        if vocabulary.frequency_table.is_none() && vocabulary.denylist.is_empty() {
            return Ok(None);
        }

        let mut filter = QualityFilter::new().with_denylist(&vocabulary.denylist);
        if let Some(table) = &vocabulary.frequency_table {
            let min_zipf = *validate_required_field("vocabulary.min_zipf", &vocabulary.min_zipf)?;
            filter = filter.with_frequencies(load_frequency_table(table)?, min_zipf);
        }
        Ok(Some(filter))
    }

    pub fn vocabulary_source(&self) -> Result<FileVocabulary> {
        let source = FileVocabulary::new(
            &self.vocabulary.path,
            self.puzzle.word_length,
            self.vocabulary.min_words,
        );
        Ok(match self.quality_filter()? {
            Some(filter) => source.with_filter(filter),
            None => source,
        })
    }

    pub fn generator(&self) -> PuzzleGenerator {
        PuzzleGenerator::new(self.grid_shape())
            .with_max_scramble_attempts(self.puzzle.max_scramble_attempts)
    }

    pub fn puzzle_store(&self) -> FilePuzzleStore {
        FilePuzzleStore::new(&self.store.puzzle_dir)
    }
}

impl Validate for JumbleConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
