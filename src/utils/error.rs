use thiserror::Error;

#[derive(Error, Debug)]
pub enum JumbleError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Frequency table error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Vocabulary unusable: {message}")]
    VocabularyError { message: String },

    #[error("Vocabulary pool has {available} words, at least {required} are needed")]
    InsufficientPoolError { available: usize, required: usize },

    #[error("Could not scramble '{word}' after {attempts} attempts")]
    ScrambleExhaustedError { word: String, attempts: usize },

    #[error("Puzzle invariant violated: {message}")]
    InvariantViolation { message: String },

    #[error("No puzzle found for {id}")]
    NotFoundError { id: String },

    #[error("Puzzle {id} already exists")]
    AlreadyExistsError { id: String },

    #[error("Stored puzzle {id} is malformed: {reason}")]
    CorruptRecordError { id: String, reason: String },
}

pub type Result<T> = std::result::Result<T, JumbleError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Vocabulary,
    Generation,
    Storage,
    Query,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl JumbleError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::VocabularyError { .. } | Self::CsvError(_) => ErrorCategory::Vocabulary,
            Self::InsufficientPoolError { .. }
            | Self::ScrambleExhaustedError { .. }
            | Self::InvariantViolation { .. } => ErrorCategory::Generation,
            Self::IoError(_)
            | Self::SerializationError(_)
            | Self::AlreadyExistsError { .. }
            | Self::CorruptRecordError { .. } => ErrorCategory::Storage,
            Self::NotFoundError { .. } => ErrorCategory::Query,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotFoundError { .. } | Self::AlreadyExistsError { .. } => ErrorSeverity::Low,
            // 重新執行通常就能成功
            Self::ScrambleExhaustedError { .. } => ErrorSeverity::Medium,
            Self::InvariantViolation { .. } | Self::CorruptRecordError { .. } => {
                ErrorSeverity::Critical
            }
            _ => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => format!("Configuration problem: {}", self),
            Self::VocabularyError { .. } | Self::CsvError(_) => {
                format!("The word list could not be used: {}", self)
            }
            Self::InsufficientPoolError { available, required } => format!(
                "The word list only has {} usable words but a puzzle needs {}",
                available, required
            ),
            Self::ScrambleExhaustedError { word, .. } => {
                format!("The word {} could not be scrambled, no puzzle was written", word)
            }
            Self::InvariantViolation { .. } => {
                format!("Internal generator bug, no puzzle was written: {}", self)
            }
            Self::NotFoundError { id } => format!("There is no puzzle for {}", id),
            Self::AlreadyExistsError { id } => format!("A puzzle for {} already exists", id),
            Self::CorruptRecordError { id, .. } => format!("The stored puzzle for {} is damaged", id),
            Self::IoError(_) | Self::SerializationError(_) => {
                format!("Puzzle storage failed: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => "Check the TOML configuration file",
            Self::VocabularyError { .. } | Self::CsvError(_) => {
                "Check the vocabulary path and regenerate the cleaned list with prune-words"
            }
            Self::InsufficientPoolError { .. } => {
                "Use a larger word list or lower the quality filter threshold"
            }
            Self::ScrambleExhaustedError { .. } => "Run the generator again",
            Self::InvariantViolation { .. } => "Report this as a bug together with the --seed used",
            Self::NotFoundError { .. } => "Generate the puzzle for that date first",
            Self::AlreadyExistsError { .. } => "Drop --keep-existing to overwrite the puzzle",
            Self::CorruptRecordError { .. } => "Regenerate the puzzle for that date",
            Self::IoError(_) | Self::SerializationError(_) => {
                "Check that the puzzle directory exists and is writable"
            }
        }
    }
}
