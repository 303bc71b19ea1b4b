use crate::config::JumbleConfig;
use crate::utils::error::{JumbleError, Result};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "daily-jumble")]
#[command(about = "Generate the daily word jumble puzzle")]
pub struct GenerateArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "jumble.toml")]
    pub config: String,

    /// Puzzle date (YYYY-MM-DD), defaults to today in the configured time zone
    #[arg(short, long)]
    pub date: Option<String>,

    /// Fixed RNG seed for a reproducible puzzle
    #[arg(long)]
    pub seed: Option<u64>,

    /// Generate and print the puzzle without storing it
    #[arg(long)]
    pub dry_run: bool,

    /// Refuse to replace an existing puzzle for the same date
    #[arg(long)]
    pub keep_existing: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "jumble-server")]
#[command(about = "Serve stored jumble puzzles over HTTP")]
pub struct ServeArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "jumble.toml")]
    pub config: String,

    /// Override server.bind from config
    #[arg(long)]
    pub bind: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "prune-words")]
#[command(about = "Clean a raw word list with the frequency threshold and denylist")]
pub struct PruneArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "jumble.toml")]
    pub config: String,

    /// Raw word list, defaults to vocabulary.raw_path
    #[arg(short, long)]
    pub input: Option<String>,

    /// Cleaned output list, defaults to vocabulary.path
    #[arg(short, long)]
    pub output: Option<String>,

    /// Override vocabulary.frequency_table from config
    #[arg(long)]
    pub frequency_table: Option<String>,

    /// Override vocabulary.min_zipf from config
    #[arg(long)]
    pub min_zipf: Option<f64>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl PruneArgs {
    /// Resolves (input, output), refusing to write the cleaned list over its input.
    pub fn resolve_paths(&self, config: &JumbleConfig) -> Result<(String, String)> {
        let input = self
            .input
            .clone()
            .unwrap_or_else(|| config.vocabulary.raw_path.clone());
        let output = self
            .output
            .clone()
            .unwrap_or_else(|| config.vocabulary.path.clone());

        if input == output {
            return Err(JumbleError::InvalidConfigValueError {
                field: "output".to_string(),
                value: output,
                reason: "cleaned list would overwrite the raw input".to_string(),
            });
        }
        Ok((input, output))
    }
}
