use clap::Parser;
use daily_jumble::adapters::wordlist::{load_frequency_table, write_word_list, FileVocabulary};
use daily_jumble::config::PruneArgs;
use daily_jumble::core::vocabulary::QualityFilter;
use daily_jumble::utils::{logger, validation::Validate};
use daily_jumble::JumbleConfig;
use std::path::Path;

/// Zipf threshold used when a frequency table is given without one
const DEFAULT_MIN_ZIPF: f64 = 2.2;

fn main() -> anyhow::Result<()> {
    let args = PruneArgs::parse();
    logger::init_cli_logger(args.verbose);

    let config = if Path::new(&args.config).exists() {
        JumbleConfig::from_file(&args.config)?
    } else {
        tracing::warn!("Config file '{}' not found, using defaults", args.config);
        JumbleConfig::default()
    };
    config.validate()?;

    let (input, output) = args.resolve_paths(&config)?;
    let frequency_table = args
        .frequency_table
        .or_else(|| config.vocabulary.frequency_table.clone());

    let mut filter = QualityFilter::new().with_denylist(&config.vocabulary.denylist);
    if let Some(table) = &frequency_table {
        let min_zipf = args
            .min_zipf
            .or(config.vocabulary.min_zipf)
            .unwrap_or(DEFAULT_MIN_ZIPF);
        tracing::info!("📊 Keeping words with Zipf frequency >= {} from {}", min_zipf, table);
        filter = filter.with_frequencies(load_frequency_table(table)?, min_zipf);
    } else {
        tracing::warn!("No frequency table configured, only the denylist is applied");
    }

    // 不檢查最小數量，清理前的清單本來就可能很大或很小
    let (raw, raw_lines) =
        FileVocabulary::new(&input, config.puzzle.word_length, 0).read_pool_counted()?;
    let raw_distinct = raw.len();
    let cleaned = raw.filtered(&filter);

    write_word_list(&output, cleaned.words())?;

    if cleaned.len() < config.vocabulary.min_words {
        tracing::warn!(
            "Cleaned list has {} words, below vocabulary.min_words = {}",
            cleaned.len(),
            config.vocabulary.min_words
        );
    }

    println!(
        "✅ Kept {} of {} words ({} distinct {}-letter) → {}",
        cleaned.len(),
        raw_lines,
        raw_distinct,
        config.puzzle.word_length,
        output
    );
    Ok(())
}
