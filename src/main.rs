use chrono::Utc;
use clap::Parser;
use daily_jumble::config::GenerateArgs;
use daily_jumble::domain::model::parse_puzzle_id;
use daily_jumble::utils::error::{ErrorSeverity, JumbleError};
use daily_jumble::utils::{logger, validation::Validate};
use daily_jumble::{GenerationEngine, JumbleConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

fn load_config(path: &str) -> Result<JumbleConfig, JumbleError> {
    if Path::new(path).exists() {
        tracing::info!("📁 Loading configuration from: {}", path);
        JumbleConfig::from_file(path)
    } else {
        tracing::warn!("Config file '{}' not found, using defaults", path);
        Ok(JumbleConfig::default())
    }
}

fn fail(e: &JumbleError) -> ! {
    tracing::error!(
        "❌ Puzzle generation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = GenerateArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);
    tracing::info!("🚀 Starting daily-jumble generator");

    let mut config = load_config(&args.config).unwrap_or_else(|e| fail(&e));

    // 應用命令列覆蓋設定
    if args.keep_existing {
        config.store.overwrite = false;
    }

    if let Err(e) = config.validate() {
        fail(&e);
    }

    let date = match &args.date {
        Some(raw) => match parse_puzzle_id(raw) {
            Some(date) => date,
            None => {
                eprintln!("❌ Invalid --date '{}', expected YYYY-MM-DD", raw);
                std::process::exit(1);
            }
        },
        None => {
            let zone = config.time_zone().unwrap_or_else(|e| fail(&e));
            Utc::now().with_timezone(&zone).date_naive()
        }
    };

    let mut rng = match args.seed {
        Some(seed) => {
            tracing::info!("🎲 Using fixed seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let vocabulary = config.vocabulary_source().unwrap_or_else(|e| fail(&e));
    let store = config.puzzle_store();
    let engine = GenerationEngine::new(vocabulary, store, config.generator())
        .with_write_mode(config.write_mode());

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be stored");
        let record = engine.preview(date, &mut rng).unwrap_or_else(|e| fail(&e));
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    let record = engine.run(date, &mut rng).await.unwrap_or_else(|e| fail(&e));

    let output_path = engine
        .store()
        .path_for(&record.id)
        .unwrap_or_else(|| engine.store().base_path().to_path_buf());
    tracing::info!("✅ Puzzle {} generated", record.id);
    println!("✅ wrote {}", output_path.display());

    Ok(())
}
