use clap::Parser;
use daily_jumble::adapters::clock::SystemClock;
use daily_jumble::adapters::http::{build_router, ApiState};
use daily_jumble::config::ServeArgs;
use daily_jumble::utils::{logger, validation::Validate};
use daily_jumble::{JumbleConfig, PuzzleQueryService};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServeArgs::parse();

    // 載入 TOML 配置
    let mut config = match JumbleConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    // 初始化日誌
    logger::init_server_logger(args.verbose, config.server.json_logs);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let zone = config.time_zone()?;
    let addr = config.bind_addr()?;

    let service = PuzzleQueryService::new(config.puzzle_store(), config.grid_shape());
    let state = ApiState::new(service, Arc::new(SystemClock), zone);
    let router = build_router(state, &config.server.allowed_origins);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        "🚀 Serving puzzles from {} on http://{} (time zone {})",
        config.store.puzzle_dir,
        listener.local_addr()?,
        zone
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
        })
        .await?;

    Ok(())
}
