//! bizcard-api server binary.
//!
//! Reads configuration from the environment (and `.env` when present),
//! opens the configured store and serves the HTTP API.
//!
//! ```
//! bizcard-api                       # same as `bizcard-api serve`
//! bizcard-api seed                  # seed an empty store and exit
//! bizcard-api hash-password Secret@123
//! ```

use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use bizcard_api::auth::password::hash_password_blocking;
use bizcard_api::config::{AppConfig, StorageBackend};
use bizcard_api::database::{DatabaseManager, MemoryRepository, PgRepository, Repository};
use bizcard_api::services::seed_if_empty;
use bizcard_api::AppState;

#[derive(Parser)]
#[command(author, version, about = "Business card API server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Seed an empty store with sample users and cards, then exit.
    Seed,
    /// Print the argon2 hash of a password and exit.
    HashPassword { password: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so DATABASE_URL and JWT_SECRET can live there
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();

    if let Some(Command::HashPassword { password }) = &cli.command {
        println!("{}", hash_password_blocking(password)?);
        return Ok(());
    }

    let config = AppConfig::from_env();
    config.validate().context("invalid configuration")?;
    tracing::info!("Starting bizcard-api in {:?} mode", config.environment);

    let repo = open_repository(&config).await?;

    match cli.command {
        Some(Command::Seed) => {
            let report = seed_if_empty(repo.as_ref(), config.cards.biz_number_max_attempts)
                .await
                .context("failed to seed store")?;
            tracing::info!("Seeded {} users and {} cards", report.users, report.cards);
            Ok(())
        }
        _ => serve(repo, config).await,
    }
}

async fn open_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn Repository>> {
    match config.database.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryRepository::new()))
        }
        StorageBackend::Postgres => {
            let pool = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to database")?;
            if config.database.run_migrations {
                DatabaseManager::migrate(&pool)
                    .await
                    .context("failed to run migrations")?;
            }
            Ok(Arc::new(PgRepository::new(pool)))
        }
    }
}

async fn serve(repo: Arc<dyn Repository>, config: AppConfig) -> anyhow::Result<()> {
    if config.seed.enabled {
        match seed_if_empty(repo.as_ref(), config.cards.biz_number_max_attempts).await {
            Ok(report) if report.users > 0 => {
                tracing::info!("Seeded {} users and {} cards", report.users, report.cards)
            }
            Ok(_) => {}
            Err(e) => tracing::error!("Seeding failed: {:#}", e),
        }
    }

    let address = config.bind_addr();
    let app = bizcard_api::app(AppState::new(repo, config));

    tracing::info!("Listening on http://{address}");
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
