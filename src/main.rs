use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use workshop::server::{
    config::Config, error::AppError, router, scheduler::refresh_tokens,
    service::import::LegacyImportService, startup,
};

#[derive(Parser)]
#[command(name = "workshop", version, about = "Creative work sharing backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Import a JSON export of the legacy database.
    Import {
        /// Path to the export file.
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,workshop=debug,tower_http=debug")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Import { file } => import(config, file).await,
    }
}

async fn serve(config: Config) -> Result<(), AppError> {
    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db).await?;
    let state = startup::build_state(&config, db)?;

    tokio::fs::create_dir_all(&config.storage_path).await?;

    startup::check_for_admin(&state.db, &config.app_url, &state.admin_code_service).await?;

    let _scheduler = refresh_tokens::start_scheduler(&state).await?;

    let app = router::app(state, session, &config.storage_path);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn import(config: Config, file: PathBuf) -> Result<(), AppError> {
    let db = startup::connect_to_database(&config).await?;

    let report = LegacyImportService::new(&db).import_file(&file).await?;

    tracing::info!("Import of {} finished", file.display());
    println!("{}", report);

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
