//! recipes-web - Recipe manager web service
//!
//! Fetches recipes from arbitrary URLs, stores them in SQLite, and serves
//! the card-based gallery UI plus its JSON API.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use recipes_common::config::{classifier_api_key, RootFolderInitializer, RootFolderResolver};
use recipes_web::classify::Classifier;
use recipes_web::{build_router, scrape, AppState};

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "recipes-web", about = "Personal recipe manager web service")]
struct Args {
    /// Root data folder (overrides environment and config file)
    #[arg(long, env = "RECIPES_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// Port to listen on
    #[arg(long, env = "RECIPES_PORT", default_value_t = 5780)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting recipes-web v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    // Resolve root folder (CLI -> env -> config file -> OS default)
    let resolver = RootFolderResolver::new().with_cli_override(args.root_folder);
    let root_folder = resolver.resolve();

    let initializer = RootFolderInitializer::new(root_folder);
    initializer.ensure_directory_exists()?;

    let db_path = initializer.database_path();
    info!("Database path: {}", db_path.display());

    // Open or create database
    let pool = recipes_common::db::init_database(&db_path).await?;
    info!("✓ Database connection established");

    // Outbound HTTP client for page fetches and image downloads
    let http = scrape::build_http_client()?;

    // Category classification runs only when an API key is configured
    let classifier = match classifier_api_key() {
        Some(key) => {
            info!("✓ Ingredient classifier enabled");
            Some(Classifier::new(key)?)
        }
        None => {
            info!("Ingredient classifier disabled (no API key configured)");
            None
        }
    };

    // Create application state and router
    let state = AppState::new(pool, http, classifier);
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port)).await?;
    info!("recipes-web listening on http://127.0.0.1:{}", args.port);
    info!("Health check: http://127.0.0.1:{}/health", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
