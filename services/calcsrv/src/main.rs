//! calcsrv entry point

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
#[cfg(feature = "swagger-ui")]
use utoipa::OpenApi;
#[cfg(feature = "swagger-ui")]
use utoipa_swagger_ui::SwaggerUi;

use calcsrv::history::{HistoryStore, MemoryHistoryStore, SqliteHistoryStore};
#[cfg(feature = "swagger-ui")]
use calcsrv::routes::CalcsrvApiDoc;
use calcsrv::{create_routes, AppState, Config};
use common::logging::{self, LogConfig};
use common::shutdown::wait_for_shutdown;
use common::sqlite::SqliteClient;

#[derive(Parser, Debug)]
#[command(author, version, about = "calcsrv - calculator service")]
struct Args {
    /// Configuration file (default: config/calcsrv.yaml if present)
    #[arg(short, long, value_name = "FILE", env = "CALCSRV_CONFIG")]
    config: Option<PathBuf>,

    /// Override api.host/api.port, e.g. 127.0.0.1:8001
    #[arg(short, long, value_name = "ADDR")]
    bind: Option<SocketAddr>,

    /// Keep history in memory instead of SQLite
    #[arg(long)]
    memory: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and database access, then exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(addr) = args.bind {
        config.api.host = addr.ip().to_string();
        config.api.port = addr.port();
    }

    logging::init_with_config(LogConfig {
        service_name: config.service.name.clone(),
        level: config.logging.level.clone(),
        log_dir: config.logging.dir.clone(),
        enable_file: config.logging.enable_file,
        enable_json: config.logging.enable_json,
    })?;

    match args.command {
        Some(Commands::Check) => check_config(&config, args.memory).await,
        None => run_service(config, args.memory).await,
    }
}

async fn open_store(config: &Config, memory: bool) -> Result<Arc<dyn HistoryStore>> {
    if memory {
        info!("History store: memory");
        return Ok(Arc::new(MemoryHistoryStore::new()));
    }

    let client = SqliteClient::connect(&config.database.url, config.database.max_connections)
        .await?;
    client
        .ping()
        .await
        .context("SQLite database is not reachable")?;
    let store = SqliteHistoryStore::new(client)
        .await
        .context("Failed to initialize history table")?;
    info!("History store: sqlite ({})", config.database.url);
    Ok(Arc::new(store))
}

async fn run_service(config: Config, memory: bool) -> Result<()> {
    info!("Starting {}", config.service.name);

    let store = open_store(&config, memory).await?;
    let bind_address = config.bind_address();
    let state = Arc::new(AppState::new(Arc::new(config), store));
    let app = create_routes(state);

    #[cfg(feature = "swagger-ui")]
    let app = {
        info!("Swagger UI at /docs");
        app.merge(SwaggerUi::new("/docs").url("/openapi.json", CalcsrvApiDoc::openapi()))
    };

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    info!("API server listening on http://{}", bind_address);
    info!("Health check: http://{}/api/health", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown())
        .await
        .context("Server error")?;

    info!("calcsrv stopped");
    Ok(())
}

async fn check_config(config: &Config, memory: bool) -> Result<()> {
    println!("=== calcsrv configuration ===\n");
    print!("{}", serde_yaml::to_string(config)?);
    println!();

    config.validate()?;
    println!("[OK] configuration valid");

    let store = open_store(config, memory).await?;
    store.query("__check__", 1).await?;
    println!("[OK] history store reachable ({})", store.backend());

    Ok(())
}
