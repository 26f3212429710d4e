use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use todos_server::config::Config;
use todos_server::storage::Store;
use todos_server::{api, AppState};

#[derive(Parser)]
#[command(name = "todos-server", about = "Server-rendered to-do list")]
struct Cli {
    /// Port to bind, overriding BIND_ADDR
    #[arg(long)]
    port: Option<u16>,

    /// Database file path, overriding DATABASE_PATH
    #[arg(long)]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(port) = cli.port {
        config.bind_addr = format!("0.0.0.0:{port}");
    }
    if let Some(database) = cli.database {
        config.database_path = database;
    }

    let store = Store::open(&config.database_path)?;
    let addr = config.bind_addr.clone();
    let app = api::create_router(AppState::new(store, config));

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
