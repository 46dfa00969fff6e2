use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stockroom_api::audit::create_audit_logger;
use stockroom_api::rest::{AppState, create_app};
use stockroom_api::SqliteStore;

#[derive(Parser)]
#[command(name = "stockroom-api")]
#[command(about = "Stockroom API Server - product inventory over JSON/HTTP")]
struct Args {
    /// Listen address for the REST API and the web page
    #[arg(short, long, default_value = "0.0.0.0:3000")]
    listen: String,

    /// SQLite database file (created if missing)
    #[arg(short, long, default_value = "products.db")]
    database: PathBuf,

    /// Directory served at / (index.html, app.js)
    #[arg(long, default_value = "public")]
    public_dir: PathBuf,

    /// Run in development mode (in-memory database, no audit log)
    #[arg(long)]
    dev: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("stockroom_api=info".parse()?),
        )
        .init();

    let args = Args::parse();

    // Open the database once; it is closed after the server drains
    let store = if args.dev {
        info!("Using in-memory database (dev mode)");
        Arc::new(SqliteStore::open_in_memory().await?)
    } else {
        info!("Opening database {}", args.database.display());
        Arc::new(SqliteStore::open(&args.database).await?)
    };

    let app_state = Arc::new(AppState {
        store: store.clone(),
        audit: create_audit_logger(!args.dev),
    });

    let router = create_app(app_state, &args.public_dir);

    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    info!(
        "REST API listening on http://{} (static files from {})",
        listener.local_addr()?,
        args.public_dir.display()
    );

    let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;

    // Run server with graceful shutdown
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = signal::ctrl_c() => info!("Received SIGINT"),
                _ = sigterm.recv() => info!("Received SIGTERM"),
            }
        })
        .await?;

    info!("Closing database...");
    store.close().await;

    info!("Shutdown complete");
    Ok(())
}
