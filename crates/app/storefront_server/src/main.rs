//! Storefront API server binary.

use std::sync::Arc;

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::RwLock;
use tracing::info;

use storefront_api::config::ApiConfig;
use storefront_core::auth::sessions::PgSessionStore;
use storefront_core::catalog::cache::FeaturedCache;
use storefront_core::db::LocalDbManager;

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "storefront_server", about = "Storefront API server")]
struct Args {
    /// Port to listen on (0 = ephemeral).
    #[arg(long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/storefront"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Spawn and manage a local PostgreSQL instance instead of
    /// connecting to `--database-url`. Intended for development.
    #[arg(long, default_value_t = false)]
    local_db: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,storefront_api=debug,storefront_core=debug"
                    .parse()
                    .unwrap()
            }),
        )
        .init();

    let args = Args::parse();

    // Missing token secrets abort startup here, before any listener binds.
    let config = ApiConfig::from_env()?;

    let mut local_db = None;
    let database_url = if args.local_db {
        let mut mgr = LocalDbManager::with_default_data_dir().await?;
        mgr.setup().await?;
        mgr.start().await?;
        let url = mgr.connection_url();
        local_db = Some(mgr);
        url
    } else {
        args.database_url.clone()
    };

    info!(database_url = %database_url, port = args.port, "starting storefront_server");

    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&database_url)
        .await?;

    // Run database migrations.
    info!("running database migrations");
    storefront_api::migrate(&pool).await?;

    let state = storefront_api::AppState {
        sessions: Arc::new(PgSessionStore::new(pool.clone())),
        featured_cache: Arc::new(RwLock::new(FeaturedCache::new())),
        pool,
        config,
    };

    let app = storefront_api::router(state);

    let bind_addr = format!("127.0.0.1:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    let local_addr = listener.local_addr()?;

    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(mut mgr) = local_db {
        mgr.stop().await?;
    }

    Ok(())
}

/// Resolves when the process receives Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
