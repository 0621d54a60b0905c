use dotenvy::dotenv;
use inventory_api::{AppState, config::AppConfig, create_app};
use inventory_core::SqliteStore;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

// Binary entry point only; router, state and handlers live in lib.rs
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load environment (.env) if present
    dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Inventory API v{}...", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::from_env()?;
    if config.auth_mode == inventory_api::config::AuthMode::Legacy {
        warn!("AUTH_MODE=legacy: the Authorization header is trusted as a raw user id");
    }

    // Migrations are applied on connect
    let store = SqliteStore::connect(&config.database_url, config.max_connections).await?;
    info!("Connected to {}", config.database_url);

    let app = create_app(AppState::new(store, config.auth_mode));

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("Inventory API listening on {}", config.bind_addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
