//! biztime server: reads settings, ensures the database and tables exist, serves the API.

use biztime::{app, ensure_database_exists, ensure_tables, AppState, Settings};
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("biztime=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    ensure_database_exists(&settings.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&settings.database_url)
        .await?;

    ensure_tables(&pool).await?;

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!(
        environment = ?settings.environment,
        "listening on {}",
        listener.local_addr()?
    );
    let state = AppState::new(pool, settings);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
