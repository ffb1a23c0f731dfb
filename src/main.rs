use anyhow::Context;
use investor_commitments::{config::Config, create_app, db, jobs, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present) so DATABASE_URL from file is visible
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;

    let db_conn = db::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;
    db::migrate(&db_conn)
        .await
        .context("failed to create database schema")?;

    // Seed before accepting traffic; a failed load must keep the server down
    jobs::load_initial_data(&db_conn, &config.data_path)
        .await
        .with_context(|| {
            format!("failed to load initial data from {}", config.data_path.display())
        })?;

    let app = create_app(AppState::new(db_conn));
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("Server running on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
