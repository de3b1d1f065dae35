use std::sync::Arc;

use tower_http::services::ServeDir;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blog_desk::admin::{self, AppState};
use blog_desk::config::Config;
use blog_desk::db::Database;
use blog_desk::fetch::MetadataFetcher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog_desk=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load("desk.toml")?;

    // Initialize database
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite:blog_desk.db?mode=rwc".to_string());
    let db = Database::new(&database_url).await?;
    db.initialize().await?;
    info!("Database initialized");

    std::fs::create_dir_all(&config.media_dir)?;

    // Create app state
    let state = Arc::new(AppState {
        db: Arc::new(db),
        fetcher: Arc::new(MetadataFetcher::new(&config.fetch)),
        media_dir: config.media_dir.clone().into(),
        page_size: config.page_size,
    });

    // Build router
    let app = admin::router(state).nest_service("/static", ServeDir::new("static"));

    // Start server
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    info!("Admin desk starting on http://localhost:3000");

    axum::serve(listener, app).await?;

    Ok(())
}
