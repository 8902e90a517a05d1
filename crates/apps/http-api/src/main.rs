use http_api::{build_router, config::Config, AppState};
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "http_api=debug,user_feature=debug,todo_feature=debug,tower_http=debug,sqlx=warn"
                .into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    if config.uses_dev_secret() {
        warn!("SESSION_SECRET is not set; using the development secret");
    }

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../migrations").run(&pool).await?;

    info!("Migrations complete");

    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let app = build_router(AppState::new(pool, &config));

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;

    info!("Listening on http://{}", config.listen_addr);
    info!(
        "Serving uploads from {} at {}",
        config.upload_dir.display(),
        config.media_url
    );

    axum::serve(listener, app).await?;

    Ok(())
}
