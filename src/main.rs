use std::sync::Arc;

use anyhow::Context;
use axum::http::{header::{ACCEPT, CONTENT_TYPE}, HeaderValue, Method};
use dotenv::dotenv;
use realty_estate::{
    config::{Config, StorageBackend},
    db::{seed, DBClient, MemStorage, Storage},
    routes::create_router,
    AppState,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::filter::LevelFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .init();

    dotenv().ok();

    let config = Config::init()?;

    let db_client: Arc<dyn Storage> = match config.storage_backend {
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set when STORAGE_BACKEND is postgres")?;

            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(database_url)
                .await
                .context("Failed to connect to the database")?;
            tracing::info!("Connection to the database is successful");

            let db_client = DBClient::new(pool);
            if config.seed_sample_data {
                let seeded = seed::populate_if_empty(&db_client)
                    .await
                    .context("Failed to populate sample data")?;
                if seeded {
                    tracing::info!("Sample data written to an empty database");
                }
            }
            Arc::new(db_client)
        }
        StorageBackend::Memory => {
            let storage = if config.seed_sample_data {
                MemStorage::with_sample_data()
                    .await
                    .context("Failed to seed the in-memory store")?
            } else {
                MemStorage::new()
            };
            tracing::warn!("Using the in-memory store; data is lost on restart");
            Arc::new(storage)
        }
    };

    let allowed_origins = config
        .allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .context("ALLOWED_ORIGINS contains an invalid origin")?;

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE]);

    let app_state = AppState {
        env: config.clone(),
        db_client,
    };

    let app = create_router(Arc::new(app_state)).layer(cors);

    tracing::info!(
        "Server is running on http://localhost:{} ({} storage)",
        config.port,
        config.storage_backend.to_str()
    );

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", &config.port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.port))?;

    axum::serve(listener, app).await?;

    Ok(())
}
