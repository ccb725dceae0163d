mod app;
mod config;
mod error;
mod generation;
mod models;
mod routes;
mod storage;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::AppState;
use config::load_settings_from_path;
use generation::gemini::GeminiGenerator;
use storage::local::LocalStorage;
use storage::s3::S3Storage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting blippi-api server...");

    // Load configuration.
    let settings = load_settings_from_path("blippi.toml")?;
    info!(
        "Configuration loaded: host={}, port={}, storage={}",
        settings.host, settings.port, settings.storage_provider
    );

    // Initialize storage.
    let storage: Arc<dyn storage::Storage> = match settings.storage_provider.as_str() {
        "aws-s3" => {
            let s3 = S3Storage::new(
                settings.aws_access_key.as_deref().unwrap_or(""),
                settings.aws_secret_access_key.as_deref().unwrap_or(""),
                settings.aws_region.as_deref().unwrap_or("us-east-1"),
                settings.s3_bucket.as_deref().unwrap_or("printease"),
            );
            Arc::new(s3)
        }
        _ => Arc::new(LocalStorage::new(&settings.storage_path)),
    };
    info!("Storage initialized: {}", storage.provider_name());

    // Initialize the text generator when an API key is configured.
    let generator: Option<Arc<dyn generation::TextGenerator>> = match &settings.gemini_api_key {
        Some(key) => {
            let gemini = GeminiGenerator::new(
                &settings.generation_model,
                key,
                Duration::from_secs(settings.generation_timeout_secs),
            )?;
            info!("Text generator initialized: {}", settings.generation_model);
            Some(Arc::new(gemini))
        }
        None => {
            info!("GEMINI_API_KEY not set; generation routes will answer 404");
            None
        }
    };

    // Build application state.
    let state = Arc::new(AppState {
        settings: settings.clone(),
        storage,
        generator,
    });

    // Build router.
    let app = routes::build_router(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    // Start server.
    let addr: SocketAddr = format!("{}:{}", settings.host, settings.port).parse()?;
    info!("Listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
