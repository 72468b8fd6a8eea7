use axum::http::{header, HeaderValue, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::{info, warn, error};

use farm_api::{build_router, AppState};
use farm_core::repositories::FarmerRepository;
use farm_infrastructure::database::{connection, MemoryFarmerRepository, PgFarmerRepository};
use farm_shared::config::{AppConfig, CorsSettings, DatabaseSettings, StorageBackend};
use farm_shared::utils::redact_url;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize telemetry
    farm_shared::telemetry::init_telemetry(&config.log)?;

    info!("{} starting...", config.app.name);

    let farmer_repo = connect_storage(&config.database).await?;

    // Build router
    let app = build_router(AppState::new(farmer_repo))
        .layer(cors_layer(&config.cors))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        );

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Server running on http://{}", addr);
    if config.is_development() {
        info!("Running in development mode");
    }

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn connect_storage(settings: &DatabaseSettings) -> anyhow::Result<Arc<dyn FarmerRepository>> {
    match settings.backend {
        StorageBackend::Memory => {
            warn!("Using in-memory storage; records are lost on shutdown");
            Ok(Arc::new(MemoryFarmerRepository::new()))
        }
        StorageBackend::Postgres => {
            info!("Connecting to database at {}...", redact_url(&settings.url));
            let pool = connection::create_pool(settings).await.map_err(|e| {
                error!("Database connection failed: {}", e);
                e
            })?;
            if settings.run_migrations {
                connection::run_migrations(&pool).await?;
            }
            info!("Database connection established.");
            Ok(Arc::new(PgFarmerRepository::new(pool)))
        }
    }
}

fn cors_layer(settings: &CorsSettings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
