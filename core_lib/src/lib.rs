//! Core library containing route handlers and storage for the file server.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod monitoring;
pub mod storage;

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use handlers::routes::create_routes;
pub use middleware::cors::cors_layer_from_config;
pub use monitoring::{DiskProbe, DiskUsageSnapshot};
pub use storage::FileStore;

use axum::{middleware as axum_middleware, Router};
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub config: AppConfig,
    pub store: FileStore,
    pub disk_probe: DiskProbe,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let store = FileStore::new(&config.storage.root);
        let disk_probe = DiskProbe::new(&config.storage.root);

        Self {
            app_name: "File Server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            config,
            store,
            disk_probe,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

pub fn create_app(state: AppState) -> Router {
    let mut router = Router::new().merge(create_routes(&state.config));

    router = router.layer(axum_middleware::from_fn_with_state(
        state.clone(),
        middleware::auth::require_bearer_token,
    ));

    // The CORS layer sits outside the token check, so OPTIONS preflight is
    // answered without credentials.
    if state.config.cors.enabled {
        router = router.layer(middleware::cors::cors_layer_from_config(&state.config.cors));
    }

    router = router.layer(middleware::logging::logging_layer());

    router.with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
