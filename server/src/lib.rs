//! Gallery Backend
//!
//! Layered architecture:
//! - domain: Core entities and query normalization
//! - repository: Data access abstractions and the SQLite implementation
//! - api: HTTP handlers

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod repository;
pub mod seed;

use config::{AllowedOrigins, Config};
use repository::{init_db, CatalogRepository, DbState, ItemRepository, SqliteUserRepository, UserRepository};

/// Application state shared across handlers
pub struct AppState {
    pub items: Arc<dyn CatalogRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    /// SQLite-backed state over one shared connection
    pub fn new(db: DbState) -> Arc<Self> {
        Arc::new(Self {
            items: Arc::new(ItemRepository::new(db.clone())),
            users: Arc::new(SqliteUserRepository::new(db)),
        })
    }
}

fn cors_layer(origins: &AllowedOrigins) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    match origins {
        AllowedOrigins::Any => cors.allow_origin(Any),
        AllowedOrigins::List(list) => {
            let values: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| {
                    HeaderValue::from_str(origin)
                        .map_err(|e| warn!("Ignoring invalid origin {origin:?}: {e}"))
                        .ok()
                })
                .collect();
            cors.allow_origin(AllowOrigin::list(values))
        }
    }
}

/// Build the router
pub fn router(state: Arc<AppState>, origins: &AllowedOrigins) -> Router {
    Router::new()
        .route("/api/items", get(api::list_items))
        .route("/api/items/{id}", get(api::get_item))
        .route("/api/categories", get(api::list_categories))
        .route("/health", get(api::health))
        .route("/signup", post(api::signup))
        .route("/login", post(api::login))
        .layer(cors_layer(origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Open the database, seed it if empty and hand the connection to `db`.
///
/// Runs in the background so the listener is up before the store is;
/// requests arriving earlier get `503`.
async fn prepare_store(db: DbState, config: Config) {
    info!("Background: starting DB initialization");

    let initialized = match init_db(&config.db_path, config.store_timeout).await {
        Ok(initialized) => initialized,
        Err(e) => {
            error!("Background: DB init failed: {e}");
            return;
        }
    };

    if let Err(e) = seed::seed_if_empty(&ItemRepository::new(initialized.clone()), config.seed_count).await {
        error!("Background: seeding failed: {e}");
    }

    match db.adopt(initialized) {
        Ok(()) => info!("Background: DB initialized successfully"),
        Err(e) => error!("Background: could not install connection: {e}"),
    }
}

pub async fn start_server() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gallery_server=info,tower_http=info")),
        )
        .init();

    let config = Config::load();

    info!("Initializing state...");
    let db = DbState::new(config.store_timeout);
    let state = AppState::new(db.clone());
    tokio::spawn(prepare_store(db, config.clone()));

    let app = router(state, &config.allowed_origins);

    let address = config.address();
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
