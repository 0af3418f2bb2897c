//! Web layer
//!
//! Three route groups share one router:
//! - `/admin/*`: bearer-token gated CRUD used by the admin panel
//! - `/api/*`: public read endpoints returning obfuscated payloads
//! - `/`, `/static/*`, `/health`: the embedded admin panel and a health probe
//!
//! Every route sits behind the per-client rate limiter, CORS and request
//! logging layers.

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue},
    middleware::from_fn_with_state,
    routing::{get, put},
    Router,
};
use serde::Serialize;
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{AllowHeaders, Any, CorsLayer};
use tracing::info;

use crate::{
    config::Config,
    database::Database,
    errors::AppResult,
    obfuscation::{current_timestamp, Obfuscator, TIMESTAMP_HEADER},
};

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod rate_limit;
pub mod responses;

pub use rate_limit::ClientRateLimiter;
pub use responses::{CreatedResponse, Obfuscated, OkResponse};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub config: Arc<Config>,
    pub obfuscator: Obfuscator,
    pub rate_limiter: ClientRateLimiter,
}

impl AppState {
    pub fn new(config: Config, database: Database) -> Self {
        Self {
            obfuscator: Obfuscator::new(config.obfuscation.key_base.clone()),
            rate_limiter: ClientRateLimiter::new(&config.rate_limit),
            config: Arc::new(config),
            database,
        }
    }

    /// Obfuscate `payload` with a key salted by the current second
    pub fn obfuscate<T: Serialize>(&self, payload: &T) -> AppResult<Obfuscated> {
        let timestamp = current_timestamp();
        let body = self.obfuscator.encode(payload, &timestamp)?;
        Ok(Obfuscated { body, timestamp })
    }
}

/// Build the complete application router
pub fn create_router(state: AppState) -> Result<Router> {
    let cors = cors_layer(&state.config.web.cors_origin)?;

    Ok(Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/admin", admin_routes(state.clone()))
        .nest("/api", public_routes())
        // Admin panel
        .route("/", get(handlers::static_assets::index))
        .route("/static/*path", get(handlers::static_assets::serve_static_asset))
        // Middleware (applied in reverse order)
        .layer(DefaultBodyLimit::max(state.config.web.max_body_bytes))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::rate_limit_middleware,
        ))
        .layer(cors)
        .layer(axum::middleware::from_fn(
            middleware::request_logging_middleware,
        ))
        .with_state(state))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    use handlers::{categories, channels, events, streams};

    // Path parameters share one name per segment position so the router
    // accepts both `/categories/:id` and `/categories/:id/channels`.
    Router::new()
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/:id",
            put(categories::update_category).delete(categories::delete_category),
        )
        .route(
            "/categories/:id/channels",
            get(channels::list_channels).post(channels::create_channel),
        )
        .route(
            "/channels/:id",
            put(channels::update_channel).delete(channels::delete_channel),
        )
        .route(
            "/channels/:id/streams",
            get(streams::list_channel_streams).post(streams::create_channel_stream),
        )
        .route(
            "/streams/:id",
            put(streams::update_channel_stream).delete(streams::delete_channel_stream),
        )
        .route(
            "/events",
            get(events::list_events).post(events::create_event),
        )
        .route(
            "/events/:id",
            put(events::update_event).delete(events::delete_event),
        )
        .route(
            "/events/:id/streams",
            get(streams::list_event_streams).post(streams::create_event_stream),
        )
        .route(
            "/event-streams/:id",
            put(streams::update_event_stream).delete(streams::delete_event_stream),
        )
        .route_layer(from_fn_with_state(state, middleware::require_admin_token))
}

fn public_routes() -> Router<AppState> {
    use handlers::public;

    Router::new()
        .route("/categories", get(public::categories))
        .route("/categories/:id/channels", get(public::category_channels))
        .route("/channel/:id", get(public::channel_streams))
        .route("/events", get(public::events))
        .route("/event/:id", get(public::event_streams))
}

fn cors_layer(origin: &str) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods(Any)
        // A literal `*` never covers `Authorization` in preflights
        .allow_headers(AllowHeaders::mirror_request())
        // Browser clients need the salt header to decode public responses
        .expose_headers([HeaderName::from_static(TIMESTAMP_HEADER)]);

    if origin == "*" {
        Ok(layer.allow_origin(Any))
    } else {
        let origin: HeaderValue = origin
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", origin, e))?;
        Ok(layer.allow_origin(origin))
    }
}

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: Config, database: Database) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;
        let app = create_router(AppState::new(config, database))?;
        Ok(Self { app, addr })
    }

    /// Start the web server, returning after a shutdown signal
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        info!("Listening on {}", listener.local_addr()?);

        axum::serve(
            listener,
            self.app
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;

        info!("Server stopped");
        Ok(())
    }

    /// Get the host address
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Get the port number
    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    info!("Shutdown signal received");
}
