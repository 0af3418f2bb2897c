//! HTTP middleware
//!
//! Request logging, admin bearer-token authentication and per-client rate
//! limiting.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, Method, Uri},
    middleware::Next,
    response::Response,
};
use std::{net::SocketAddr, time::Instant};
use tracing::{info, warn};

use super::AppState;
use crate::errors::AppError;

/// Request logging middleware
///
/// Logs all incoming requests with timing information
pub async fn request_logging_middleware(
    method: Method,
    uri: Uri,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string();

    info!(
        method = %method,
        uri = %uri,
        request_id = %request_id,
        "HTTP request started"
    );

    let response = next.run(request).await;
    let status = response.status().as_u16();
    let duration = start.elapsed();

    if status >= 400 {
        warn!(
            method = %method,
            uri = %uri,
            status = status,
            request_id = %request_id,
            duration_ms = duration.as_millis(),
            "HTTP request completed with error"
        );
    } else {
        info!(
            method = %method,
            uri = %uri,
            status = status,
            request_id = %request_id,
            duration_ms = duration.as_millis(),
            "HTTP request completed"
        );
    }

    response
}

/// Reject admin requests whose `Authorization: Bearer` token does not match
/// the configured one. Runs before any extractor, so nothing is parsed or
/// persisted for unauthorized calls.
pub async fn require_admin_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match token {
        Some(token) if token == state.config.admin.token => Ok(next.run(request).await),
        _ => {
            warn!(uri = %request.uri(), "Rejected admin request without a valid token");
            Err(AppError::Unauthorized)
        }
    }
}

/// Apply the per-client request ceiling, keyed by the peer IP address
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    if let Err(retry_after_secs) = state.rate_limiter.check(&client) {
        warn!(
            client = %client,
            limit = state.rate_limiter.max_requests(),
            window_secs = state.config.rate_limit.window_secs,
            "Rate limit exceeded"
        );
        return Err(AppError::RateLimited { retry_after_secs });
    }

    Ok(next.run(request).await)
}
