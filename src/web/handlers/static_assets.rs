//! Embedded admin panel

use axum::{
    body::Body,
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::assets::StaticAssets;

pub async fn index() -> Response {
    serve_embedded_asset("static/index.html")
}

pub async fn serve_static_asset(Path(path): Path<String>) -> Response {
    serve_embedded_asset(&format!("static/{}", path))
}

fn serve_embedded_asset(path: &str) -> Response {
    match StaticAssets::get_asset(path) {
        Some(asset) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, StaticAssets::get_content_type(path)),
                (header::CACHE_CONTROL, "no-cache"),
            ],
            Body::from(asset.data.into_owned()),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "Asset not found").into_response(),
    }
}
