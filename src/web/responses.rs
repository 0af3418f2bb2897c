//! Response types shared by the handlers

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::obfuscation::TIMESTAMP_HEADER;

/// Result of a successful create
#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

/// Result of an update or delete
#[derive(Debug, Clone, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// Obfuscated public payload plus the salt needed to decode it
#[derive(Debug, Clone)]
pub struct Obfuscated {
    pub body: String,
    pub timestamp: String,
}

impl IntoResponse for Obfuscated {
    fn into_response(self) -> Response {
        let mut response = self.body.into_response();
        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        // Decimal digits only, always a valid header value
        if let Ok(value) = HeaderValue::from_str(&self.timestamp) {
            headers.insert(TIMESTAMP_HEADER, value);
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obfuscated_headers() {
        let response = Obfuscated {
            body: "AAEC".to_string(),
            timestamp: "1700000000".to_string(),
        }
        .into_response();

        assert_eq!(response.headers()["t"], "1700000000");
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
    }
}
