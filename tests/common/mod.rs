#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use livematch_cms::{
    config::Config,
    database::Database,
    web::{create_router, AppState},
};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const TOKEN: &str = "test-token";

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.admin.token = TOKEN.to_string();
    config
}

pub async fn test_app_with(config: Config) -> Router {
    test_app_and_database(config).await.0
}

/// Router plus a handle on its database, for seeding rows the API cannot write
pub async fn test_app_and_database(config: Config) -> (Router, Database) {
    let database = Database::new_in_memory().await.unwrap();
    database.migrate().await.unwrap();
    let app = create_router(AppState::new(config, database.clone())).unwrap();
    (app, database)
}

pub async fn test_app() -> Router {
    test_app_with(test_config()).await
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        if self.body.is_empty() {
            json!({})
        } else {
            serde_json::from_slice(&self.body).unwrap()
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}

/// Authorized admin call returning status and JSON body
pub async fn admin(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let response = send(app, method, uri, Some(TOKEN), body).await;
    (response.status, response.json())
}

/// Create a row through the admin API and return its id
pub async fn create(app: &Router, uri: &str, body: Value) -> i64 {
    let (status, value) = admin(app, Method::POST, uri, Some(body)).await;
    assert_eq!(status, StatusCode::OK, "create {uri} failed: {value}");
    value["id"].as_i64().unwrap()
}
