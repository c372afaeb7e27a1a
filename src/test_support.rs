use std::{sync::Arc, time::Duration};

use axum::{
  body::{Body, Bytes},
  http::{HeaderMap, Method, Request, StatusCode},
  Router,
};
use serde::Serialize;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use crate::{
  app::create_app,
  state::SharedAppState,
  storage::{SqliteStore, Storage},
  utils::MIN_BCRYPT_COST,
};

/// Fresh in-memory database with both tables. One connection, kept open, so
/// every query sees the same database.
pub async fn memory_store() -> SqliteStore {
  let pool = SqlitePoolOptions::new()
    .max_connections(1)
    .idle_timeout(None)
    .max_lifetime(None)
    .connect("sqlite::memory:")
    .await
    .expect("open in-memory database");
  let store = SqliteStore::new(pool, Duration::from_secs(5));
  store.init().await.expect("create tables");
  store
}

pub fn app_with_store(store: impl Storage + 'static) -> Router {
  let state = SharedAppState::new(Arc::new(store), MIN_BCRYPT_COST);
  create_app(state)
}

pub async fn app_with_memory_store() -> Router {
  app_with_store(memory_store().await)
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Vec<u8>>) -> (StatusCode, Bytes) {
  let (status, _, body) = send_with_headers(app, method, uri, body).await;
  (status, body)
}

pub async fn send_with_headers(
  app: Router,
  method: Method,
  uri: &str,
  body: Option<Vec<u8>>,
) -> (StatusCode, HeaderMap, Bytes) {
  let builder = Request::builder().method(method).uri(uri);
  let request = match body {
    Some(bytes) => builder
      .header("content-type", "application/json")
      .body(Body::from(bytes)),
    None => builder.body(Body::empty()),
  }
  .expect("build request");

  let response = app.oneshot(request).await.expect("handle request");
  let status = response.status();
  let headers = response.headers().clone();
  let body = axum::body::to_bytes(response.into_body(), usize::MAX)
    .await
    .expect("read response body");
  (status, headers, body)
}

pub async fn post_json<T: Serialize>(app: Router, uri: &str, body: &T) -> (StatusCode, Bytes) {
  let bytes = serde_json::to_vec(body).expect("serialize request body");
  send(app, Method::POST, uri, Some(bytes)).await
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Bytes) {
  send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> (StatusCode, Bytes) {
  send(app, Method::DELETE, uri, None).await
}

/// The `error` field of a JSON error envelope.
pub fn error_message(body: &[u8]) -> String {
  let value: serde_json::Value = serde_json::from_slice(body).expect("deserialize error body");
  value["error"].as_str().expect("error field").to_string()
}
