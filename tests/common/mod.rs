use std::{sync::Arc, time::Duration};

use accounts_api::{app::create_app, state::SharedAppState, storage::SqliteStore};
use axum::{
  body::{Body, Bytes},
  http::{Method, Request, StatusCode},
  Router,
};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

pub async fn test_app() -> Router {
  let pool = SqlitePoolOptions::new()
    .max_connections(1)
    .idle_timeout(None)
    .max_lifetime(None)
    .connect("sqlite::memory:")
    .await
    .unwrap();
  let store = SqliteStore::new(pool, Duration::from_secs(5));
  store.init().await.unwrap();

  create_app(SharedAppState::new(Arc::new(store), 4))
}

pub async fn call(app: &Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> (StatusCode, Bytes) {
  let builder = Request::builder().method(method).uri(uri);
  let request = match body {
    Some(json) => builder
      .header("content-type", "application/json")
      .body(Body::from(serde_json::to_vec(&json).unwrap())),
    None => builder.body(Body::empty()),
  }
  .unwrap();

  let response = app.clone().oneshot(request).await.unwrap();
  let status = response.status();
  let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
  (status, body)
}

pub fn json(body: &[u8]) -> serde_json::Value {
  serde_json::from_slice(body).unwrap()
}
