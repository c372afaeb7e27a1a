use std::future::{ready, Ready};

use axum::{
  http::{header, Method, Uri},
  response::{IntoResponse, Response},
  Router,
};
use tower_http::trace::TraceLayer;

use crate::{
  domains::{account::rest::account_routes, user::rest::user_routes},
  state::SharedAppState,
  AppError,
};

pub fn create_app(state: SharedAppState) -> Router {
  Router::new()
    .merge(account_routes())
    .merge(user_routes())
    .fallback(route_not_found)
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// Per-route fallback: 405 with `allow` listing the methods the route serves.
pub fn method_not_allowed(allow: &'static str) -> impl Fn(Method) -> Ready<Response> + Clone + Send + Sync + 'static {
  move |method: Method| ready(([(header::ALLOW, allow)], AppError::method_not_allowed(&method)).into_response())
}

async fn route_not_found(uri: Uri) -> AppError {
  AppError::not_found(format!("no route for {}", uri.path()))
}
