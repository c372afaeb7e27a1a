use axum::{
  extract::rejection::{JsonRejection, PathRejection},
  http::{Method, StatusCode},
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;

use crate::{domains::user::service::UserServiceError, storage::StoreError};

/// Message returned in place of backend failure details.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  InvalidInput,
  Unauthorized,
  NotFound,
  MethodNotAllowed,
  Conflict,
  Backend,
}

impl ErrorKind {
  pub fn status_code(self) -> StatusCode {
    match self {
      ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
      ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
      ErrorKind::NotFound => StatusCode::NOT_FOUND,
      ErrorKind::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
      ErrorKind::Conflict => StatusCode::CONFLICT,
      ErrorKind::Backend => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

/// Failure returned by every handler. Rendered as `{"error": message}` with
/// the status of its [`ErrorKind`].
#[derive(Debug)]
pub struct AppError {
  pub kind: ErrorKind,
  pub message: String,
}

impl AppError {
  pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
    Self {
      kind,
      message: message.into(),
    }
  }

  pub fn invalid_input(message: impl Into<String>) -> Self {
    Self::new(ErrorKind::InvalidInput, message)
  }

  pub fn unauthorized(message: impl Into<String>) -> Self {
    Self::new(ErrorKind::Unauthorized, message)
  }

  pub fn not_found(message: impl Into<String>) -> Self {
    Self::new(ErrorKind::NotFound, message)
  }

  pub fn method_not_allowed(method: &Method) -> Self {
    Self::new(ErrorKind::MethodNotAllowed, format!("method not allowed: {}", method))
  }

  pub fn conflict(message: impl Into<String>) -> Self {
    Self::new(ErrorKind::Conflict, message)
  }

  pub fn backend() -> Self {
    Self::new(ErrorKind::Backend, INTERNAL_ERROR_MESSAGE)
  }

  pub fn status_code(&self) -> StatusCode {
    self.kind.status_code()
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let body = Json(json!({ "error": self.message }));
    (self.status_code(), body).into_response()
  }
}

impl From<StoreError> for AppError {
  fn from(error: StoreError) -> Self {
    match error {
      StoreError::NotFound { .. } => AppError::not_found(error.to_string()),
      StoreError::Conflict(msg) => AppError::conflict(msg),
      StoreError::Timeout | StoreError::Database(_) => {
        tracing::error!(error = %error, "storage failure");
        AppError::backend()
      }
    }
  }
}

impl From<UserServiceError> for AppError {
  fn from(error: UserServiceError) -> Self {
    match error {
      UserServiceError::InvalidCredentials => AppError::unauthorized(error.to_string()),
      UserServiceError::PasswordTooLong => AppError::invalid_input(error.to_string()),
      UserServiceError::Store(e) => e.into(),
      UserServiceError::Hashing(_) | UserServiceError::Task(_) => {
        tracing::error!(error = %error, "password hashing failure");
        AppError::backend()
      }
    }
  }
}

impl From<JsonRejection> for AppError {
  fn from(rejection: JsonRejection) -> Self {
    tracing::debug!(error = %rejection, "rejected request body");
    AppError::invalid_input(rejection.body_text())
  }
}

impl From<PathRejection> for AppError {
  fn from(rejection: PathRejection) -> Self {
    match rejection {
      PathRejection::FailedToDeserializePathParams(_) => AppError::invalid_input("invalid id format"),
      other => {
        tracing::error!(error = %other, "path extraction failure");
        AppError::backend()
      }
    }
  }
}
