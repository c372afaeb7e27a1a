use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id: i64,
  pub username: String,
  pub email: String,
  /// bcrypt hash. Never serialized into responses.
  #[serde(skip_serializing, default)]
  pub password_hash: String,
  pub created_at: DateTime<Utc>,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct CreateUserRequest {
  pub username: String,
  pub email: String,
  pub password: String,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct UserLoginRequest {
  pub username: String,
  pub password: String,
}

impl fmt::Debug for CreateUserRequest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CreateUserRequest")
      .field("username", &self.username)
      .field("email", &self.email)
      .field("password", &"<redacted>")
      .finish()
  }
}

impl fmt::Debug for UserLoginRequest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("UserLoginRequest")
      .field("username", &self.username)
      .field("password", &"<redacted>")
      .finish()
  }
}
