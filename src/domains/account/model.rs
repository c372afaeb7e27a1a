use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// `id` stays 0 until the store assigns one.
#[derive(Debug, Clone, PartialEq, FromRow, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
  pub id: i64,
  pub first_name: String,
  pub last_name: String,
  pub number: String,
  pub balance: i64,
  pub created_at: DateTime<Utc>,
}

impl Account {
  pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
    Self {
      id: 0,
      first_name: first_name.into(),
      last_name: last_name.into(),
      number: Uuid::new_v4().to_string(),
      balance: 0,
      created_at: Utc::now(),
    }
  }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
  pub first_name: String,
  pub last_name: String,
}

/// Any `id` or `createdAt` in the body is ignored; the path id decides which
/// row changes. A missing `balance` means 0.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
  pub first_name: String,
  pub last_name: String,
  pub number: String,
  #[serde(default)]
  pub balance: i64,
}
