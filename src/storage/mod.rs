//! Persistence contract for accounts and users.

use async_trait::async_trait;

use crate::domains::{
  account::model::{Account, UpdateAccountRequest},
  user::model::User,
};

pub mod sqlite;

pub use sqlite::SqliteStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("{entity} {id} not found")]
  NotFound { entity: &'static str, id: i64 },
  #[error("{0}")]
  Conflict(String),
  #[error("database call timed out")]
  Timeout,
  #[error("database error: {0}")]
  Database(#[from] sqlx::Error),
}

/// Lookups report an absent row as `Ok(None)`. Mutations on a missing
/// account id fail with [`StoreError::NotFound`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Storage: Send + Sync {
  async fn create_account(&self, account: &Account) -> Result<i64, StoreError>;
  async fn delete_account(&self, id: i64) -> Result<(), StoreError>;
  /// Overwrites name, number and balance. `id` and `created_at` never change.
  async fn update_account(&self, id: i64, changes: &UpdateAccountRequest) -> Result<(), StoreError>;
  async fn get_account_by_id(&self, id: i64) -> Result<Option<Account>, StoreError>;
  async fn get_all_accounts(&self) -> Result<Vec<Account>, StoreError>;
  async fn register_user(&self, user: &User) -> Result<i64, StoreError>;
  async fn select_user_password(&self, username: &str) -> Result<Option<String>, StoreError>;
}
