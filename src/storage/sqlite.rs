use std::{future::Future, str::FromStr, time::Duration};

use async_trait::async_trait;
use sqlx::{
  sqlite::{SqliteConnectOptions, SqlitePoolOptions},
  SqlitePool,
};

use super::{Storage, StoreError};
use crate::domains::{
  account::model::{Account, UpdateAccountRequest},
  user::model::User,
};

const CREATE_ACCOUNT_TABLE: &str = r#"
  CREATE TABLE IF NOT EXISTS account (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    number TEXT NOT NULL UNIQUE,
    balance INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
  )
"#;

const CREATE_USER_TABLE: &str = r#"
  CREATE TABLE IF NOT EXISTS "user" (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL,
    password TEXT NOT NULL,
    created_at TEXT NOT NULL
  )
"#;

const ACCOUNT_COLUMNS: &str = "id, first_name, last_name, number, balance, created_at";

#[derive(Clone)]
pub struct SqliteStore {
  pool: SqlitePool,
  timeout: Duration,
}

impl SqliteStore {
  pub fn new(pool: SqlitePool, timeout: Duration) -> Self {
    Self { pool, timeout }
  }

  pub async fn connect(database_url: &str, max_connections: u32, timeout: Duration) -> Result<Self, StoreError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
      .max_connections(max_connections)
      .acquire_timeout(timeout)
      .connect_with(options)
      .await?;

    Ok(Self::new(pool, timeout))
  }

  /// Creates the `account` and `user` tables if they do not exist yet.
  pub async fn init(&self) -> Result<(), StoreError> {
    self
      .bounded(async {
        sqlx::query(CREATE_ACCOUNT_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_USER_TABLE).execute(&self.pool).await?;
        Ok::<_, StoreError>(())
      })
      .await
  }

  async fn bounded<T, F>(&self, query: F) -> Result<T, StoreError>
  where
    F: Future<Output = Result<T, StoreError>>,
  {
    match tokio::time::timeout(self.timeout, query).await {
      Ok(result) => result,
      Err(_) => {
        tracing::warn!(timeout_ms = self.timeout.as_millis() as u64, "database call timed out");
        Err(StoreError::Timeout)
      }
    }
  }
}

fn conflict_on_unique(err: sqlx::Error, message: impl FnOnce() -> String) -> StoreError {
  match err {
    sqlx::Error::Database(db_err) if db_err.is_unique_violation() => StoreError::Conflict(message()),
    e => StoreError::Database(e),
  }
}

#[async_trait]
impl Storage for SqliteStore {
  async fn create_account(&self, account: &Account) -> Result<i64, StoreError> {
    let result = self
      .bounded(async {
        sqlx::query(
          r#"
            INSERT INTO account (first_name, last_name, number, balance, created_at)
            VALUES (?, ?, ?, ?, ?)
          "#,
        )
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.number)
        .bind(account.balance)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, || format!("account number '{}' already exists", account.number)))
      })
      .await?;

    Ok(result.last_insert_rowid())
  }

  async fn delete_account(&self, id: i64) -> Result<(), StoreError> {
    let result = self
      .bounded(async {
        Ok::<_, StoreError>(
          sqlx::query("DELETE FROM account WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?,
        )
      })
      .await?;

    if result.rows_affected() == 0 {
      return Err(StoreError::NotFound { entity: "account", id });
    }
    Ok(())
  }

  async fn update_account(&self, id: i64, changes: &UpdateAccountRequest) -> Result<(), StoreError> {
    let result = self
      .bounded(async {
        sqlx::query(
          r#"
            UPDATE account
            SET first_name = ?, last_name = ?, number = ?, balance = ?
            WHERE id = ?
          "#,
        )
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.number)
        .bind(changes.balance)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, || format!("account number '{}' already exists", changes.number)))
      })
      .await?;

    if result.rows_affected() == 0 {
      return Err(StoreError::NotFound { entity: "account", id });
    }
    Ok(())
  }

  async fn get_account_by_id(&self, id: i64) -> Result<Option<Account>, StoreError> {
    let query = format!("SELECT {ACCOUNT_COLUMNS} FROM account WHERE id = ?");
    self
      .bounded(async {
        Ok::<_, StoreError>(
          sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?,
        )
      })
      .await
  }

  async fn get_all_accounts(&self) -> Result<Vec<Account>, StoreError> {
    let query = format!("SELECT {ACCOUNT_COLUMNS} FROM account");
    self
      .bounded(async { Ok::<_, StoreError>(sqlx::query_as::<_, Account>(&query).fetch_all(&self.pool).await?) })
      .await
  }

  async fn register_user(&self, user: &User) -> Result<i64, StoreError> {
    let result = self
      .bounded(async {
        sqlx::query(
          r#"
            INSERT INTO "user" (username, email, password, created_at)
            VALUES (?, ?, ?, ?)
          "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, || format!("username '{}' already exists", user.username)))
      })
      .await?;

    Ok(result.last_insert_rowid())
  }

  async fn select_user_password(&self, username: &str) -> Result<Option<String>, StoreError> {
    self
      .bounded(async {
        Ok::<_, StoreError>(
          sqlx::query_scalar::<_, String>(r#"SELECT password FROM "user" WHERE username = ?"#)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?,
        )
      })
      .await
  }
}
