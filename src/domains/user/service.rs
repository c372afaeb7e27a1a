use std::sync::Arc;

use chrono::Utc;
use tokio::sync::OnceCell;

use super::model::{CreateUserRequest, User, UserLoginRequest};
use crate::{
  storage::{Storage, StoreError},
  utils::{hash_password, verify_password, MAX_PASSWORD_BYTES},
};

const DUMMY_PASSWORD: &str = "no user has this password";

#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
  /// Unknown username and wrong password share this variant.
  #[error("invalid username or password")]
  InvalidCredentials,
  #[error("password must be at most {MAX_PASSWORD_BYTES} bytes")]
  PasswordTooLong,
  #[error("password hashing failed: {0}")]
  Hashing(#[from] bcrypt::BcryptError),
  #[error("password hashing task failed: {0}")]
  Task(#[from] tokio::task::JoinError),
  #[error(transparent)]
  Store(#[from] StoreError),
}

pub struct UserService {
  store: Arc<dyn Storage>,
  bcrypt_cost: u32,
  // Verified against when the username is unknown, so both failures cost one bcrypt run.
  dummy_hash: OnceCell<String>,
}

impl UserService {
  pub fn new(store: Arc<dyn Storage>, bcrypt_cost: u32) -> Self {
    Self {
      store,
      bcrypt_cost,
      dummy_hash: OnceCell::new(),
    }
  }

  pub async fn register(&self, req: CreateUserRequest) -> Result<User, UserServiceError> {
    let CreateUserRequest {
      username,
      email,
      password,
    } = req;

    if password.len() > MAX_PASSWORD_BYTES {
      return Err(UserServiceError::PasswordTooLong);
    }

    let cost = self.bcrypt_cost;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, cost)).await??;

    let mut user = User {
      id: 0,
      username,
      email,
      password_hash,
      created_at: Utc::now(),
    };
    user.id = self.store.register_user(&user).await?;

    tracing::info!(user_id = user.id, username = %user.username, "user registered");
    Ok(user)
  }

  pub async fn login(&self, req: UserLoginRequest) -> Result<(), UserServiceError> {
    let UserLoginRequest { username, password } = req;

    let stored = self.store.select_user_password(&username).await?;
    let known = stored.is_some();
    let hash = match stored {
      Some(hash) => hash,
      None => self.dummy_hash().await?.to_owned(),
    };

    let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await?;
    if !(known && matches) {
      tracing::info!(username = %username, "login rejected");
      return Err(UserServiceError::InvalidCredentials);
    }

    tracing::info!(username = %username, "login succeeded");
    Ok(())
  }

  async fn dummy_hash(&self) -> Result<&str, UserServiceError> {
    let cost = self.bcrypt_cost;
    let hash = self
      .dummy_hash
      .get_or_try_init(|| async move {
        Ok::<_, UserServiceError>(tokio::task::spawn_blocking(move || hash_password(DUMMY_PASSWORD, cost)).await??)
      })
      .await?;
    Ok(hash)
  }
}
