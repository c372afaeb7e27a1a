use std::{env, str::FromStr, time::Duration};

use anyhow::{bail, Context, Result};

use crate::utils::{MAX_BCRYPT_COST, MIN_BCRYPT_COST};

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://local.db?mode=rwc";
const DEFAULT_DB_TIMEOUT_SECS: u64 = 5;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
  pub listen_addr: String,
  pub database_url: String,
  pub bcrypt_cost: u32,
  /// Upper bound for a single database call.
  pub db_timeout: Duration,
  pub db_max_connections: u32,
}

impl Config {
  pub fn from_env() -> Result<Self> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let listen_addr = lookup("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
    let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

    let bcrypt_cost = parse_or(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?;
    if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&bcrypt_cost) {
      bail!(
        "BCRYPT_COST must be between {} and {}, got {}",
        MIN_BCRYPT_COST,
        MAX_BCRYPT_COST,
        bcrypt_cost
      );
    }

    let db_timeout_secs: u64 = parse_or(&lookup, "DB_TIMEOUT_SECS", DEFAULT_DB_TIMEOUT_SECS)?;
    if db_timeout_secs == 0 {
      bail!("DB_TIMEOUT_SECS must be greater than 0");
    }

    let db_max_connections: u32 = parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?;
    if db_max_connections == 0 {
      bail!("DB_MAX_CONNECTIONS must be greater than 0");
    }

    Ok(Self {
      listen_addr,
      database_url,
      bcrypt_cost,
      db_timeout: Duration::from_secs(db_timeout_secs),
      db_max_connections,
    })
  }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
  T: FromStr,
  T::Err: std::error::Error + Send + Sync + 'static,
{
  match lookup(key) {
    Some(raw) => raw
      .trim()
      .parse()
      .with_context(|| format!("{} must be a number, got {:?}", key, raw)),
    None => Ok(default),
  }
}
