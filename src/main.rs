use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use accounts_api::app::create_app;
use accounts_api::config::Config;
use accounts_api::state::SharedAppState;
use accounts_api::storage::SqliteStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenv().ok();

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")))
    .init();

  let config = Config::from_env()?;

  let store = SqliteStore::connect(&config.database_url, config.db_max_connections, config.db_timeout)
    .await
    .context("Failed to open database")?;
  store.init().await.context("Failed to create tables")?;

  tracing::info!(database_url = %config.database_url, "Database ready");

  let app_state = SharedAppState::new(Arc::new(store), config.bcrypt_cost);
  let app = create_app(app_state);

  let listener = tokio::net::TcpListener::bind(&config.listen_addr)
    .await
    .with_context(|| format!("Failed to bind {}", config.listen_addr))?;

  tracing::info!("JSON API server running on http://{}", config.listen_addr);

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(err) = signal::ctrl_c().await {
      tracing::error!(error = %err, "Failed to install Ctrl+C handler");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut stream) => {
        stream.recv().await;
      }
      Err(err) => {
        tracing::error!(error = %err, "Failed to install signal handler");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
      _ = ctrl_c => {},
      _ = terminate => {},
  }

  tracing::info!("Received termination signal, shutting down gracefully...");
}
