// server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;

/// Store settings are injected through this struct, never read from
/// globals; handlers receive it via `AppState`.
#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,

  pub store_name: String,
  pub currency: String,

  // Payment gateway credentials (key id is public, secret is not).
  pub payment_key_id: String,
  pub payment_key_secret: String,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL")?;

    let store_name = get_env("STORE_NAME").unwrap_or_else(|_| "Atelier".to_string());
    let currency = get_env("CURRENCY").unwrap_or_else(|_| "INR".to_string());

    let payment_key_id = get_env("PAYMENT_KEY_ID")?;
    let payment_key_secret = get_env("PAYMENT_KEY_SECRET")?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      database_url,
      store_name,
      currency,
      payment_key_id,
      payment_key_secret,
    })
  }
}
