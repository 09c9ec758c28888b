// server/src/main.rs

mod config;
mod errors;
mod models;
mod services;
mod state;
mod store;
mod web;

use crate::config::AppConfig;
use crate::services::{HmacGateway, PgCatalog, PgPromotions};
use crate::state::AppState;
use crate::store::PgOrderStore;

use actix_web::{web as actix_data, App, HttpServer};
use reconcile::Reconciler;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting storefront order server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      panic!("Configuration error: {}", e);
    }
  };

  let db_pool = match PgPool::connect(&app_config.database_url).await {
    Ok(pool) => {
      tracing::info!("Successfully connected to the database.");
      pool
    }
    Err(e) => {
      tracing::error!(error = %e, "Failed to connect to the database.");
      panic!("Database connection error: {}", e);
    }
  };

  // Wire the engine with its Postgres-backed collaborators.
  let reconciler = Arc::new(Reconciler::new(
    Arc::new(PgCatalog::new(db_pool.clone())),
    Arc::new(PgPromotions::new(db_pool.clone())),
    Arc::new(HmacGateway::new(
      app_config.payment_key_id.clone(),
      app_config.payment_key_secret.clone(),
      app_config.currency.clone(),
    )),
    Arc::new(PgOrderStore::new(db_pool.clone())),
  ));
  tracing::info!(store = %app_config.store_name, "Reconciliation engine wired.");

  let app_state = AppState {
    reconciler,
    config: app_config.clone(),
  };

  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(web::routes::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
