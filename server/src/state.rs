// server/src/state.rs
use crate::config::AppConfig;
use reconcile::Reconciler;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub reconciler: Arc<Reconciler>,
  pub config: Arc<AppConfig>,
}
