// server/src/store/mod.rs

pub mod postgres;

pub use postgres::PgOrderStore;

use reconcile::ReconcileError;

/// Database faults surface as collaborator failures: the engine treats
/// them as the one non-recoverable class (generic 5xx, no state mutation).
pub(crate) fn db_err(e: sqlx::Error) -> ReconcileError {
  ReconcileError::from(anyhow::Error::new(e))
}
