// server/src/models/promotion.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Promotion {
  pub code: String,
  /// Flat discount in cents, applied once at submission time.
  pub discount_cents: i64,
  /// Minimum submitted subtotal for the code to apply.
  pub min_subtotal_cents: i64,
  pub active: bool,
  pub created_at: DateTime<Utc>,
}
