// server/src/services/promotions_pg.rs

use async_trait::async_trait;
use sqlx::PgPool;

use reconcile::{Promotions, ReconcileResult};

use crate::models::Promotion;
use crate::store::db_err;

/// Promotions backed by the `promotions` table. A code resolves only when
/// active and when the submitted subtotal clears its minimum.
pub struct PgPromotions {
  pool: PgPool,
}

impl PgPromotions {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl Promotions for PgPromotions {
  async fn discount_for(&self, code: &str, subtotal_cents: i64) -> ReconcileResult<Option<i64>> {
    let promotion = sqlx::query_as::<_, Promotion>(
      "SELECT * FROM promotions WHERE code = $1 AND active AND min_subtotal_cents <= $2",
    )
    .bind(code)
    .bind(subtotal_cents)
    .fetch_optional(&self.pool)
    .await
    .map_err(db_err)?;
    Ok(promotion.map(|p| p.discount_cents))
  }
}
