// core/src/promotion.rs

use async_trait::async_trait;

use crate::error::ReconcileResult;

/// Promotion collaborator. Resolved exactly once, at submission time; the
/// resulting discount is a flat deduction stored on the order and never
/// rescaled against a partially-accepted subtotal.
#[async_trait]
pub trait Promotions: Send + Sync {
  /// Flat discount in cents for `code` against the submitted subtotal,
  /// or `None` when the code is unknown or not applicable.
  async fn discount_for(&self, code: &str, subtotal_cents: i64) -> ReconcileResult<Option<i64>>;
}

/// Promotions source for deployments without promotion support.
pub struct NoPromotions;

#[async_trait]
impl Promotions for NoPromotions {
  async fn discount_for(&self, _code: &str, _subtotal_cents: i64) -> ReconcileResult<Option<i64>> {
    Ok(None)
  }
}
