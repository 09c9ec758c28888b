// core/src/catalog.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ReconcileResult;

/// Point-in-time price and stock for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductQuote {
  pub unit_price_cents: i64,
  pub stock: u32,
}

/// Product catalog collaborator. Submission snapshots the quoted price
/// onto the order line and checks stock; the engine never decrements
/// stock itself.
#[async_trait]
pub trait Catalog: Send + Sync {
  /// `None` when the product does not exist.
  async fn quote(&self, product_id: Uuid) -> ReconcileResult<Option<ProductQuote>>;
}
