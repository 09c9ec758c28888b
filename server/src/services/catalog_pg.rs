// server/src/services/catalog_pg.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use reconcile::{Catalog, ProductQuote, ReconcileResult};

use crate::models::Product;
use crate::store::db_err;

/// Catalog backed by the `products` table. The engine only ever asks for
/// a point-in-time quote; browsing and admin CRUD are separate surfaces.
pub struct PgCatalog {
  pool: PgPool,
}

impl PgCatalog {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl Catalog for PgCatalog {
  async fn quote(&self, product_id: Uuid) -> ReconcileResult<Option<ProductQuote>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
      .bind(product_id)
      .fetch_optional(&self.pool)
      .await
      .map_err(db_err)?;
    Ok(product.map(|p| ProductQuote {
      unit_price_cents: p.price_cents,
      stock: p.stock_quantity.max(0) as u32,
    }))
  }
}
