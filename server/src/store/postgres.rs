// server/src/store/postgres.rs

//! Postgres-backed order persistence.
//!
//! Line items are stored as a JSONB column (they are only ever read and
//! written as part of their order), and `version` backs the optimistic
//! concurrency check: `update` matches on `id AND version` and reports a
//! conflict when no row matches.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use reconcile::{Order, OrderLine, OrderStatus, OrderStore, PaymentStatus, ReconcileError, ReconcileResult};

use super::db_err;

pub struct PgOrderStore {
  pool: PgPool,
}

impl PgOrderStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[derive(Debug, FromRow)]
struct OrderRow {
  id: Uuid,
  customer_id: Uuid,
  lines: Json<Vec<OrderLine>>,
  shipping_address: String,
  phone: String,
  status: String,
  payment_status: String,
  payment_method: String,
  original_amount_cents: i64,
  total_amount_cents: i64,
  discount_cents: Option<i64>,
  promotion_code: Option<String>,
  admin_notes: Option<String>,
  gateway_order_id: Option<String>,
  created_at: DateTime<Utc>,
  version: i64,
}

impl OrderRow {
  fn into_order(self) -> ReconcileResult<Order> {
    let status = OrderStatus::parse(&self.status)
      .ok_or_else(|| ReconcileError::from(anyhow::anyhow!("unknown order status '{}' in row {}", self.status, self.id)))?;
    let payment_status = PaymentStatus::parse(&self.payment_status).ok_or_else(|| {
      ReconcileError::from(anyhow::anyhow!(
        "unknown payment status '{}' in row {}",
        self.payment_status,
        self.id
      ))
    })?;
    Ok(Order {
      id: self.id,
      customer_id: self.customer_id,
      lines: self.lines.0,
      shipping_address: self.shipping_address,
      phone: self.phone,
      status,
      payment_status,
      payment_method: self.payment_method,
      original_amount_cents: self.original_amount_cents,
      total_amount_cents: self.total_amount_cents,
      discount_cents: self.discount_cents,
      promotion_code: self.promotion_code,
      admin_notes: self.admin_notes,
      gateway_order_id: self.gateway_order_id,
      created_at: self.created_at,
      version: self.version,
    })
  }
}

const SELECT_COLUMNS: &str = "id, customer_id, lines, shipping_address, phone, status, payment_status, \
   payment_method, original_amount_cents, total_amount_cents, discount_cents, promotion_code, admin_notes, \
   gateway_order_id, created_at, version";

#[async_trait]
impl OrderStore for PgOrderStore {
  async fn insert(&self, order: &Order) -> ReconcileResult<()> {
    sqlx::query(
      "INSERT INTO orders (id, customer_id, lines, shipping_address, phone, status, payment_status, \
       payment_method, original_amount_cents, total_amount_cents, discount_cents, promotion_code, admin_notes, \
       gateway_order_id, created_at, version) \
       VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)",
    )
    .bind(order.id)
    .bind(order.customer_id)
    .bind(Json(&order.lines))
    .bind(&order.shipping_address)
    .bind(&order.phone)
    .bind(order.status.as_str())
    .bind(order.payment_status.as_str())
    .bind(&order.payment_method)
    .bind(order.original_amount_cents)
    .bind(order.total_amount_cents)
    .bind(order.discount_cents)
    .bind(&order.promotion_code)
    .bind(&order.admin_notes)
    .bind(&order.gateway_order_id)
    .bind(order.created_at)
    .bind(order.version)
    .execute(&self.pool)
    .await
    .map_err(db_err)?;
    Ok(())
  }

  async fn fetch(&self, order_id: Uuid) -> ReconcileResult<Option<Order>> {
    let row = sqlx::query_as::<_, OrderRow>(&format!("SELECT {SELECT_COLUMNS} FROM orders WHERE id = $1"))
      .bind(order_id)
      .fetch_optional(&self.pool)
      .await
      .map_err(db_err)?;
    row.map(OrderRow::into_order).transpose()
  }

  async fn update(&self, order: &Order, expected_version: i64) -> ReconcileResult<bool> {
    let result = sqlx::query(
      "UPDATE orders SET lines = $1, status = $2, payment_status = $3, total_amount_cents = $4, \
       admin_notes = $5, gateway_order_id = $6, version = $7 \
       WHERE id = $8 AND version = $9",
    )
    .bind(Json(&order.lines))
    .bind(order.status.as_str())
    .bind(order.payment_status.as_str())
    .bind(order.total_amount_cents)
    .bind(&order.admin_notes)
    .bind(&order.gateway_order_id)
    .bind(order.version)
    .bind(order.id)
    .bind(expected_version)
    .execute(&self.pool)
    .await
    .map_err(db_err)?;
    Ok(result.rows_affected() == 1)
  }

  async fn list_for_customer(&self, customer_id: Uuid) -> ReconcileResult<Vec<Order>> {
    let rows = sqlx::query_as::<_, OrderRow>(&format!(
      "SELECT {SELECT_COLUMNS} FROM orders WHERE customer_id = $1 ORDER BY created_at DESC"
    ))
    .bind(customer_id)
    .fetch_all(&self.pool)
    .await
    .map_err(db_err)?;
    rows.into_iter().map(OrderRow::into_order).collect()
  }

  async fn list_all(&self) -> ReconcileResult<Vec<Order>> {
    let rows = sqlx::query_as::<_, OrderRow>(&format!("SELECT {SELECT_COLUMNS} FROM orders ORDER BY created_at DESC"))
      .fetch_all(&self.pool)
      .await
      .map_err(db_err)?;
    rows.into_iter().map(OrderRow::into_order).collect()
  }
}
