// core/src/store.rs

//! Order persistence seam.
//!
//! Transitions follow a single-writer-per-order model: the service reads
//! an order at some version, applies a transition to its own copy, and
//! commits with [`OrderStore::update`], which only applies when the stored
//! version still matches. A `false` return means another writer committed
//! first and the whole transition is discarded.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::error::ReconcileResult;
use crate::order::Order;

#[async_trait]
pub trait OrderStore: Send + Sync {
  async fn insert(&self, order: &Order) -> ReconcileResult<()>;

  async fn fetch(&self, order_id: Uuid) -> ReconcileResult<Option<Order>>;

  /// Version-checked write. `order.version` already carries the new
  /// version; the write applies only if the stored record is still at
  /// `expected_version`.
  async fn update(&self, order: &Order, expected_version: i64) -> ReconcileResult<bool>;

  /// Orders for one customer, newest first.
  async fn list_for_customer(&self, customer_id: Uuid) -> ReconcileResult<Vec<Order>>;

  /// Every order, newest first. Admin surface.
  async fn list_all(&self) -> ReconcileResult<Vec<Order>>;
}

/// In-memory store for tests and single-process deployments.
#[derive(Default)]
pub struct MemoryOrderStore {
  orders: Mutex<HashMap<Uuid, Order>>,
}

impl MemoryOrderStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
  async fn insert(&self, order: &Order) -> ReconcileResult<()> {
    self.orders.lock().insert(order.id, order.clone());
    Ok(())
  }

  async fn fetch(&self, order_id: Uuid) -> ReconcileResult<Option<Order>> {
    Ok(self.orders.lock().get(&order_id).cloned())
  }

  async fn update(&self, order: &Order, expected_version: i64) -> ReconcileResult<bool> {
    let mut orders = self.orders.lock();
    match orders.get(&order.id) {
      Some(stored) if stored.version == expected_version => {
        orders.insert(order.id, order.clone());
        Ok(true)
      }
      _ => Ok(false),
    }
  }

  async fn list_for_customer(&self, customer_id: Uuid) -> ReconcileResult<Vec<Order>> {
    let mut orders: Vec<Order> = self
      .orders
      .lock()
      .values()
      .filter(|o| o.customer_id == customer_id)
      .cloned()
      .collect();
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(orders)
  }

  async fn list_all(&self) -> ReconcileResult<Vec<Order>> {
    let mut orders: Vec<Order> = self.orders.lock().values().cloned().collect();
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(orders)
  }
}
