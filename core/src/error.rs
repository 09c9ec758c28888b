// core/src/error.rs

use anyhow::Error as AnyhowError;
use thiserror::Error;
use uuid::Uuid;

use crate::order::OrderStatus;

/// Failure taxonomy of the reconciliation core.
///
/// Everything except `Collaborator` is a recoverable request-boundary
/// failure: the caller fixes its input or refreshes its view of the order
/// and tries again. `Collaborator` wraps catalog/store/gateway I/O faults
/// and is the only class that maps to a generic server error.
#[derive(Debug, Error)]
pub enum ReconcileError {
  #[error("Validation error: {0}")]
  Validation(String),

  #[error("Product not found: {product_id}")]
  ProductNotFound { product_id: Uuid },

  #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
  InsufficientStock {
    product_id: Uuid,
    requested: u32,
    available: u32,
  },

  #[error("Order not found: {order_id}")]
  OrderNotFound { order_id: Uuid },

  #[error("Operation not permitted for this customer")]
  Forbidden,

  #[error("Invalid transition: cannot {action} an order that is {from:?}")]
  InvalidTransition { from: OrderStatus, action: &'static str },

  #[error("Invalid accepted quantity {requested} for product {product_id}: ordered quantity is {ordered}")]
  InvalidQuantity {
    product_id: Uuid,
    requested: u32,
    ordered: u32,
  },

  #[error("Payment verification failed")]
  PaymentVerificationFailed,

  #[error("Collaborator failure: {source}")]
  Collaborator {
    #[from]
    source: AnyhowError,
  },
}

pub type ReconcileResult<T, E = ReconcileError> = std::result::Result<T, E>;
