// core/src/payment.rs

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ReconcileResult;
use crate::order::Order;

/// Gateway handle handed to the storefront so the customer can pay.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentIntent {
  pub gateway_order_id: String,
  pub amount_cents: i64,
  pub currency: String,
  /// Public key id the frontend initializes the gateway widget with.
  pub key_id: String,
}

/// Signature triple returned by the gateway after the customer pays.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentAttempt {
  pub gateway_order_id: String,
  pub gateway_payment_id: String,
  pub signature: String,
}

/// External payment gateway collaborator.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
  async fn create_intent(&self, order: &Order) -> ReconcileResult<PaymentIntent>;

  /// Whether the attempt's signature is authentic. `Ok(false)` means a
  /// tampered or mismatched signature, not an infrastructure fault.
  async fn verify(&self, attempt: &PaymentAttempt) -> ReconcileResult<bool>;
}
