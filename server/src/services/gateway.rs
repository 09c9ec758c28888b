// server/src/services/gateway.rs

//! Payment gateway collaborator in the hosted-checkout style: the server
//! mints a gateway order id, the customer pays in the gateway widget, and
//! the gateway calls back with `(order_id, payment_id, signature)` where
//! the signature is HMAC-SHA256 over `"{order_id}|{payment_id}"` keyed
//! with the merchant secret.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::{info, instrument};
use uuid::Uuid;

use reconcile::{Order, PaymentAttempt, PaymentGateway, PaymentIntent, ReconcileResult};

type HmacSha256 = Hmac<Sha256>;

pub struct HmacGateway {
  key_id: String,
  key_secret: String,
  currency: String,
}

impl HmacGateway {
  pub fn new(key_id: String, key_secret: String, currency: String) -> Self {
    Self {
      key_id,
      key_secret,
      currency,
    }
  }

  fn mac(&self) -> HmacSha256 {
    // HMAC accepts keys of any length; new_from_slice cannot fail.
    HmacSha256::new_from_slice(self.key_secret.as_bytes()).expect("HMAC accepts any key length")
  }

  /// Signature the gateway would produce for this order/payment pair.
  /// Exposed for tests and for local checkout simulation.
  pub fn sign(&self, gateway_order_id: &str, gateway_payment_id: &str) -> String {
    let mut mac = self.mac();
    mac.update(gateway_order_id.as_bytes());
    mac.update(b"|");
    mac.update(gateway_payment_id.as_bytes());
    hex::encode(mac.finalize().into_bytes())
  }
}

#[async_trait]
impl PaymentGateway for HmacGateway {
  #[instrument(skip(self, order), fields(order_id = %order.id, amount_cents = order.total_amount_cents))]
  async fn create_intent(&self, order: &Order) -> ReconcileResult<PaymentIntent> {
    let gateway_order_id = format!("order_{}", Uuid::new_v4().simple());
    info!(%gateway_order_id, "created gateway order");
    Ok(PaymentIntent {
      gateway_order_id,
      amount_cents: order.total_amount_cents,
      currency: self.currency.clone(),
      key_id: self.key_id.clone(),
    })
  }

  #[instrument(skip(self, attempt), fields(gateway_order_id = %attempt.gateway_order_id))]
  async fn verify(&self, attempt: &PaymentAttempt) -> ReconcileResult<bool> {
    let Ok(provided) = hex::decode(&attempt.signature) else {
      return Ok(false);
    };
    let mut mac = self.mac();
    mac.update(attempt.gateway_order_id.as_bytes());
    mac.update(b"|");
    mac.update(attempt.gateway_payment_id.as_bytes());
    // Constant-time comparison.
    Ok(mac.verify_slice(&provided).is_ok())
  }
}
