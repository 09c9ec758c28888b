// core/src/service.rs

//! The reconciliation service: the single authority for order mutations.
//!
//! Each operation is one read-validate-apply-commit cycle. The pure
//! transition methods on [`Order`] never touch I/O; this service owns the
//! collaborators and the optimistic-concurrency commit.

use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::error::{ReconcileError, ReconcileResult};
use crate::order::{Order, OrderLine};
use crate::payment::{PaymentAttempt, PaymentGateway, PaymentIntent};
use crate::promotion::Promotions;
use crate::review::ReviewAction;
use crate::store::OrderStore;

/// One requested line of a new order.
#[derive(Debug, Clone)]
pub struct SubmitItem {
  pub product_id: Uuid,
  pub quantity: u32,
}

/// A customer's order submission, copied from cart contents.
#[derive(Debug, Clone)]
pub struct OrderSubmission {
  pub customer_id: Uuid,
  pub items: Vec<SubmitItem>,
  pub shipping_address: String,
  pub phone: String,
  /// Defaults to "upi" when absent.
  pub payment_method: Option<String>,
  pub promotion_code: Option<String>,
}

pub struct Reconciler {
  catalog: Arc<dyn Catalog>,
  promotions: Arc<dyn Promotions>,
  gateway: Arc<dyn PaymentGateway>,
  store: Arc<dyn OrderStore>,
}

impl Reconciler {
  pub fn new(
    catalog: Arc<dyn Catalog>,
    promotions: Arc<dyn Promotions>,
    gateway: Arc<dyn PaymentGateway>,
    store: Arc<dyn OrderStore>,
  ) -> Self {
    Self {
      catalog,
      promotions,
      gateway,
      store,
    }
  }

  /// Validate a submission, snapshot prices, and persist the new order.
  ///
  /// Stock is checked against the catalog but not decremented here;
  /// decrementing is an acceptance-time concern of the catalog side.
  #[instrument(skip(self, submission), fields(customer_id = %submission.customer_id, items = submission.items.len()))]
  pub async fn submit(&self, submission: OrderSubmission) -> ReconcileResult<Order> {
    if submission.items.is_empty() {
      return Err(ReconcileError::Validation("order must contain at least one item".to_string()));
    }
    if submission.shipping_address.trim().is_empty() {
      return Err(ReconcileError::Validation("shipping address is required".to_string()));
    }
    if submission.phone.trim().is_empty() {
      return Err(ReconcileError::Validation("contact phone is required".to_string()));
    }

    // One line per product: a duplicated product id would evade the joint
    // stock check and make per-line review decisions ambiguous. Carts
    // merge quantities per product, so a duplicate is a malformed request.
    for (i, item) in submission.items.iter().enumerate() {
      if submission.items[..i].iter().any(|p| p.product_id == item.product_id) {
        return Err(ReconcileError::Validation(format!(
          "product {} appears on more than one line; merge quantities before submitting",
          item.product_id
        )));
      }
    }

    let mut lines = Vec::with_capacity(submission.items.len());
    for item in &submission.items {
      if item.quantity == 0 {
        return Err(ReconcileError::Validation(format!(
          "quantity for product {} must be a positive integer",
          item.product_id
        )));
      }
      let quote = self
        .catalog
        .quote(item.product_id)
        .await?
        .ok_or(ReconcileError::ProductNotFound {
          product_id: item.product_id,
        })?;
      if quote.stock < item.quantity {
        return Err(ReconcileError::InsufficientStock {
          product_id: item.product_id,
          requested: item.quantity,
          available: quote.stock,
        });
      }
      lines.push(OrderLine::new(item.product_id, item.quantity, quote.unit_price_cents));
    }

    let subtotal: i64 = lines.iter().map(OrderLine::subtotal_cents).sum();
    let discount_cents = match &submission.promotion_code {
      Some(code) => Some(
        self
          .promotions
          .discount_for(code, subtotal)
          .await?
          .ok_or_else(|| ReconcileError::Validation(format!("unknown or inactive promotion code '{}'", code)))?,
      ),
      None => None,
    };

    let order = Order::new(
      submission.customer_id,
      lines,
      submission.shipping_address,
      submission.phone,
      submission.payment_method.unwrap_or_else(|| "upi".to_string()),
      discount_cents,
      submission.promotion_code,
    );
    self.store.insert(&order).await?;
    info!(order_id = %order.id, total_cents = order.total_amount_cents, "order submitted");
    Ok(order)
  }

  /// Apply an admin review verdict.
  #[instrument(skip(self, action, admin_notes), fields(%order_id, action = action.name()))]
  pub async fn review(
    &self,
    order_id: Uuid,
    action: ReviewAction,
    admin_notes: Option<String>,
  ) -> ReconcileResult<Order> {
    let mut order = self.fetch(order_id).await?;
    let expected = order.version;
    order.apply_review(&action, admin_notes)?;
    let order = self.commit(order, expected, "review").await?;
    info!(status = order.status.as_str(), total_cents = order.total_amount_cents, "review applied");
    Ok(order)
  }

  /// Customer-initiated cancellation. Only the owning customer may cancel.
  #[instrument(skip(self), fields(%order_id, %customer_id))]
  pub async fn cancel(&self, order_id: Uuid, customer_id: Uuid) -> ReconcileResult<Order> {
    let mut order = self.fetch(order_id).await?;
    if order.customer_id != customer_id {
      return Err(ReconcileError::Forbidden);
    }
    let expected = order.version;
    order.cancel()?;
    let order = self.commit(order, expected, "cancel").await?;
    info!("order cancelled");
    Ok(order)
  }

  /// Mint a gateway handle for a reviewed, payable order.
  #[instrument(skip(self), fields(%order_id, %customer_id))]
  pub async fn create_payment(&self, order_id: Uuid, customer_id: Uuid) -> ReconcileResult<PaymentIntent> {
    let mut order = self.fetch(order_id).await?;
    if order.customer_id != customer_id {
      return Err(ReconcileError::Forbidden);
    }
    if !order.is_payable() {
      return Err(ReconcileError::InvalidTransition {
        from: order.status,
        action: "create a payment for",
      });
    }
    let expected = order.version;
    let intent = self.gateway.create_intent(&order).await?;
    order.attach_payment_intent(intent.gateway_order_id.clone())?;
    self.commit(order, expected, "create a payment for").await?;
    info!(gateway_order_id = %intent.gateway_order_id, "payment intent created");
    Ok(intent)
  }

  /// Verify a gateway signature triple and complete the payment.
  ///
  /// On a tampered or mismatched signature the order is left untouched
  /// and the attempt may be retried.
  #[instrument(skip(self, attempt), fields(%order_id, %customer_id, gateway_order_id = %attempt.gateway_order_id))]
  pub async fn verify_payment(
    &self,
    order_id: Uuid,
    customer_id: Uuid,
    attempt: PaymentAttempt,
  ) -> ReconcileResult<Order> {
    let mut order = self.fetch(order_id).await?;
    if order.customer_id != customer_id {
      return Err(ReconcileError::Forbidden);
    }
    if order.gateway_order_id.as_deref() != Some(attempt.gateway_order_id.as_str()) {
      warn!("payment attempt references a different gateway order");
      return Err(ReconcileError::PaymentVerificationFailed);
    }
    if !self.gateway.verify(&attempt).await? {
      warn!("gateway rejected the payment signature");
      return Err(ReconcileError::PaymentVerificationFailed);
    }
    let expected = order.version;
    order.complete_payment()?;
    let order = self.commit(order, expected, "complete payment for").await?;
    info!("payment completed");
    Ok(order)
  }

  /// Fulfillment: mark a paid order shipped.
  #[instrument(skip(self), fields(%order_id))]
  pub async fn mark_shipped(&self, order_id: Uuid) -> ReconcileResult<Order> {
    let mut order = self.fetch(order_id).await?;
    let expected = order.version;
    order.mark_shipped()?;
    self.commit(order, expected, "ship").await
  }

  /// Fulfillment: mark a shipped order delivered.
  #[instrument(skip(self), fields(%order_id))]
  pub async fn mark_delivered(&self, order_id: Uuid) -> ReconcileResult<Order> {
    let mut order = self.fetch(order_id).await?;
    let expected = order.version;
    order.mark_delivered()?;
    self.commit(order, expected, "deliver").await
  }

  pub async fn order(&self, order_id: Uuid) -> ReconcileResult<Order> {
    self.fetch(order_id).await
  }

  pub async fn orders_for_customer(&self, customer_id: Uuid) -> ReconcileResult<Vec<Order>> {
    self.store.list_for_customer(customer_id).await
  }

  pub async fn all_orders(&self) -> ReconcileResult<Vec<Order>> {
    self.store.list_all().await
  }

  async fn fetch(&self, order_id: Uuid) -> ReconcileResult<Order> {
    self
      .store
      .fetch(order_id)
      .await?
      .ok_or(ReconcileError::OrderNotFound { order_id })
  }

  /// Commit a transitioned order. A lost version race surfaces as
  /// `InvalidTransition` against the freshly committed state; the whole
  /// transition is discarded, nothing partial is ever applied.
  async fn commit(&self, mut order: Order, expected_version: i64, action: &'static str) -> ReconcileResult<Order> {
    order.version = expected_version + 1;
    if self.store.update(&order, expected_version).await? {
      return Ok(order);
    }
    warn!(order_id = %order.id, action, "lost a concurrent write race");
    let fresh = self.fetch(order.id).await?;
    Err(ReconcileError::InvalidTransition {
      from: fresh.status,
      action,
    })
  }
}
