// core/src/order.rs

//! The order data model and the payable-total arithmetic.
//!
//! Quantities and unit prices on an [`OrderLine`] are snapshots taken at
//! submission time; later catalog changes never retroactively alter a
//! placed order. All money is integer cents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The review axis of an order's lifecycle.
///
/// `Rejected` and `Cancelled` are terminal. `Shipped` and `Delivered` are
/// fulfillment states reachable only after payment completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
  Pending,
  Accepted,
  PartiallyAccepted,
  Rejected,
  Cancelled,
  Shipped,
  Delivered,
}

impl OrderStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      OrderStatus::Pending => "pending",
      OrderStatus::Accepted => "accepted",
      OrderStatus::PartiallyAccepted => "partially_accepted",
      OrderStatus::Rejected => "rejected",
      OrderStatus::Cancelled => "cancelled",
      OrderStatus::Shipped => "shipped",
      OrderStatus::Delivered => "delivered",
    }
  }

  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "pending" => Some(OrderStatus::Pending),
      "accepted" => Some(OrderStatus::Accepted),
      "partially_accepted" => Some(OrderStatus::PartiallyAccepted),
      "rejected" => Some(OrderStatus::Rejected),
      "cancelled" => Some(OrderStatus::Cancelled),
      "shipped" => Some(OrderStatus::Shipped),
      "delivered" => Some(OrderStatus::Delivered),
      _ => None,
    }
  }
}

/// The payment axis, independent of the review axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
  Pending,
  Completed,
  Failed,
}

impl PaymentStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      PaymentStatus::Pending => "pending",
      PaymentStatus::Completed => "completed",
      PaymentStatus::Failed => "failed",
    }
  }

  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "pending" => Some(PaymentStatus::Pending),
      "completed" => Some(PaymentStatus::Completed),
      "failed" => Some(PaymentStatus::Failed),
      _ => None,
    }
  }
}

/// Per-line review outcome. The accepted quantity only exists on an
/// accepted line, so `1 <= accepted_quantity <= quantity` is checked in
/// exactly one place (review application) and cannot drift afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LineReview {
  Pending,
  Accepted { quantity: u32 },
  Rejected,
}

/// One product/quantity/price entry within an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
  pub product_id: Uuid,
  /// Quantity requested at submission time. Immutable.
  pub quantity: u32,
  /// Unit price captured at submission time. Immutable.
  pub unit_price_cents: i64,
  pub review: LineReview,
}

impl OrderLine {
  pub fn new(product_id: Uuid, quantity: u32, unit_price_cents: i64) -> Self {
    Self {
      product_id,
      quantity,
      unit_price_cents,
      review: LineReview::Pending,
    }
  }

  /// Submitted value of this line.
  pub fn subtotal_cents(&self) -> i64 {
    self.unit_price_cents * i64::from(self.quantity)
  }

  /// Value of this line as reviewed: zero unless accepted.
  pub fn accepted_subtotal_cents(&self) -> i64 {
    match self.review {
      LineReview::Accepted { quantity } => self.unit_price_cents * i64::from(quantity),
      LineReview::Pending | LineReview::Rejected => 0,
    }
  }
}

/// Payable total for a set of reviewed lines: the sum over accepted lines
/// of `unit_price * accepted_quantity`, minus the flat discount, floored
/// at zero. Always recomputed from scratch, never adjusted incrementally.
pub fn accepted_total_cents(lines: &[OrderLine], discount_cents: Option<i64>) -> i64 {
  let subtotal: i64 = lines.iter().map(OrderLine::accepted_subtotal_cents).sum();
  (subtotal - discount_cents.unwrap_or(0)).max(0)
}

/// A customer order. Mutated only through the transition methods in
/// `review.rs`; the record itself is never deleted, terminal states
/// persist for history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
  pub id: Uuid,
  pub customer_id: Uuid,
  pub lines: Vec<OrderLine>,
  pub shipping_address: String,
  pub phone: String,
  pub status: OrderStatus,
  pub payment_status: PaymentStatus,
  pub payment_method: String,
  /// Sum of all submitted line subtotals. Immutable once set.
  pub original_amount_cents: i64,
  /// Payable amount; recomputed on review, never exceeds the original.
  pub total_amount_cents: i64,
  pub discount_cents: Option<i64>,
  pub promotion_code: Option<String>,
  pub admin_notes: Option<String>,
  /// Gateway order handle, set when a payment intent is created.
  pub gateway_order_id: Option<String>,
  pub created_at: DateTime<Utc>,
  /// Optimistic-concurrency counter, bumped on every committed write.
  pub version: i64,
}

impl Order {
  pub fn new(
    customer_id: Uuid,
    lines: Vec<OrderLine>,
    shipping_address: String,
    phone: String,
    payment_method: String,
    discount_cents: Option<i64>,
    promotion_code: Option<String>,
  ) -> Self {
    let original_amount_cents: i64 = lines.iter().map(OrderLine::subtotal_cents).sum();
    let total_amount_cents = (original_amount_cents - discount_cents.unwrap_or(0)).max(0);
    Self {
      id: Uuid::new_v4(),
      customer_id,
      lines,
      shipping_address,
      phone,
      status: OrderStatus::Pending,
      payment_status: PaymentStatus::Pending,
      payment_method,
      original_amount_cents,
      total_amount_cents,
      discount_cents,
      promotion_code,
      admin_notes: None,
      gateway_order_id: None,
      created_at: Utc::now(),
      version: 0,
    }
  }

  /// Recompute `total_amount_cents` from the current line reviews.
  /// Idempotent: the same line states always yield the same total.
  pub fn recompute_total(&mut self) {
    self.total_amount_cents = accepted_total_cents(&self.lines, self.discount_cents);
  }

  /// True while an admin review action may still be applied.
  pub fn is_reviewable(&self) -> bool {
    self.status == OrderStatus::Pending
  }

  /// True while the order is waiting on customer payment.
  pub fn is_payable(&self) -> bool {
    matches!(self.status, OrderStatus::Accepted | OrderStatus::PartiallyAccepted)
      && self.payment_status == PaymentStatus::Pending
  }
}
