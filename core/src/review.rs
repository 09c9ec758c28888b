// core/src/review.rs

//! Admin review, cancellation, payment, and fulfillment transitions.
//!
//! Every transition validates against the current state and either commits
//! fully or leaves the order untouched; no partial application. Stale
//! callers get [`ReconcileError::InvalidTransition`] and should refresh
//! their view of the order.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ReconcileError, ReconcileResult};
use crate::order::{LineReview, Order, OrderStatus, PaymentStatus};

/// Per-line decision within a partial review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineDecision {
  pub product_id: Uuid,
  pub status: DecisionStatus,
  /// Accepted quantity; defaults to the ordered quantity when omitted.
  /// Ignored for rejected lines.
  pub quantity: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
  Accepted,
  Rejected,
}

/// An admin review verdict, collected client-side as an immutable payload.
/// The server is the sole authority for the resulting totals.
#[derive(Debug, Clone)]
pub enum ReviewAction {
  Accept,
  Reject,
  Partial(Vec<LineDecision>),
}

impl ReviewAction {
  pub fn name(&self) -> &'static str {
    match self {
      ReviewAction::Accept => "accept",
      ReviewAction::Reject => "reject",
      ReviewAction::Partial(_) => "partially accept",
    }
  }
}

impl Order {
  /// Apply an admin review. Valid only while the order is `Pending`.
  ///
  /// A partial review whose every line ends rejected collapses into a
  /// full reject.
  pub fn apply_review(&mut self, action: &ReviewAction, admin_notes: Option<String>) -> ReconcileResult<()> {
    if !self.is_reviewable() {
      return Err(ReconcileError::InvalidTransition {
        from: self.status,
        action: "review",
      });
    }

    match action {
      ReviewAction::Accept => {
        for line in &mut self.lines {
          line.review = LineReview::Accepted { quantity: line.quantity };
        }
        self.status = OrderStatus::Accepted;
      }
      ReviewAction::Reject => {
        for line in &mut self.lines {
          line.review = LineReview::Rejected;
        }
        self.status = OrderStatus::Rejected;
      }
      ReviewAction::Partial(decisions) => {
        let (reviews, status) = self.resolve_partial(decisions)?;
        for (line, review) in self.lines.iter_mut().zip(reviews) {
          line.review = review;
        }
        self.status = status;
      }
    }

    if let Some(notes) = admin_notes {
      self.admin_notes = Some(notes);
    }
    self.recompute_total();
    debug_assert!(self.total_amount_cents <= self.original_amount_cents);
    Ok(())
  }

  /// Validate a partial review against the order's lines without touching
  /// them, returning the per-line outcomes and the resulting status.
  fn resolve_partial(&self, decisions: &[LineDecision]) -> ReconcileResult<(Vec<LineReview>, OrderStatus)> {
    for decision in decisions {
      if !self.lines.iter().any(|l| l.product_id == decision.product_id) {
        return Err(ReconcileError::Validation(format!(
          "review references product {} which is not part of the order",
          decision.product_id
        )));
      }
    }

    let mut reviews = Vec::with_capacity(self.lines.len());
    let mut any_accepted = false;
    let mut any_reduced = false;

    for line in &self.lines {
      let decision = decisions
        .iter()
        .find(|d| d.product_id == line.product_id)
        .ok_or_else(|| {
          ReconcileError::Validation(format!("review is missing a decision for product {}", line.product_id))
        })?;

      match decision.status {
        DecisionStatus::Rejected => {
          any_reduced = true;
          reviews.push(LineReview::Rejected);
        }
        DecisionStatus::Accepted => {
          let quantity = decision.quantity.unwrap_or(line.quantity);
          if quantity < 1 || quantity > line.quantity {
            return Err(ReconcileError::InvalidQuantity {
              product_id: line.product_id,
              requested: quantity,
              ordered: line.quantity,
            });
          }
          any_accepted = true;
          if quantity < line.quantity {
            any_reduced = true;
          }
          reviews.push(LineReview::Accepted { quantity });
        }
      }
    }

    if !any_accepted {
      // Nothing survived review; this is a full reject in disguise.
      return Ok((vec![LineReview::Rejected; self.lines.len()], OrderStatus::Rejected));
    }

    let status = if any_reduced {
      OrderStatus::PartiallyAccepted
    } else {
      OrderStatus::Accepted
    };
    Ok((reviews, status))
  }

  /// Customer-initiated cancellation. Allowed before review and after an
  /// accepting review, but never once payment has completed.
  pub fn cancel(&mut self) -> ReconcileResult<()> {
    let cancellable = matches!(
      self.status,
      OrderStatus::Pending | OrderStatus::Accepted | OrderStatus::PartiallyAccepted
    );
    if !cancellable || self.payment_status == PaymentStatus::Completed {
      return Err(ReconcileError::InvalidTransition {
        from: self.status,
        action: "cancel",
      });
    }
    self.status = OrderStatus::Cancelled;
    Ok(())
  }

  /// Record the gateway handle minted for this order's payment.
  pub fn attach_payment_intent(&mut self, gateway_order_id: String) -> ReconcileResult<()> {
    if !self.is_payable() {
      return Err(ReconcileError::InvalidTransition {
        from: self.status,
        action: "create a payment for",
      });
    }
    self.gateway_order_id = Some(gateway_order_id);
    Ok(())
  }

  /// Mark payment completed after the gateway has verified the attempt.
  pub fn complete_payment(&mut self) -> ReconcileResult<()> {
    if !self.is_payable() {
      return Err(ReconcileError::InvalidTransition {
        from: self.status,
        action: "complete payment for",
      });
    }
    self.payment_status = PaymentStatus::Completed;
    Ok(())
  }

  /// Fulfillment: ship a paid order.
  pub fn mark_shipped(&mut self) -> ReconcileResult<()> {
    let paid = matches!(self.status, OrderStatus::Accepted | OrderStatus::PartiallyAccepted)
      && self.payment_status == PaymentStatus::Completed;
    if !paid {
      return Err(ReconcileError::InvalidTransition {
        from: self.status,
        action: "ship",
      });
    }
    self.status = OrderStatus::Shipped;
    Ok(())
  }

  /// Fulfillment: close out a shipped order.
  pub fn mark_delivered(&mut self) -> ReconcileResult<()> {
    if self.status != OrderStatus::Shipped {
      return Err(ReconcileError::InvalidTransition {
        from: self.status,
        action: "deliver",
      });
    }
    self.status = OrderStatus::Delivered;
    Ok(())
  }
}
