// tests/payment_tests.rs
mod common;

use common::*;
use reconcile::{Order, OrderStatus, OrderStore, PaymentAttempt, PaymentStatus, ReconcileError, ReviewAction};
use uuid::Uuid;

async fn accepted_order(fx: &Fixture, customer: Uuid) -> Order {
  let order = fx.reconciler.submit(one_of_each(fx, customer)).await.unwrap();
  fx.reconciler.review(order.id, ReviewAction::Accept, None).await.unwrap()
}

#[tokio::test]
async fn payment_completes_with_an_authentic_signature() {
  setup_tracing();
  let fx = fixture(&[(100, 10), (200, 10)]);
  let customer = Uuid::new_v4();
  let order = accepted_order(&fx, customer).await;

  let intent = fx.reconciler.create_payment(order.id, customer).await.unwrap();
  assert_eq!(intent.amount_cents, order.total_amount_cents);

  let attempt = PaymentAttempt {
    gateway_order_id: intent.gateway_order_id.clone(),
    gateway_payment_id: "pay_42".to_string(),
    signature: fx.gateway.sign(&intent.gateway_order_id, "pay_42"),
  };
  let paid = fx.reconciler.verify_payment(order.id, customer, attempt).await.unwrap();
  assert_eq!(paid.payment_status, PaymentStatus::Completed);
  assert_eq!(paid.status, OrderStatus::Accepted);
}

#[tokio::test]
async fn a_tampered_signature_leaves_the_order_payable_and_is_retryable() {
  setup_tracing();
  let fx = fixture(&[(100, 10)]);
  let customer = Uuid::new_v4();
  let order = accepted_order(&fx, customer).await;
  let intent = fx.reconciler.create_payment(order.id, customer).await.unwrap();

  let tampered = PaymentAttempt {
    gateway_order_id: intent.gateway_order_id.clone(),
    gateway_payment_id: "pay_42".to_string(),
    signature: "sig:forged".to_string(),
  };
  let err = fx
    .reconciler
    .verify_payment(order.id, customer, tampered)
    .await
    .unwrap_err();
  assert!(matches!(err, ReconcileError::PaymentVerificationFailed));

  let stored = fx.store.fetch(order.id).await.unwrap().unwrap();
  assert_eq!(stored.payment_status, PaymentStatus::Pending);

  // The caller may retry with the real signature.
  let retry = PaymentAttempt {
    gateway_order_id: intent.gateway_order_id.clone(),
    gateway_payment_id: "pay_42".to_string(),
    signature: fx.gateway.sign(&intent.gateway_order_id, "pay_42"),
  };
  let paid = fx.reconciler.verify_payment(order.id, customer, retry).await.unwrap();
  assert_eq!(paid.payment_status, PaymentStatus::Completed);
}

#[tokio::test]
async fn an_attempt_for_a_different_gateway_order_fails_verification() {
  setup_tracing();
  let fx = fixture(&[(100, 10)]);
  let customer = Uuid::new_v4();
  let order = accepted_order(&fx, customer).await;
  fx.reconciler.create_payment(order.id, customer).await.unwrap();

  let mismatched = PaymentAttempt {
    gateway_order_id: "mock_order_other".to_string(),
    gateway_payment_id: "pay_1".to_string(),
    signature: fx.gateway.sign("mock_order_other", "pay_1"),
  };
  let err = fx
    .reconciler
    .verify_payment(order.id, customer, mismatched)
    .await
    .unwrap_err();
  assert!(matches!(err, ReconcileError::PaymentVerificationFailed));
}

#[tokio::test]
async fn a_pending_order_cannot_start_payment() {
  setup_tracing();
  let fx = fixture(&[(100, 10)]);
  let customer = Uuid::new_v4();
  let order = fx.reconciler.submit(one_of_each(&fx, customer)).await.unwrap();

  let err = fx.reconciler.create_payment(order.id, customer).await.unwrap_err();
  assert!(matches!(
    err,
    ReconcileError::InvalidTransition {
      from: OrderStatus::Pending,
      ..
    }
  ));
}

#[tokio::test]
async fn only_the_owner_may_pay() {
  setup_tracing();
  let fx = fixture(&[(100, 10)]);
  let customer = Uuid::new_v4();
  let order = accepted_order(&fx, customer).await;

  let err = fx.reconciler.create_payment(order.id, Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, ReconcileError::Forbidden));
}

#[tokio::test]
async fn a_partially_accepted_order_pays_its_recomputed_total() {
  setup_tracing();
  let fx = fixture(&[(100, 10), (200, 10), (300, 10)]);
  let customer = Uuid::new_v4();
  let order = fx.reconciler.submit(one_of_each(&fx, customer)).await.unwrap();

  let action = ReviewAction::Partial(vec![
    reconcile::LineDecision {
      product_id: fx.product_ids[0],
      status: reconcile::DecisionStatus::Accepted,
      quantity: Some(1),
    },
    reconcile::LineDecision {
      product_id: fx.product_ids[1],
      status: reconcile::DecisionStatus::Rejected,
      quantity: None,
    },
    reconcile::LineDecision {
      product_id: fx.product_ids[2],
      status: reconcile::DecisionStatus::Rejected,
      quantity: None,
    },
  ]);
  fx.reconciler.review(order.id, action, None).await.unwrap();

  let intent = fx.reconciler.create_payment(order.id, customer).await.unwrap();
  assert_eq!(intent.amount_cents, 100);
}

#[tokio::test]
async fn fulfillment_advances_only_after_payment() {
  setup_tracing();
  let fx = fixture(&[(100, 10)]);
  let customer = Uuid::new_v4();
  let order = accepted_order(&fx, customer).await;

  let err = fx.reconciler.mark_shipped(order.id).await.unwrap_err();
  assert!(matches!(err, ReconcileError::InvalidTransition { action: "ship", .. }));

  let intent = fx.reconciler.create_payment(order.id, customer).await.unwrap();
  let attempt = PaymentAttempt {
    gateway_order_id: intent.gateway_order_id.clone(),
    gateway_payment_id: "pay_7".to_string(),
    signature: fx.gateway.sign(&intent.gateway_order_id, "pay_7"),
  };
  fx.reconciler.verify_payment(order.id, customer, attempt).await.unwrap();

  let shipped = fx.reconciler.mark_shipped(order.id).await.unwrap();
  assert_eq!(shipped.status, OrderStatus::Shipped);
  let delivered = fx.reconciler.mark_delivered(order.id).await.unwrap();
  assert_eq!(delivered.status, OrderStatus::Delivered);
}
