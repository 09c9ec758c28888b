// tests/review_tests.rs
mod common;

use common::*;
use reconcile::{DecisionStatus, LineDecision, OrderStatus, OrderStore, ReconcileError, ReviewAction};
use uuid::Uuid;

fn decision(product_id: Uuid, status: DecisionStatus, quantity: Option<u32>) -> LineDecision {
  LineDecision {
    product_id,
    status,
    quantity,
  }
}

#[tokio::test]
async fn accept_marks_every_line_and_keeps_the_total() {
  setup_tracing();
  let fx = fixture(&[(100, 10), (200, 10), (300, 10)]);
  let order = fx.reconciler.submit(one_of_each(&fx, Uuid::new_v4())).await.unwrap();

  let reviewed = fx
    .reconciler
    .review(order.id, ReviewAction::Accept, None)
    .await
    .unwrap();

  assert_eq!(reviewed.status, OrderStatus::Accepted);
  assert_eq!(reviewed.total_amount_cents, 600);
  assert_eq!(reviewed.total_amount_cents, reviewed.original_amount_cents);
  assert_eq!(reviewed.version, order.version + 1);
}

#[tokio::test]
async fn partial_accepting_one_line_and_rejecting_the_rest() {
  setup_tracing();
  let fx = fixture(&[(100, 10), (200, 10), (300, 10)]);
  let order = fx.reconciler.submit(one_of_each(&fx, Uuid::new_v4())).await.unwrap();

  let action = ReviewAction::Partial(vec![
    decision(fx.product_ids[0], DecisionStatus::Accepted, Some(1)),
    decision(fx.product_ids[1], DecisionStatus::Rejected, None),
    decision(fx.product_ids[2], DecisionStatus::Rejected, None),
  ]);
  let reviewed = fx
    .reconciler
    .review(order.id, action, Some("only the ring is in stock".to_string()))
    .await
    .unwrap();

  assert_eq!(reviewed.status, OrderStatus::PartiallyAccepted);
  assert_eq!(reviewed.total_amount_cents, 100);
  assert!(reviewed.total_amount_cents <= reviewed.original_amount_cents);
  assert_eq!(reviewed.admin_notes.as_deref(), Some("only the ring is in stock"));
}

#[tokio::test]
async fn reject_zeroes_the_total_and_blocks_further_review() {
  setup_tracing();
  let fx = fixture(&[(100, 10), (200, 10)]);
  let order = fx.reconciler.submit(one_of_each(&fx, Uuid::new_v4())).await.unwrap();

  let rejected = fx
    .reconciler
    .review(order.id, ReviewAction::Reject, Some("duplicate order".to_string()))
    .await
    .unwrap();
  assert_eq!(rejected.status, OrderStatus::Rejected);
  assert_eq!(rejected.total_amount_cents, 0);

  let err = fx
    .reconciler
    .review(order.id, ReviewAction::Accept, None)
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    ReconcileError::InvalidTransition {
      from: OrderStatus::Rejected,
      ..
    }
  ));
}

#[tokio::test]
async fn invalid_quantity_leaves_the_stored_order_unchanged() {
  setup_tracing();
  let fx = fixture(&[(100, 10), (200, 10)]);
  let order = fx.reconciler.submit(one_of_each(&fx, Uuid::new_v4())).await.unwrap();

  let action = ReviewAction::Partial(vec![
    decision(fx.product_ids[0], DecisionStatus::Accepted, Some(5)),
    decision(fx.product_ids[1], DecisionStatus::Accepted, None),
  ]);
  let err = fx.reconciler.review(order.id, action, None).await.unwrap_err();
  assert!(matches!(err, ReconcileError::InvalidQuantity { requested: 5, .. }));

  let stored = fx.store.fetch(order.id).await.unwrap().unwrap();
  assert_eq!(stored.status, OrderStatus::Pending);
  assert_eq!(stored.total_amount_cents, stored.original_amount_cents);
  assert_eq!(stored.version, order.version);
}

#[tokio::test]
async fn review_of_a_missing_order_reports_not_found() {
  setup_tracing();
  let fx = fixture(&[(100, 10)]);
  let err = fx
    .reconciler
    .review(Uuid::new_v4(), ReviewAction::Accept, None)
    .await
    .unwrap_err();
  assert!(matches!(err, ReconcileError::OrderNotFound { .. }));
}

#[tokio::test]
async fn total_never_exceeds_the_original_across_transitions() {
  setup_tracing();
  let fx = fixture(&[(100, 10), (200, 10), (300, 10)]);
  let customer = Uuid::new_v4();
  let order = fx.reconciler.submit(one_of_each(&fx, customer)).await.unwrap();
  assert!(order.total_amount_cents <= order.original_amount_cents);

  let action = ReviewAction::Partial(vec![
    decision(fx.product_ids[0], DecisionStatus::Accepted, None),
    decision(fx.product_ids[1], DecisionStatus::Accepted, None),
    decision(fx.product_ids[2], DecisionStatus::Rejected, None),
  ]);
  let reviewed = fx.reconciler.review(order.id, action, None).await.unwrap();
  assert!(reviewed.total_amount_cents <= reviewed.original_amount_cents);

  let cancelled = fx.reconciler.cancel(order.id, customer).await.unwrap();
  assert!(cancelled.total_amount_cents <= cancelled.original_amount_cents);
}
