// server/src/web/handlers/admin_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use reconcile::{LineDecision, ReviewAction};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::AdminUser;

// --- Request DTOs ---

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReviewActionKind {
  Accept,
  Reject,
  Partial,
}

/// The admin's review verdict, collected client-side as one immutable
/// payload. Totals are never taken from the client.
#[derive(Deserialize, Debug)]
pub struct ReviewPayload {
  pub action: ReviewActionKind,
  /// Required for `partial`, ignored otherwise.
  pub items_status: Option<Vec<LineDecision>>,
  pub admin_notes: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentStatus {
  Shipped,
  Delivered,
}

#[derive(Deserialize, Debug)]
pub struct FulfillmentPayload {
  pub status: FulfillmentStatus,
}

// --- Handler Implementations ---

#[instrument(
    name = "handler::review_order",
    skip(app_state, payload, admin),
    fields(admin_id = %admin.admin_id, order_id = %path, action = ?payload.action)
)]
pub async fn review_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  payload: web::Json<ReviewPayload>,
  admin: AdminUser,
) -> Result<HttpResponse, AppError> {
  let payload = payload.into_inner();
  let action = match payload.action {
    ReviewActionKind::Accept => ReviewAction::Accept,
    ReviewActionKind::Reject => ReviewAction::Reject,
    ReviewActionKind::Partial => {
      let decisions: Vec<LineDecision> = payload
        .items_status
        .ok_or_else(|| AppError::Validation("partial review requires items_status".to_string()))?;
      ReviewAction::Partial(decisions)
    }
  };

  let order = app_state.reconciler.review(*path, action, payload.admin_notes).await?;
  info!(status = order.status.as_str(), total_cents = order.total_amount_cents, "review committed");
  Ok(HttpResponse::Ok().json(order))
}

#[instrument(
    name = "handler::get_order_admin",
    skip(app_state, admin),
    fields(admin_id = %admin.admin_id, order_id = %path)
)]
pub async fn get_order_admin_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  admin: AdminUser,
) -> Result<HttpResponse, AppError> {
  // Admins see any order; the owner check lives on the customer route.
  let order = app_state.reconciler.order(*path).await?;
  Ok(HttpResponse::Ok().json(order))
}

#[instrument(name = "handler::list_all_orders", skip(app_state, admin), fields(admin_id = %admin.admin_id))]
pub async fn list_all_orders_handler(app_state: web::Data<AppState>, admin: AdminUser) -> Result<HttpResponse, AppError> {
  let orders = app_state.reconciler.all_orders().await?;
  Ok(HttpResponse::Ok().json(json!({ "orders": orders })))
}

#[instrument(
    name = "handler::update_fulfillment",
    skip(app_state, payload, admin),
    fields(admin_id = %admin.admin_id, order_id = %path, status = ?payload.status)
)]
pub async fn update_fulfillment_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  payload: web::Json<FulfillmentPayload>,
  admin: AdminUser,
) -> Result<HttpResponse, AppError> {
  let order = match payload.status {
    FulfillmentStatus::Shipped => app_state.reconciler.mark_shipped(*path).await?,
    FulfillmentStatus::Delivered => app_state.reconciler.mark_delivered(*path).await?,
  };
  info!(status = order.status.as_str(), "fulfillment updated");
  Ok(HttpResponse::Ok().json(order))
}
