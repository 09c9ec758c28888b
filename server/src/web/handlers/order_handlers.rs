// server/src/web/handlers/order_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use reconcile::{OrderSubmission, SubmitItem};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

// --- Request DTOs ---

#[derive(Deserialize, Debug)]
pub struct SubmitItemPayload {
  pub product_id: Uuid,
  pub quantity: u32,
}

#[derive(Deserialize, Debug)]
pub struct SubmitOrderPayload {
  pub items: Vec<SubmitItemPayload>,
  pub shipping_address: String,
  pub phone: String,
  pub payment_method: Option<String>,
  pub promotion_code: Option<String>,
}

// --- Handler Implementations ---

#[instrument(
    name = "handler::submit_order",
    skip(app_state, payload, auth_user),
    fields(user_id = %auth_user.user_id, items = payload.items.len())
)]
pub async fn submit_order_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<SubmitOrderPayload>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let payload = payload.into_inner();
  let submission = OrderSubmission {
    customer_id: auth_user.user_id,
    items: payload
      .items
      .into_iter()
      .map(|i| SubmitItem {
        product_id: i.product_id,
        quantity: i.quantity,
      })
      .collect(),
    shipping_address: payload.shipping_address,
    phone: payload.phone,
    payment_method: payload.payment_method,
    promotion_code: payload.promotion_code,
  };

  let order = app_state.reconciler.submit(submission).await?;
  info!(order_id = %order.id, "order submitted");
  Ok(HttpResponse::Created().json(order))
}

#[instrument(name = "handler::list_my_orders", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn list_my_orders_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let orders = app_state.reconciler.orders_for_customer(auth_user.user_id).await?;
  Ok(HttpResponse::Ok().json(json!({ "orders": orders })))
}

#[instrument(
    name = "handler::get_order",
    skip(app_state, auth_user),
    fields(user_id = %auth_user.user_id, order_id = %path)
)]
pub async fn get_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let order = app_state.reconciler.order(*path).await?;
  if order.customer_id != auth_user.user_id {
    return Err(reconcile::ReconcileError::Forbidden.into());
  }
  Ok(HttpResponse::Ok().json(order))
}

#[instrument(
    name = "handler::cancel_order",
    skip(app_state, auth_user),
    fields(user_id = %auth_user.user_id, order_id = %path)
)]
pub async fn cancel_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let order = app_state.reconciler.cancel(*path, auth_user.user_id).await?;
  info!(order_id = %order.id, "order cancelled by customer");
  Ok(HttpResponse::Ok().json(order))
}
