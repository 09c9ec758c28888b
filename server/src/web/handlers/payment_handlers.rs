// server/src/web/handlers/payment_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use reconcile::PaymentAttempt;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

/// Signature triple posted back by the gateway checkout widget.
#[derive(Deserialize, Debug)]
pub struct VerifyPaymentPayload {
  pub gateway_order_id: String,
  pub gateway_payment_id: String,
  pub gateway_signature: String,
}

#[instrument(
    name = "handler::create_payment_order",
    skip(app_state, auth_user),
    fields(user_id = %auth_user.user_id, order_id = %path)
)]
pub async fn create_payment_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let intent = app_state.reconciler.create_payment(*path, auth_user.user_id).await?;
  info!(gateway_order_id = %intent.gateway_order_id, "payment order created");
  Ok(HttpResponse::Ok().json(intent))
}

#[instrument(
    name = "handler::verify_payment",
    skip(app_state, payload, auth_user),
    fields(user_id = %auth_user.user_id, order_id = %path)
)]
pub async fn verify_payment_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  payload: web::Json<VerifyPaymentPayload>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let payload = payload.into_inner();
  let attempt = PaymentAttempt {
    gateway_order_id: payload.gateway_order_id,
    gateway_payment_id: payload.gateway_payment_id,
    signature: payload.gateway_signature,
  };

  let order = app_state.reconciler.verify_payment(*path, auth_user.user_id, attempt).await?;
  info!(order_id = %order.id, "payment verified and completed");
  Ok(HttpResponse::Ok().json(json!({
      "message": "Payment verified.",
      "order": order
  })))
}
