// server/src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use reconcile::ReconcileError;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Reconciliation Error: {source}")]
  Reconcile {
    #[from]
    source: ReconcileError,
  },

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

/// Machine-readable error code for the response body, matching the
/// engine's taxonomy so clients can branch without string-matching.
fn error_code(err: &ReconcileError) -> &'static str {
  match err {
    ReconcileError::Validation(_) => "ValidationError",
    ReconcileError::ProductNotFound { .. } => "ProductNotFound",
    ReconcileError::InsufficientStock { .. } => "InsufficientStock",
    ReconcileError::OrderNotFound { .. } => "OrderNotFound",
    ReconcileError::Forbidden => "Forbidden",
    ReconcileError::InvalidTransition { .. } => "InvalidTransition",
    ReconcileError::InvalidQuantity { .. } => "InvalidQuantity",
    ReconcileError::PaymentVerificationFailed => "PaymentVerificationFailed",
    ReconcileError::Collaborator { .. } => "InternalError",
  }
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    tracing::error!(application_error = %self, "Responding with error");
    match self {
      AppError::Auth(m) => HttpResponse::Unauthorized().json(json!({"error": "Unauthorized", "detail": m})),
      AppError::Validation(m) => HttpResponse::BadRequest().json(json!({"error": "ValidationError", "detail": m})),
      AppError::Reconcile { source } => {
        let body = json!({"error": error_code(source), "detail": source.to_string()});
        match source {
          ReconcileError::Validation(_) => HttpResponse::BadRequest().json(body),
          ReconcileError::ProductNotFound { .. } | ReconcileError::OrderNotFound { .. } => {
            HttpResponse::NotFound().json(body)
          }
          ReconcileError::Forbidden => HttpResponse::Forbidden().json(body),
          // Stale client state or a lost submit-time stock check: the
          // client should refresh and retry the new valid action.
          ReconcileError::InsufficientStock { .. } | ReconcileError::InvalidTransition { .. } => {
            HttpResponse::Conflict().json(body)
          }
          ReconcileError::InvalidQuantity { .. } => HttpResponse::UnprocessableEntity().json(body),
          ReconcileError::PaymentVerificationFailed => HttpResponse::BadRequest().json(body),
          ReconcileError::Collaborator { .. } => {
            HttpResponse::InternalServerError().json(json!({"error": "InternalError"}))
          }
        }
      }
      AppError::Sqlx(_) => HttpResponse::InternalServerError().json(json!({"error": "Database operation failed"})),
      AppError::Config(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "Configuration issue", "detail": m}))
      }
      AppError::Internal(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "An internal error occurred", "detail": m}))
      }
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
