// server/src/web/extractors.rs

//! Placeholder identity extractors. Real authentication (sessions, JWTs)
//! is a separate surface; these read trusted headers so the ownership and
//! admin checks in the engine are still exercised end to end.

use actix_web::{FromRequest, HttpRequest};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug)]
pub struct AuthenticatedUser {
  pub user_id: Uuid,
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    if let Some(header) = req.headers().get("X-User-ID") {
      if let Ok(user_id_str) = header.to_str() {
        if let Ok(user_id) = Uuid::parse_str(user_id_str) {
          return futures_util::future::ready(Ok(AuthenticatedUser { user_id }));
        }
      }
    }
    warn!("AuthenticatedUser extractor: Missing or invalid X-User-ID header.");
    futures_util::future::ready(Err(AppError::Auth(
      "User authentication required. Missing or invalid X-User-ID header.".to_string(),
    )))
  }
}

#[derive(Debug)]
pub struct AdminUser {
  pub admin_id: Uuid,
}

impl FromRequest for AdminUser {
  type Error = AppError;
  type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    if let Some(header) = req.headers().get("X-Admin-ID") {
      if let Ok(admin_id_str) = header.to_str() {
        if let Ok(admin_id) = Uuid::parse_str(admin_id_str) {
          return futures_util::future::ready(Ok(AdminUser { admin_id }));
        }
      }
    }
    warn!("AdminUser extractor: Missing or invalid X-Admin-ID header.");
    futures_util::future::ready(Err(AppError::Auth(
      "Admin access required. Missing or invalid X-Admin-ID header.".to_string(),
    )))
  }
}
