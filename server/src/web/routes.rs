// server/src/web/routes.rs

use actix_web::web;

use crate::state::AppState;

// Liveness check; extend with DB connectivity if a readiness endpoint
// becomes necessary.
async fn health_check_handler(app_state: web::Data<AppState>) -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({
    "status": "ok",
    "store": app_state.config.store_name,
  }))
}

// Called in `main.rs` to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  use crate::web::handlers::{admin_handlers, order_handlers, payment_handlers};

  cfg.service(
    web::scope("/api/v1")
      // Health Check Route
      .route("/health", web::get().to(health_check_handler))
      // Customer order routes
      .service(
        web::scope("/orders")
          .route("", web::post().to(order_handlers::submit_order_handler))
          .route("", web::get().to(order_handlers::list_my_orders_handler))
          .route("/{order_id}", web::get().to(order_handlers::get_order_handler))
          .route("/{order_id}/cancel", web::put().to(order_handlers::cancel_order_handler)),
      )
      // Admin review and fulfillment routes
      .service(
        web::scope("/admin/orders")
          .route("", web::get().to(admin_handlers::list_all_orders_handler))
          .route("/{order_id}", web::get().to(admin_handlers::get_order_admin_handler))
          .route("/{order_id}/review", web::put().to(admin_handlers::review_order_handler))
          .route("/{order_id}/status", web::put().to(admin_handlers::update_fulfillment_handler)),
      )
      // Payment routes
      .service(
        web::scope("/payment")
          .route(
            "/create-order/{order_id}",
            web::post().to(payment_handlers::create_payment_order_handler),
          )
          .route("/verify/{order_id}", web::post().to(payment_handlers::verify_payment_handler)),
      ),
  );
}
