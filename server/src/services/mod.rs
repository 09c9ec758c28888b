// server/src/services/mod.rs

//! Collaborator implementations: Postgres-backed catalog and promotions,
//! and the HMAC payment gateway.

pub mod catalog_pg;
pub mod gateway;
pub mod promotions_pg;

pub use catalog_pg::PgCatalog;
pub use gateway::HmacGateway;
pub use promotions_pg::PgPromotions;
