// server/src/models/mod.rs

//! Row types for the catalog-side tables. Orders themselves live in the
//! `reconcile` crate; the store module maps them to and from SQL.

pub mod product;
pub mod promotion;

pub use product::Product;
pub use promotion::Promotion;
