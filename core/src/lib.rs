// core/src/lib.rs

//! Reconcile: the order lifecycle and partial-fulfillment engine.
//!
//! The engine owns the rules governing how a submitted order moves through
//! `pending -> (accepted | partially_accepted | rejected | cancelled)`,
//! through payment, and into fulfillment, including the arithmetic that
//! recomputes the payable total when an admin accepts only some line
//! items. Catalog lookups, promotion resolution, payment verification, and
//! persistence are injected collaborators; the transitions themselves are
//! pure and either commit fully or leave the order untouched.

pub mod catalog;
pub mod error;
pub mod order;
pub mod payment;
pub mod promotion;
pub mod review;
pub mod service;
pub mod store;

// --- Re-exports for the public API ---

pub use crate::catalog::{Catalog, ProductQuote};
pub use crate::error::{ReconcileError, ReconcileResult};
pub use crate::order::{accepted_total_cents, LineReview, Order, OrderLine, OrderStatus, PaymentStatus};
pub use crate::payment::{PaymentAttempt, PaymentGateway, PaymentIntent};
pub use crate::promotion::{NoPromotions, Promotions};
pub use crate::review::{DecisionStatus, LineDecision, ReviewAction};
pub use crate::service::{OrderSubmission, Reconciler, SubmitItem};
pub use crate::store::{MemoryOrderStore, OrderStore};
