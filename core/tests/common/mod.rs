// tests/common/mod.rs
#![allow(dead_code)] // Allow unused helpers in this common test module

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::Level;
use uuid::Uuid;

use reconcile::{
  Catalog, MemoryOrderStore, Order, OrderSubmission, PaymentAttempt, PaymentGateway, PaymentIntent, ProductQuote,
  Promotions, ReconcileResult, Reconciler, SubmitItem,
};

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Mock collaborators ---

/// Fixed catalog: products and quotes are handed to the constructor.
pub struct StaticCatalog {
  products: HashMap<Uuid, ProductQuote>,
}

impl StaticCatalog {
  pub fn new(products: &[(Uuid, ProductQuote)]) -> Self {
    Self {
      products: products.iter().copied().collect(),
    }
  }
}

#[async_trait]
impl Catalog for StaticCatalog {
  async fn quote(&self, product_id: Uuid) -> ReconcileResult<Option<ProductQuote>> {
    Ok(self.products.get(&product_id).copied())
  }
}

/// One valid code with a fixed flat discount.
pub struct SingleCodePromotions {
  pub code: &'static str,
  pub discount_cents: i64,
}

#[async_trait]
impl Promotions for SingleCodePromotions {
  async fn discount_for(&self, code: &str, _subtotal_cents: i64) -> ReconcileResult<Option<i64>> {
    Ok((code == self.code).then_some(self.discount_cents))
  }
}

/// Deterministic gateway: the valid signature for an attempt is derived
/// from the key and the order/payment ids, so tests can forge both good
/// and tampered triples.
pub struct MockGateway {
  key: &'static str,
}

impl MockGateway {
  pub fn new(key: &'static str) -> Self {
    Self { key }
  }

  pub fn sign(&self, gateway_order_id: &str, gateway_payment_id: &str) -> String {
    format!("sig:{}:{}:{}", self.key, gateway_order_id, gateway_payment_id)
  }
}

#[async_trait]
impl PaymentGateway for MockGateway {
  async fn create_intent(&self, order: &Order) -> ReconcileResult<PaymentIntent> {
    Ok(PaymentIntent {
      gateway_order_id: format!("mock_order_{}", Uuid::new_v4().simple()),
      amount_cents: order.total_amount_cents,
      currency: "INR".to_string(),
      key_id: "mock_key".to_string(),
    })
  }

  async fn verify(&self, attempt: &PaymentAttempt) -> ReconcileResult<bool> {
    Ok(attempt.signature == self.sign(&attempt.gateway_order_id, &attempt.gateway_payment_id))
  }
}

// --- Fixture assembly ---

pub const GATEWAY_KEY: &str = "test_gateway_key";
pub const PROMO_CODE: &str = "WELCOME50";
pub const PROMO_DISCOUNT_CENTS: i64 = 50;

pub struct Fixture {
  pub reconciler: Reconciler,
  pub store: Arc<MemoryOrderStore>,
  pub gateway: Arc<MockGateway>,
  /// Product ids in catalog order.
  pub product_ids: Vec<Uuid>,
}

/// A reconciler over an in-memory store with the given catalog entries
/// (`(price_cents, stock)` pairs, one product each).
pub fn fixture(catalog_entries: &[(i64, u32)]) -> Fixture {
  let products: Vec<(Uuid, ProductQuote)> = catalog_entries
    .iter()
    .map(|&(unit_price_cents, stock)| (Uuid::new_v4(), ProductQuote { unit_price_cents, stock }))
    .collect();
  let product_ids = products.iter().map(|(id, _)| *id).collect();

  let store = Arc::new(MemoryOrderStore::new());
  let gateway = Arc::new(MockGateway::new(GATEWAY_KEY));
  let reconciler = Reconciler::new(
    Arc::new(StaticCatalog::new(&products)),
    Arc::new(SingleCodePromotions {
      code: PROMO_CODE,
      discount_cents: PROMO_DISCOUNT_CENTS,
    }),
    gateway.clone(),
    store.clone(),
  );
  Fixture {
    reconciler,
    store,
    gateway,
    product_ids,
  }
}

/// Submission taking one unit of each catalog product.
pub fn one_of_each(fixture: &Fixture, customer_id: Uuid) -> OrderSubmission {
  OrderSubmission {
    customer_id,
    items: fixture
      .product_ids
      .iter()
      .map(|&product_id| SubmitItem { product_id, quantity: 1 })
      .collect(),
    shipping_address: "14 Jewel Lane, Mumbai".to_string(),
    phone: "+91-9876543210".to_string(),
    payment_method: None,
    promotion_code: None,
  }
}
