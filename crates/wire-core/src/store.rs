//! # Payment Store Traits
//!
//! The seam between the transaction executor and the persistence engine.
//!
//! ## Design Pattern
//!
//! `PaymentStore` hands out scoped units of work (`PaymentTransaction`) that
//! stage the four writes of one request and finish with an explicit
//! `commit` or `rollback` — both consume the transaction, so a finished
//! unit of work cannot be reused. Implementations: Postgres (production),
//! in-memory (tests and local runs).
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  PaymentStore (trait)                   │
//! │  └── begin() -> Box<dyn PaymentTransaction>             │
//! └─────────────────────────────────────────────────────────┘
//!                            ▲
//!              ┌─────────────┴─────────────┐
//!              │                           │
//!      ┌───────┴────────┐         ┌────────┴─────────┐
//!      │ PgPaymentStore │         │MemoryPaymentStore│
//!      │  (wire-store)  │         │   (wire-store)   │
//!      └────────────────┘         └──────────────────┘
//! ```

use crate::error::PaymentResult;
use crate::model::{BuyerDetails, CardDetails, PaymentKind, PaymentRecord, PaymentStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Insert payload for the payments table.
///
/// Built by the executor once the type branch has resolved; the store
/// writes it verbatim.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub amount: f64,
    pub type_payment: PaymentKind,
    pub status_payment: PaymentStatus,
    pub payment_date: Option<DateTime<Utc>>,
    pub buyer_id: Uuid,
    pub credit_card_id: Option<Uuid>,
    pub client_id: Uuid,
}

/// A scoped unit of work covering one payment-creation request.
///
/// All writes issued through one transaction become durable together on
/// `commit` or not at all on `rollback`. Rows staged here are not visible
/// to other transactions before commit.
#[async_trait]
pub trait PaymentTransaction: Send {
    /// Insert an (empty) client row, returning its generated id.
    async fn insert_client(&mut self) -> PaymentResult<Uuid>;

    /// Insert a buyer row, returning its generated id.
    async fn insert_buyer(&mut self, buyer: &BuyerDetails) -> PaymentResult<Uuid>;

    /// Insert a credit-card row, returning its generated id.
    async fn insert_credit_card(&mut self, card: &CardDetails) -> PaymentResult<Uuid>;

    /// Insert a payment row, returning its generated id.
    async fn insert_payment(&mut self, payment: &NewPayment) -> PaymentResult<Uuid>;

    /// Read back a payment row written earlier in this transaction.
    async fn find_payment(&mut self, payment_id: Uuid) -> PaymentResult<Option<PaymentRecord>>;

    /// Make every write in this transaction durable.
    async fn commit(self: Box<Self>) -> PaymentResult<()>;

    /// Discard every write in this transaction.
    async fn rollback(self: Box<Self>) -> PaymentResult<()>;
}

/// Handle to the persistence engine; opens one transaction per request.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Begin a new scoped transaction.
    async fn begin(&self) -> PaymentResult<Box<dyn PaymentTransaction>>;
}

/// Type alias for a shared payment store (dynamic dispatch)
pub type BoxedPaymentStore = Arc<dyn PaymentStore>;
