//! # In-Memory Payment Store
//!
//! A thread-safe in-memory implementation of the `PaymentStore` seam.
//! Writes are staged per transaction and only published to the shared
//! tables on commit, so the atomicity discipline of the executor can be
//! exercised without a running Postgres.
//!
//! Supports injecting a failure at a chosen `StoreStep`, which the
//! integration tests use to prove transaction-wide rollback.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;
use wire_core::error::{PaymentError, PaymentResult, StoreStep};
use wire_core::model::{BuyerDetails, CardDetails, PaymentRecord};
use wire_core::store::{NewPayment, PaymentStore, PaymentTransaction};

#[derive(Default)]
struct Tables {
    clients: Vec<Uuid>,
    buyers: HashMap<Uuid, BuyerDetails>,
    credit_cards: HashMap<Uuid, CardDetails>,
    payments: HashMap<Uuid, PaymentRecord>,
}

impl Tables {
    fn merge(&mut self, staged: Tables) {
        self.clients.extend(staged.clients);
        self.buyers.extend(staged.buyers);
        self.credit_cards.extend(staged.credit_cards);
        self.payments.extend(staged.payments);
    }
}

/// A thread-safe in-memory payment store.
///
/// Uses `Arc<RwLock<..>>` for shared concurrent access. Ideal for tests and
/// local runs where persistence is not required.
#[derive(Default, Clone)]
pub struct MemoryPaymentStore {
    tables: Arc<RwLock<Tables>>,
    fail_at: Option<StoreStep>,
}

impl MemoryPaymentStore {
    /// Creates a new, empty in-memory payment store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that fails every operation at the given step.
    pub fn failing_at(step: StoreStep) -> Self {
        Self {
            tables: Arc::default(),
            fail_at: Some(step),
        }
    }

    /// Number of committed payment rows.
    pub async fn payment_count(&self) -> usize {
        self.tables.read().await.payments.len()
    }

    /// Number of committed buyer rows.
    pub async fn buyer_count(&self) -> usize {
        self.tables.read().await.buyers.len()
    }

    /// Number of committed client rows.
    pub async fn client_count(&self) -> usize {
        self.tables.read().await.clients.len()
    }

    /// Number of committed credit-card rows.
    pub async fn credit_card_count(&self) -> usize {
        self.tables.read().await.credit_cards.len()
    }

    /// Fetch a committed payment row.
    pub async fn committed_payment(&self, payment_id: Uuid) -> Option<PaymentRecord> {
        self.tables.read().await.payments.get(&payment_id).cloned()
    }
}

#[async_trait]
impl PaymentStore for MemoryPaymentStore {
    async fn begin(&self) -> PaymentResult<Box<dyn PaymentTransaction>> {
        if self.fail_at == Some(StoreStep::Begin) {
            return Err(PaymentError::store(StoreStep::Begin, "injected failure"));
        }
        Ok(Box::new(MemoryTransaction {
            tables: Arc::clone(&self.tables),
            staged: Tables::default(),
            fail_at: self.fail_at,
        }))
    }
}

struct MemoryTransaction {
    tables: Arc<RwLock<Tables>>,
    staged: Tables,
    fail_at: Option<StoreStep>,
}

impl MemoryTransaction {
    fn check(&self, step: StoreStep) -> PaymentResult<()> {
        if self.fail_at == Some(step) {
            return Err(PaymentError::store(step, "injected failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl PaymentTransaction for MemoryTransaction {
    async fn insert_client(&mut self) -> PaymentResult<Uuid> {
        self.check(StoreStep::InsertClient)?;
        let id = Uuid::new_v4();
        self.staged.clients.push(id);
        Ok(id)
    }

    async fn insert_buyer(&mut self, buyer: &BuyerDetails) -> PaymentResult<Uuid> {
        self.check(StoreStep::InsertBuyer)?;
        let id = Uuid::new_v4();
        self.staged.buyers.insert(id, buyer.clone());
        Ok(id)
    }

    async fn insert_credit_card(&mut self, card: &CardDetails) -> PaymentResult<Uuid> {
        self.check(StoreStep::InsertCreditCard)?;
        let id = Uuid::new_v4();
        self.staged.credit_cards.insert(id, card.clone());
        Ok(id)
    }

    async fn insert_payment(&mut self, payment: &NewPayment) -> PaymentResult<Uuid> {
        self.check(StoreStep::InsertPayment)?;
        let id = Uuid::new_v4();
        self.staged.payments.insert(
            id,
            PaymentRecord {
                id,
                amount: payment.amount,
                type_payment: payment.type_payment,
                status_payment: payment.status_payment,
                payment_date: payment.payment_date,
                buyer_id: payment.buyer_id,
                client_id: payment.client_id,
                credit_card_id: payment.credit_card_id,
            },
        );
        Ok(id)
    }

    async fn find_payment(&mut self, payment_id: Uuid) -> PaymentResult<Option<PaymentRecord>> {
        self.check(StoreStep::FetchPayment)?;
        // staged rows are visible within their own transaction only
        Ok(self.staged.payments.get(&payment_id).cloned())
    }

    async fn commit(self: Box<Self>) -> PaymentResult<()> {
        self.check(StoreStep::Commit)?;
        self.tables.write().await.merge(self.staged);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> PaymentResult<()> {
        self.check(StoreStep::Rollback)?;
        // staged writes are simply dropped
        Ok(())
    }
}
