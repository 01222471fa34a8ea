//! # Postgres Payment Store
//!
//! sqlx-backed implementation of the `PaymentStore` seam. Issues the four
//! `INSERT ... RETURNING id` statements and the payment read-back against a
//! pooled Postgres connection, all inside one `sqlx::Transaction` per
//! request. The schema lives in `db/schema.sql`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;
use wire_core::error::{PaymentError, PaymentResult, StoreStep};
use wire_core::model::{BuyerDetails, CardDetails, PaymentRecord};
use wire_core::store::{NewPayment, PaymentStore, PaymentTransaction};

/// Payment store backed by a shared Postgres connection pool.
///
/// The pool is built once at bootstrap and bounds total concurrent store
/// connections; each request borrows one connection for the lifetime of its
/// transaction.
#[derive(Clone)]
pub struct PgPaymentStore {
    pool: PgPool,
}

impl PgPaymentStore {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a new pool and verify the database is reachable.
    pub async fn connect(database_url: &str, max_connections: u32) -> PaymentResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| PaymentError::Configuration(format!("database connect failed: {e}")))?;

        tracing::debug!(max_connections, "connected to postgres");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl PaymentStore for PgPaymentStore {
    async fn begin(&self) -> PaymentResult<Box<dyn PaymentTransaction>> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(store_err(StoreStep::Begin))?;
        Ok(Box::new(PgPaymentTransaction { tx }))
    }
}

struct PgPaymentTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl PaymentTransaction for PgPaymentTransaction {
    async fn insert_client(&mut self) -> PaymentResult<Uuid> {
        // clients carry nothing beyond their generated id
        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO clients DEFAULT VALUES RETURNING id",
        )
        .fetch_one(&mut *self.tx)
        .await
        .map_err(store_err(StoreStep::InsertClient))
    }

    async fn insert_buyer(&mut self, buyer: &BuyerDetails) -> PaymentResult<Uuid> {
        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO buyers (email, name, cpf) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&buyer.email)
        .bind(&buyer.name)
        .bind(&buyer.cpf)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(store_err(StoreStep::InsertBuyer))
    }

    async fn insert_credit_card(&mut self, card: &CardDetails) -> PaymentResult<Uuid> {
        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO credit_cards (number, exp_date, cvv, holder_name) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&card.number)
        .bind(&card.exp_date)
        .bind(&card.cvv)
        .bind(&card.holder_name)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(store_err(StoreStep::InsertCreditCard))
    }

    async fn insert_payment(&mut self, payment: &NewPayment) -> PaymentResult<Uuid> {
        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO payments \
             (amount, type_payment, status_payment, payment_date, buyer_id, credit_card_id, client_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
        )
        .bind(payment.amount)
        .bind(payment.type_payment.as_str())
        .bind(payment.status_payment.as_str())
        .bind(payment.payment_date)
        .bind(payment.buyer_id)
        .bind(payment.credit_card_id)
        .bind(payment.client_id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(store_err(StoreStep::InsertPayment))
    }

    async fn find_payment(&mut self, payment_id: Uuid) -> PaymentResult<Option<PaymentRecord>> {
        let row = sqlx::query_as::<_, PaymentRow>(
            "SELECT id, amount, type_payment, status_payment, payment_date, \
                    buyer_id, client_id, credit_card_id \
             FROM payments WHERE id = $1",
        )
        .bind(payment_id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(store_err(StoreStep::FetchPayment))?;

        row.map(PaymentRecord::try_from).transpose()
    }

    async fn commit(self: Box<Self>) -> PaymentResult<()> {
        self.tx.commit().await.map_err(store_err(StoreStep::Commit))
    }

    async fn rollback(self: Box<Self>) -> PaymentResult<()> {
        self.tx
            .rollback()
            .await
            .map_err(store_err(StoreStep::Rollback))
    }
}

fn store_err(step: StoreStep) -> impl FnOnce(sqlx::Error) -> PaymentError {
    move |e| PaymentError::store(step, e)
}

/// Raw payments row; type and status come back as text and are parsed into
/// the domain enums on conversion.
#[derive(sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    amount: f64,
    type_payment: String,
    status_payment: String,
    payment_date: Option<DateTime<Utc>>,
    buyer_id: Uuid,
    client_id: Uuid,
    credit_card_id: Option<Uuid>,
}

impl TryFrom<PaymentRow> for PaymentRecord {
    type Error = PaymentError;

    fn try_from(row: PaymentRow) -> PaymentResult<Self> {
        Ok(PaymentRecord {
            id: row.id,
            amount: row.amount,
            type_payment: row.type_payment.parse().map_err(|_| {
                PaymentError::Internal(format!(
                    "unknown payment type in store: {}",
                    row.type_payment
                ))
            })?,
            status_payment: row.status_payment.parse()?,
            payment_date: row.payment_date,
            buyer_id: row.buyer_id,
            client_id: row.client_id,
            credit_card_id: row.credit_card_id,
        })
    }
}
