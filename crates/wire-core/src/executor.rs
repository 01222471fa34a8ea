//! # Payment Transaction Executor
//!
//! Runs the payment-creation workflow: one scoped store transaction that
//! inserts a client, a buyer, optionally a credit card, and the payment
//! itself, then reads the payment back and commits.
//!
//! The executor owns the transaction discipline: the commit is explicit on
//! the success path, and every failure path rolls back explicitly before the
//! error propagates. There is no retry loop and no intermediate state; the
//! store transaction is the sole concurrency-control mechanism.

use crate::error::{PaymentError, PaymentResult};
use crate::model::{PaymentKind, PaymentRecord, PaymentRequest};
use crate::store::{BoxedPaymentStore, NewPayment, PaymentTransaction};
use chrono::Utc;
use tracing::{error, info};

/// Executes payment-creation requests against an injected store.
///
/// Constructed once at bootstrap with its store handle; holds no other
/// state, so a single instance serves any number of concurrent requests.
#[derive(Clone)]
pub struct PaymentExecutor {
    store: BoxedPaymentStore,
}

impl PaymentExecutor {
    pub fn new(store: BoxedPaymentStore) -> Self {
        Self { store }
    }

    /// Create a payment from a decoded request.
    ///
    /// Validates the payment type and card presence before touching the
    /// store, then runs the insert sequence inside one transaction. On any
    /// store failure the transaction is rolled back and the original error
    /// is returned; a failed rollback is logged, never escalated.
    pub async fn create_payment(&self, request: &PaymentRequest) -> PaymentResult<PaymentRecord> {
        let kind = request.payment.kind()?;
        if kind == PaymentKind::Credit && request.payment.card.is_none() {
            return Err(PaymentError::InvalidRequest(
                "card details are required for credit payments".to_string(),
            ));
        }

        let mut tx = self.store.begin().await?;

        match Self::run_workflow(tx.as_mut(), request, kind).await {
            Ok(payment) => {
                tx.commit().await?;
                info!(
                    payment_id = %payment.id,
                    type_payment = %payment.type_payment,
                    status_payment = %payment.status_payment,
                    amount = payment.amount,
                    "payment created"
                );
                Ok(payment)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    error!(error = %rollback_err, "failed to roll back payment transaction");
                }
                Err(err)
            }
        }
    }

    /// The insert sequence proper. Strictly ordered: each step feeds the
    /// identifier of the previous one into the next insert.
    async fn run_workflow(
        tx: &mut dyn PaymentTransaction,
        request: &PaymentRequest,
        kind: PaymentKind,
    ) -> PaymentResult<PaymentRecord> {
        let client_id = tx.insert_client().await?;
        let buyer_id = tx.insert_buyer(&request.buyer).await?;

        let new_payment = match kind {
            PaymentKind::Credit => {
                // Presence was validated before the transaction opened
                let card = request.payment.card.as_ref().ok_or_else(|| {
                    PaymentError::InvalidRequest(
                        "card details are required for credit payments".to_string(),
                    )
                })?;
                let credit_card_id = tx.insert_credit_card(card).await?;

                NewPayment {
                    amount: request.payment.amount,
                    type_payment: kind,
                    status_payment: kind.initial_status(),
                    payment_date: Some(Utc::now()),
                    buyer_id,
                    credit_card_id: Some(credit_card_id),
                    client_id,
                }
            }
            PaymentKind::Boleto => NewPayment {
                amount: request.payment.amount,
                type_payment: kind,
                status_payment: kind.initial_status(),
                payment_date: None,
                buyer_id,
                credit_card_id: None,
                client_id,
            },
        };

        let payment_id = tx.insert_payment(&new_payment).await?;

        tx.find_payment(payment_id)
            .await?
            .ok_or(PaymentError::ReadBackMissing { payment_id })
    }
}
