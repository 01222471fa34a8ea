//! # Payment Error Types
//!
//! Typed error handling for the wirepay payment workflow.
//! All payment operations return `Result<T, PaymentError>`.

use thiserror::Error;
use uuid::Uuid;

/// The store operation a failure originated from.
///
/// Kept in error values for internal diagnostics; callers only see the
/// error class, not the failing statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStep {
    Begin,
    InsertClient,
    InsertBuyer,
    InsertCreditCard,
    InsertPayment,
    FetchPayment,
    Commit,
    Rollback,
}

impl std::fmt::Display for StoreStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StoreStep::Begin => "begin transaction",
            StoreStep::InsertClient => "insert client",
            StoreStep::InsertBuyer => "insert buyer",
            StoreStep::InsertCreditCard => "insert credit card",
            StoreStep::InsertPayment => "insert payment",
            StoreStep::FetchPayment => "fetch payment",
            StoreStep::Commit => "commit transaction",
            StoreStep::Rollback => "rollback transaction",
        };
        f.write_str(name)
    }
}

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing env vars, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data (e.g. credit payment without card details)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Payment type is neither `credit` nor `boleto`
    #[error("Unsupported payment type: {kind}")]
    UnsupportedPaymentType { kind: String },

    /// A store operation failed (connectivity, constraint violation, timeout)
    #[error("Store error during {step}: {message}")]
    Store { step: StoreStep, message: String },

    /// The payment row written in this transaction could not be read back
    #[error("Payment {payment_id} not found on read-back")]
    ReadBackMissing { payment_id: Uuid },

    /// Response serialization failed after commit
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaymentError {
    /// Build a store error from the failing step and its cause.
    pub fn store(step: StoreStep, cause: impl std::fmt::Display) -> Self {
        PaymentError::Store {
            step,
            message: cause.to_string(),
        }
    }

    /// Returns true if this error is retryable.
    ///
    /// Store failures are infrastructure-class and may clear up on retry;
    /// input and consistency errors never will. Note that retrying a
    /// post-commit serialization failure would create a duplicate payment
    /// (no idempotency key exists), so it is reported as non-retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PaymentError::Store { .. })
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::Configuration(_) => 500,
            PaymentError::InvalidRequest(_) => 400,
            PaymentError::UnsupportedPaymentType { .. } => 400,
            PaymentError::Store { .. } => 500,
            PaymentError::ReadBackMissing { .. } => 500,
            PaymentError::Serialization(_) => 500,
            PaymentError::Internal(_) => 500,
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(PaymentError::store(StoreStep::InsertBuyer, "connection reset").is_retryable());
        assert!(!PaymentError::InvalidRequest("bad data".into()).is_retryable());
        assert!(!PaymentError::UnsupportedPaymentType { kind: "pix".into() }.is_retryable());
        assert!(!PaymentError::ReadBackMissing {
            payment_id: Uuid::new_v4()
        }
        .is_retryable());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            PaymentError::InvalidRequest("test".into()).status_code(),
            400
        );
        assert_eq!(
            PaymentError::UnsupportedPaymentType { kind: "pix".into() }.status_code(),
            400
        );
        assert_eq!(
            PaymentError::store(StoreStep::Begin, "pool exhausted").status_code(),
            500
        );
        assert_eq!(
            PaymentError::ReadBackMissing {
                payment_id: Uuid::new_v4()
            }
            .status_code(),
            500
        );
    }

    #[test]
    fn test_store_step_in_message() {
        let err = PaymentError::store(StoreStep::InsertCreditCard, "unique violation");
        assert_eq!(
            err.to_string(),
            "Store error during insert credit card: unique violation"
        );
    }
}
