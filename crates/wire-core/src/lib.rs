//! # wire-core
//!
//! Core types and traits for the wirepay payment service.
//!
//! This crate provides:
//! - `PaymentExecutor` for the payment-creation transaction workflow
//! - `PaymentStore` / `PaymentTransaction` traits for persistence adapters
//! - `PaymentRequest`, `PaymentRecord` and friends for the wire contract
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wire_core::{PaymentExecutor, PaymentRequest};
//!
//! // The store is injected; Postgres in production, in-memory in tests.
//! let executor = PaymentExecutor::new(Arc::new(store));
//!
//! // One call runs the whole workflow: client, buyer, optional card and
//! // payment inserts plus read-back, inside a single transaction.
//! let payment = executor.create_payment(&request).await?;
//! println!("created payment {}", payment.id);
//! ```

pub mod error;
pub mod executor;
pub mod model;
pub mod store;

// Re-exports for convenience
pub use error::{PaymentError, PaymentResult, StoreStep};
pub use executor::PaymentExecutor;
pub use model::{
    BuyerDetails, CardDetails, ClientRef, PaymentDetails, PaymentKind, PaymentRecord,
    PaymentRequest, PaymentStatus,
};
pub use store::{BoxedPaymentStore, NewPayment, PaymentStore, PaymentTransaction};
