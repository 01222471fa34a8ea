//! # wire-store
//!
//! Persistence adapters for the wirepay payment service.
//!
//! This crate provides two implementations of the `wire_core` store seam:
//! - `PgPaymentStore` — sqlx/Postgres, the production store
//! - `MemoryPaymentStore` — in-memory staging store for tests and local runs
//!
//! The reference schema for the Postgres store is in `db/schema.sql`.

pub mod memory;
pub mod postgres;

pub use memory::MemoryPaymentStore;
pub use postgres::PgPaymentStore;
