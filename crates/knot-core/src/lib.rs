//! Core types and traits for the Knot URL shortener.
//!
//! This crate provides the domain model, the base-62 short code codec,
//! validation limits, and the store trait shared by the storage backends
//! and the service layer.

pub mod base62;
pub mod error;
pub mod record;
pub mod store;

pub use error::{CoreError, StoreError};
pub use record::{Limits, NewUrlRecord, UrlRecord};
pub use store::UrlStore;
