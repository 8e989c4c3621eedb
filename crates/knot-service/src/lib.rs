//! URL shortening service implementation.
//!
//! This crate provides [`UrlService`], the orchestration layer that
//! validates input, derives base-62 short codes from predicted ids, and
//! exposes the lookup operations. Core types are re-exported from
//! `knot_core`.

pub mod error;
pub mod service;

pub use error::{Result, ServiceError};
pub use service::UrlService;
