//! Storage backends for the Knot URL shortener.
//!
//! Two implementations of [`knot_core::UrlStore`]: an in-memory store
//! for tests and embedded use, and a MySQL store backed by sqlx.

pub mod memory;
pub mod mysql;

pub use memory::InMemoryStore;
pub use mysql::MySqlStore;
