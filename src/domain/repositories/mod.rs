//! Repository trait definitions for the domain layer.
//!
//! # Architecture
//!
//! - [`KeyValueStore`] is the storage contract, implemented in
//!   `crate::infrastructure::persistence`
//! - [`LinkStore`] encodes the link collection on top of any store
//! - Mock implementations are auto-generated via `mockall` for testing

pub mod kv_store;
pub mod link_store;

pub use kv_store::{KeyValueStore, StoreError};
pub use link_store::{DEFAULT_STORAGE_KEY, LinkStore};

#[cfg(test)]
pub use kv_store::MockKeyValueStore;
