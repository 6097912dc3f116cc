//! Adapters for the domain ports: the provider's HTTP API and payment storage.

pub mod http;
pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
