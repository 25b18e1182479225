//! Saved signatures
//!
//! Signatures drawn during a signing flow can be kept for reuse. The whole
//! collection lives as one JSON array under a single key of a key-value
//! backend and is rewritten in full on every change.

pub mod backend;
pub mod error;
pub mod store;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use error::StoreError;
pub use store::{parse_or_empty, SignatureStore, SIGNATURES_KEY};
