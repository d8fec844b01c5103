//! Storage layer for the finance tracker
//!
//! Persists the whole store as one versioned JSON blob in a local key-value
//! area. Files are written atomically; unreadable data degrades to an empty
//! in-memory session instead of an error.

pub mod file_io;
pub mod kv;
pub mod snapshot;

pub use file_io::{read_text, write_atomic};
pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use snapshot::{decode, encode, Persistence, StoreState, SCHEMA_VERSION, STORAGE_KEY};
