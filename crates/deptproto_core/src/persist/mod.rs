//! Snapshot persistence over a key-value record store.
//!
//! # Responsibility
//! - Define the key-value backend contract and its SQLite/in-memory
//!   implementations.
//! - Serialize the full snapshot as one JSON record under one fixed key.
//! - Own the load-or-seed startup policy.
//!
//! # Invariants
//! - A record that is present but unusable is `CorruptStateError`, and
//!   startup recovers from it by writing the seed.
//! - Storage failures are returned to the caller, never swallowed.

mod adapter;
mod error;
mod kv;

pub use adapter::{PersistenceAdapter, DEFAULT_RECORD_KEY};
pub use error::{CorruptStateError, PersistError, PersistResult, StorageError};
pub use kv::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
