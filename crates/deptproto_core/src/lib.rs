//! Core domain logic for the department protocol catalog.
//! This crate is the single source of truth for entity and graph invariants.

pub mod config;
pub mod db;
pub mod graph;
pub mod logging;
pub mod model;
pub mod persist;
pub mod search;
pub mod store;

pub use config::StoreConfig;
pub use graph::{EdgeChange, GraphError, RelationshipGraph};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{
    default_seed, normalize_list, normalize_tags, Department, DepartmentId, IdSpace, Protocol,
    ProtocolId, Snapshot, SnapshotIssue,
};
pub use persist::{
    CorruptStateError, KeyValueStore, MemoryKeyValueStore, PersistError, PersistenceAdapter,
    SqliteKeyValueStore, StorageError, DEFAULT_RECORD_KEY,
};
pub use search::filter::{filter_protocols, ProtocolQuery};
pub use store::{
    DepartmentPatch, EntityRef, EntityStore, NewProtocol, ProtocolPatch, StoreError, StoreResult,
    ValidationError,
};

use rusqlite::Connection;

/// Opens the SQLite database named by `config` and applies migrations.
///
/// Logging is not started here; call [`init_logging`] with
/// `config.log_level` / `config.log_dir` beforehand when file logs are
/// wanted.
pub fn open_connection(config: &StoreConfig) -> StoreResult<Connection> {
    db::open_db(&config.db_path)
        .map_err(|err| StoreError::Persist(PersistError::Storage(err.into())))
}

/// Binds an entity store to `conn`, loading persisted state or `seed`.
pub fn open_store<'conn>(
    conn: &'conn Connection,
    config: &StoreConfig,
    seed: &Snapshot,
) -> StoreResult<EntityStore<SqliteKeyValueStore<'conn>>> {
    let backend = SqliteKeyValueStore::try_new(conn).map_err(PersistError::Storage)?;
    let persistence = PersistenceAdapter::with_key(backend, config.record_key.clone());
    EntityStore::open(persistence, seed)
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
