//! Domain model for departments, protocols, and persisted snapshots.
//!
//! # Responsibility
//! - Define canonical records shared by store, graph, search and persistence.
//! - Own comma-list normalization used for protocol steps and tags.
//!
//! # Invariants
//! - Department and protocol ids are unique within their collection.
//! - Every protocol references an existing department.
//! - Edge intent is undirected; symmetry is enforced by mutation code.

pub mod department;
pub mod protocol;
pub mod snapshot;

pub use department::{Department, DepartmentId};
pub use protocol::{normalize_list, normalize_tags, Protocol, ProtocolId};
pub use snapshot::{default_seed, IdSpace, Snapshot, SnapshotIssue};
