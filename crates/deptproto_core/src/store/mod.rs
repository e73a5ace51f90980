//! Entity store: canonical department/protocol collections.
//!
//! # Responsibility
//! - Own create/update/delete with referential integrity and cascades.
//! - Persist a full snapshot after every successful mutation.
//!
//! # Invariants
//! - Mutations apply to a working copy that replaces live state only after
//!   the save succeeds; a failed call leaves live state untouched.
//! - Ids come from per-store monotonic counters and are never reused.
//! - Deleting a department removes its edges and every protocol it owns.

mod entity_store;
mod error;
mod input;

pub use entity_store::EntityStore;
pub use error::{EntityRef, StoreError, StoreResult, ValidationError};
pub use input::{DepartmentPatch, NewProtocol, ProtocolPatch};
