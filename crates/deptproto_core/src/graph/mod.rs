//! Department relationship graph.
//!
//! # Responsibility
//! - Read views over the department collection (neighbors, edge listing).
//! - Edge mutation helpers that keep both adjacency lists in sync.
//!
//! # Invariants
//! - After any toggle, `b ∈ a.connections ⇔ a ∈ b.connections`.
//! - Read paths never mutate and silently skip ids that do not resolve.
//! - No department is connected to itself.

mod edges;
mod view;

pub use edges::{detach_department, prune_dangling, toggle_edge, EdgeChange, GraphError};
pub use view::RelationshipGraph;
