//! Department domain model.
//!
//! A department is one node of the relationship graph. Its `connections`
//! list is the adjacency list for that node.

use serde::{Deserialize, Serialize};

/// Stable identifier for a department within one store.
pub type DepartmentId = i64;

/// Organizational unit and graph node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    /// Ids of departments this one has an edge to, in insertion order.
    #[serde(default)]
    pub connections: Vec<DepartmentId>,
}

impl Department {
    /// Creates a department with no connections.
    pub fn new(id: DepartmentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            connections: Vec::new(),
        }
    }

    /// Returns whether `other` appears in this department's adjacency list.
    pub fn is_connected_to(&self, other: DepartmentId) -> bool {
        self.connections.contains(&other)
    }
}
