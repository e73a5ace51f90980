//! Read-only graph view borrowed from the department collection.

use crate::model::{Department, DepartmentId};
use std::collections::HashSet;

/// Borrowed view over departments as graph nodes.
#[derive(Debug, Clone, Copy)]
pub struct RelationshipGraph<'a> {
    departments: &'a [Department],
}

impl<'a> RelationshipGraph<'a> {
    pub fn new(departments: &'a [Department]) -> Self {
        Self { departments }
    }

    pub fn node(&self, id: DepartmentId) -> Option<&'a Department> {
        self.departments.iter().find(|dept| dept.id == id)
    }

    /// Resolves the adjacency list of `id` in stored order.
    ///
    /// Unknown `id` yields an empty list; dangling connection ids are skipped.
    pub fn neighbors(&self, id: DepartmentId) -> Vec<&'a Department> {
        let Some(dept) = self.node(id) else {
            return Vec::new();
        };
        dept.connections
            .iter()
            .filter_map(|target| self.node(*target))
            .collect()
    }

    /// Returns whether either side lists the other.
    pub fn has_edge(&self, a: DepartmentId, b: DepartmentId) -> bool {
        let forward = self.node(a).is_some_and(|dept| dept.is_connected_to(b));
        let backward = self.node(b).is_some_and(|dept| dept.is_connected_to(a));
        forward || backward
    }

    /// Lists every resolvable edge once as `(low, high)`, in first-seen order.
    pub fn edges(&self) -> Vec<(DepartmentId, DepartmentId)> {
        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        for dept in self.departments {
            for target in &dept.connections {
                if self.node(*target).is_none() {
                    continue;
                }
                let pair = (dept.id.min(*target), dept.id.max(*target));
                if seen.insert(pair) {
                    edges.push(pair);
                }
            }
        }
        edges
    }
}
