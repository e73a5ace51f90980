//! Symmetric edge mutation over an owned department collection.

use crate::model::{Department, DepartmentId};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Edge mutation rejected before touching any adjacency list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    UnknownDepartment(DepartmentId),
    SelfEdge(DepartmentId),
}

impl Display for GraphError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownDepartment(id) => write!(f, "department not found: {id}"),
            Self::SelfEdge(id) => write!(f, "department {id} cannot connect to itself"),
        }
    }
}

impl Error for GraphError {}

/// Outcome of one toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeChange {
    Added,
    Removed,
}

/// Adds or removes the edge `a ↔ b` on both sides.
///
/// The initiating side decides the direction: if `b` is listed by `a` the
/// edge is removed from both lists, otherwise it is appended to both lists.
/// Existing entries are never duplicated, so a one-sided edge loaded from
/// older data becomes symmetric on its next toggle.
pub fn toggle_edge(
    departments: &mut [Department],
    a: DepartmentId,
    b: DepartmentId,
) -> Result<EdgeChange, GraphError> {
    if a == b {
        return Err(GraphError::SelfEdge(a));
    }
    let a_index = index_of(departments, a)?;
    let b_index = index_of(departments, b)?;

    if departments[a_index].is_connected_to(b) {
        departments[a_index].connections.retain(|id| *id != b);
        departments[b_index].connections.retain(|id| *id != a);
        Ok(EdgeChange::Removed)
    } else {
        departments[a_index].connections.push(b);
        if !departments[b_index].is_connected_to(a) {
            departments[b_index].connections.push(a);
        }
        Ok(EdgeChange::Added)
    }
}

/// Removes every reference to `id` from other departments' adjacency lists.
///
/// Returns how many departments were changed.
pub fn detach_department(departments: &mut [Department], id: DepartmentId) -> usize {
    let mut changed = 0;
    for dept in departments.iter_mut() {
        let before = dept.connections.len();
        dept.connections.retain(|target| *target != id);
        if dept.connections.len() != before {
            changed += 1;
        }
    }
    changed
}

/// Drops connection ids that do not resolve, self references, and
/// duplicate entries.
///
/// Returns how many entries were removed.
pub fn prune_dangling(departments: &mut [Department]) -> usize {
    let known: HashSet<DepartmentId> = departments.iter().map(|dept| dept.id).collect();
    let mut removed = 0;
    for dept in departments.iter_mut() {
        let own_id = dept.id;
        let mut seen = HashSet::new();
        let before = dept.connections.len();
        dept.connections
            .retain(|target| *target != own_id && known.contains(target) && seen.insert(*target));
        removed += before - dept.connections.len();
    }
    removed
}

fn index_of(departments: &[Department], id: DepartmentId) -> Result<usize, GraphError> {
    departments
        .iter()
        .position(|dept| dept.id == id)
        .ok_or(GraphError::UnknownDepartment(id))
}
