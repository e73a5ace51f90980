//! Full department/protocol state as one persistable unit.
//!
//! # Responsibility
//! - Carry both collections together for save, load and reset.
//! - Check referential integrity of state that did not come from the store.
//! - Provide the default seed used when no valid persisted state exists.

use super::department::{Department, DepartmentId};
use super::protocol::{Protocol, ProtocolId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

/// Both entity collections, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default)]
    pub protocols: Vec<Protocol>,
}

/// Collection an id counter belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdSpace {
    Department,
    Protocol,
}

impl Display for IdSpace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Department => write!(f, "department"),
            Self::Protocol => write!(f, "protocol"),
        }
    }
}

/// First integrity violation found in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotIssue {
    DuplicateDepartmentId(DepartmentId),
    DuplicateProtocolId(ProtocolId),
    /// Protocol references a department that is not in the snapshot.
    OrphanedProtocol {
        protocol_id: ProtocolId,
        department_id: DepartmentId,
    },
    /// The largest id is `i64::MAX`, so no further id can be assigned.
    IdSpaceExhausted(IdSpace),
}

impl Display for SnapshotIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateDepartmentId(id) => write!(f, "duplicate department id {id}"),
            Self::DuplicateProtocolId(id) => write!(f, "duplicate protocol id {id}"),
            Self::OrphanedProtocol {
                protocol_id,
                department_id,
            } => write!(
                f,
                "protocol {protocol_id} references missing department {department_id}"
            ),
            Self::IdSpaceExhausted(space) => write!(f, "{space} ids are exhausted"),
        }
    }
}

impl Snapshot {
    pub fn new(departments: Vec<Department>, protocols: Vec<Protocol>) -> Self {
        Self {
            departments,
            protocols,
        }
    }

    pub fn department(&self, id: DepartmentId) -> Option<&Department> {
        self.departments.iter().find(|dept| dept.id == id)
    }

    pub fn protocol(&self, id: ProtocolId) -> Option<&Protocol> {
        self.protocols.iter().find(|protocol| protocol.id == id)
    }

    pub fn contains_department(&self, id: DepartmentId) -> bool {
        self.department(id).is_some()
    }

    /// Checks id uniqueness, protocol ownership and id headroom.
    ///
    /// Dangling connection ids are not reported here; graph reads skip them.
    pub fn check_integrity(&self) -> Result<(), SnapshotIssue> {
        let mut department_ids = HashSet::with_capacity(self.departments.len());
        for dept in &self.departments {
            if !department_ids.insert(dept.id) {
                return Err(SnapshotIssue::DuplicateDepartmentId(dept.id));
            }
        }

        let mut protocol_ids = HashSet::with_capacity(self.protocols.len());
        for protocol in &self.protocols {
            if !protocol_ids.insert(protocol.id) {
                return Err(SnapshotIssue::DuplicateProtocolId(protocol.id));
            }
            if !department_ids.contains(&protocol.department_id) {
                return Err(SnapshotIssue::OrphanedProtocol {
                    protocol_id: protocol.id,
                    department_id: protocol.department_id,
                });
            }
        }

        if self.next_department_id().is_none() {
            return Err(SnapshotIssue::IdSpaceExhausted(IdSpace::Department));
        }
        if self.next_protocol_id().is_none() {
            return Err(SnapshotIssue::IdSpaceExhausted(IdSpace::Protocol));
        }

        Ok(())
    }

    /// Removes protocols whose department is not in the snapshot.
    ///
    /// Returns how many protocols were removed.
    pub fn drop_orphaned_protocols(&mut self) -> usize {
        let department_ids: HashSet<DepartmentId> =
            self.departments.iter().map(|dept| dept.id).collect();
        let before = self.protocols.len();
        self.protocols
            .retain(|protocol| department_ids.contains(&protocol.department_id));
        before - self.protocols.len()
    }

    /// Smallest department id greater than every id in the snapshot, or
    /// `None` when that would overflow.
    pub fn next_department_id(&self) -> Option<DepartmentId> {
        next_after(self.departments.iter().map(|dept| dept.id))
    }

    /// Smallest protocol id greater than every id in the snapshot, or `None`
    /// when that would overflow.
    pub fn next_protocol_id(&self) -> Option<ProtocolId> {
        next_after(self.protocols.iter().map(|protocol| protocol.id))
    }
}

fn next_after(ids: impl Iterator<Item = i64>) -> Option<i64> {
    ids.max().map_or(Some(1), |max| max.checked_add(1))
}

/// Default catalog: three connected departments with one protocol each.
pub fn default_seed() -> Snapshot {
    let departments = vec![
        Department {
            id: 1,
            name: "HR".to_string(),
            connections: vec![2],
        },
        Department {
            id: 2,
            name: "IT".to_string(),
            connections: vec![1, 3],
        },
        Department {
            id: 3,
            name: "Operations".to_string(),
            connections: vec![2],
        },
    ];

    let protocols = vec![
        seed_protocol(
            1,
            "Onboarding Process",
            "Steps for bringing a new hire into the company",
            &["Collect documents", "Set up IT accounts", "Orientation session"],
            &["hiring", "new employee"],
            1,
        ),
        seed_protocol(
            2,
            "Password Reset",
            "Procedure for assisting employees with forgotten passwords",
            &["Verify identity", "Reset in admin portal", "Notify employee"],
            &["IT", "security"],
            2,
        ),
        seed_protocol(
            3,
            "Supply Request",
            "How to request new office supplies",
            &["Fill form", "Manager approval", "Ops fulfillment"],
            &["operations", "office"],
            3,
        ),
    ];

    Snapshot::new(departments, protocols)
}

fn seed_protocol(
    id: ProtocolId,
    title: &str,
    summary: &str,
    steps: &[&str],
    tags: &[&str],
    department_id: DepartmentId,
) -> Protocol {
    Protocol {
        id,
        title: title.to_string(),
        summary: summary.to_string(),
        steps: steps.iter().map(|step| step.to_string()).collect(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        department_id,
    }
}
