use crate::graph::GraphError;
use crate::model::{DepartmentId, IdSpace, ProtocolId, SnapshotIssue};
use crate::persist::PersistError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Record addressed by a failed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef {
    Department(DepartmentId),
    Protocol(ProtocolId),
}

impl Display for EntityRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Department(id) => write!(f, "department {id}"),
            Self::Protocol(id) => write!(f, "protocol {id}"),
        }
    }
}

/// Input rejected before any mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyDepartmentName,
    EmptyProtocolTitle,
    /// Protocol references a department that does not exist.
    UnknownDepartment(DepartmentId),
    SelfEdge(DepartmentId),
    /// Replacement snapshot fails integrity checks.
    InvalidSnapshot(SnapshotIssue),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDepartmentName => write!(f, "department name must not be blank"),
            Self::EmptyProtocolTitle => write!(f, "protocol title must not be blank"),
            Self::UnknownDepartment(id) => write!(f, "unknown department: {id}"),
            Self::SelfEdge(id) => write!(f, "department {id} cannot connect to itself"),
            Self::InvalidSnapshot(issue) => write!(f, "invalid snapshot: {issue}"),
        }
    }
}

impl Error for ValidationError {}

/// Error from entity store operations.
#[derive(Debug)]
pub enum StoreError {
    Validation(ValidationError),
    NotFound(EntityRef),
    /// No id is left to assign in this collection.
    IdSpaceExhausted(IdSpace),
    /// Snapshot could not be persisted; live state was not changed.
    Persist(PersistError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(entity) => write!(f, "{entity} not found"),
            Self::IdSpaceExhausted(space) => write!(f, "no {space} ids left to assign"),
            Self::Persist(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) | Self::IdSpaceExhausted(_) => None,
            Self::Persist(err) => Some(err),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<PersistError> for StoreError {
    fn from(value: PersistError) -> Self {
        Self::Persist(value)
    }
}

impl From<GraphError> for StoreError {
    fn from(value: GraphError) -> Self {
        match value {
            GraphError::UnknownDepartment(id) => Self::NotFound(EntityRef::Department(id)),
            GraphError::SelfEdge(id) => Self::Validation(ValidationError::SelfEdge(id)),
        }
    }
}
