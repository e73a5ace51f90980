use crate::db::DbError;
use crate::model::SnapshotIssue;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PersistResult<T> = Result<T, PersistError>;

/// Key-value backend failure.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    /// Backend-specific failure from a non-SQLite implementation.
    Backend(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Backend(message) => write!(f, "storage backend failure: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Backend(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persisted record exists but cannot become a valid snapshot.
#[derive(Debug)]
pub enum CorruptStateError {
    Unparsable(serde_json::Error),
    Invalid(SnapshotIssue),
}

impl Display for CorruptStateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unparsable(err) => write!(f, "persisted state is not valid JSON: {err}"),
            Self::Invalid(issue) => write!(f, "persisted state violates integrity: {issue}"),
        }
    }
}

impl Error for CorruptStateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unparsable(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

/// Error from snapshot load/save operations.
#[derive(Debug)]
pub enum PersistError {
    Corrupt(CorruptStateError),
    Storage(StorageError),
    Encode(serde_json::Error),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Corrupt(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode snapshot: {err}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Corrupt(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<CorruptStateError> for PersistError {
    fn from(value: CorruptStateError) -> Self {
        Self::Corrupt(value)
    }
}

impl From<StorageError> for PersistError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}
