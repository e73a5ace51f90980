//! Caller-supplied inputs for create and partial-update operations.

use crate::model::{normalize_list, normalize_tags, DepartmentId};

/// Raw fields for a new protocol as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProtocol {
    pub title: String,
    pub summary: String,
    /// Comma-joined steps, e.g. `"Verify identity, Reset, Notify"`.
    pub steps: String,
    /// Comma-joined tags.
    pub tags: String,
    pub department_id: DepartmentId,
}

/// Shallow partial update for a department. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentPatch {
    pub name: Option<String>,
    /// Replaces the adjacency list as given; targets are not re-validated.
    pub connections: Option<Vec<DepartmentId>>,
}

impl DepartmentPatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            connections: None,
        }
    }
}

/// Shallow partial update for a protocol. `None` keeps the current value;
/// `steps` and `tags` replace the whole sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtocolPatch {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub steps: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub department_id: Option<DepartmentId>,
}

impl ProtocolPatch {
    /// Sets `steps` from comma-joined edit text.
    pub fn with_steps_text(mut self, raw: &str) -> Self {
        self.steps = Some(normalize_list(raw));
        self
    }

    /// Sets `tags` from comma-joined edit text.
    pub fn with_tags_text(mut self, raw: &str) -> Self {
        self.tags = Some(normalize_tags(raw));
        self
    }
}
