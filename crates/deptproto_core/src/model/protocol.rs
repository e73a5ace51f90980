//! Protocol domain model and comma-list normalization.
//!
//! # Invariants
//! - `steps` never contains empty or untrimmed entries.
//! - `tags` never contains duplicates; first occurrence order is kept.
//! - Normalization is idempotent: joining a normalized list with `,` and
//!   normalizing again yields the same list.

use super::department::DepartmentId;
use serde::{Deserialize, Serialize};

/// Stable identifier for a protocol within one store.
pub type ProtocolId = i64;

const LIST_DELIMITER: &str = ",";

/// Documented procedure owned by exactly one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Protocol {
    pub id: ProtocolId,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    /// Ordered procedure steps.
    #[serde(default)]
    pub steps: Vec<String>,
    /// Free-form labels; treated as a set.
    #[serde(default)]
    pub tags: Vec<String>,
    pub department_id: DepartmentId,
}

/// Splits comma-joined input into trimmed, non-empty entries.
///
/// `"a, b ,c"` becomes `["a", "b", "c"]`; `" , ,"` becomes `[]`.
pub fn normalize_list(raw: &str) -> Vec<String> {
    raw.split(LIST_DELIMITER)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalizes comma-joined tag input and drops exact duplicates.
pub fn normalize_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in normalize_list(raw) {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

/// Re-normalizes an already split sequence.
///
/// Entries that themselves contain the delimiter are split, so the result is
/// exactly what `normalize_list` would return for the joined input.
pub(crate) fn normalize_items(items: &[String]) -> Vec<String> {
    normalize_list(&join_items(items))
}

pub(crate) fn normalize_tag_items(items: &[String]) -> Vec<String> {
    normalize_tags(&join_items(items))
}

fn join_items(items: &[String]) -> String {
    items.join(LIST_DELIMITER)
}
