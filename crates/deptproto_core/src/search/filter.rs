//! Text + department filtering over protocol collections.
//!
//! Pure recomputation from the full collection on every call.

use crate::model::{DepartmentId, Protocol};

/// Transient filter state supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtocolQuery {
    /// Case-insensitive substring matched against title, summary and tags,
    /// spaces included. Blank text matches everything.
    pub text: String,
    /// Restricts results to one owning department when set.
    pub department_id: Option<DepartmentId>,
}

impl ProtocolQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            department_id: None,
        }
    }

    pub fn in_department(mut self, department_id: DepartmentId) -> Self {
        self.department_id = Some(department_id);
        self
    }
}

/// Returns protocols matching `term` and `department_id`, in input order.
///
/// Whitespace only decides whether `term` is blank; a non-blank term is
/// matched with its surrounding spaces.
pub fn filter_protocols<'a>(
    protocols: &'a [Protocol],
    term: &str,
    department_id: Option<DepartmentId>,
) -> Vec<&'a Protocol> {
    let needle = if term.trim().is_empty() {
        String::new()
    } else {
        term.to_lowercase()
    };
    protocols
        .iter()
        .filter(|protocol| matches_text(protocol, &needle))
        .filter(|protocol| department_id.map_or(true, |id| protocol.department_id == id))
        .collect()
}

/// Runs [`filter_protocols`] with the fields of `query`.
pub fn run_query<'a>(protocols: &'a [Protocol], query: &ProtocolQuery) -> Vec<&'a Protocol> {
    filter_protocols(protocols, &query.text, query.department_id)
}

// `needle` is lowercased; empty means no text filter.
fn matches_text(protocol: &Protocol, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    contains_folded(&protocol.title, needle)
        || contains_folded(&protocol.summary, needle)
        || protocol.tags.iter().any(|tag| contains_folded(tag, needle))
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::{filter_protocols, run_query, ProtocolQuery};
    use crate::model::{default_seed, Protocol};

    fn titles(protocols: &[&Protocol]) -> Vec<String> {
        protocols.iter().map(|p| p.title.clone()).collect()
    }

    #[test]
    fn text_matches_title_summary_or_tag_ignoring_case() {
        let seed = default_seed();
        assert_eq!(
            titles(&filter_protocols(&seed.protocols, "RESET", None)),
            vec!["Password Reset"]
        );
        assert_eq!(
            titles(&filter_protocols(&seed.protocols, "new hire", None)),
            vec!["Onboarding Process"]
        );
        assert_eq!(
            titles(&filter_protocols(&seed.protocols, "offic", None)),
            vec!["Supply Request"]
        );
    }

    #[test]
    fn blank_term_matches_everything_in_order() {
        let seed = default_seed();
        let all = filter_protocols(&seed.protocols, "   ", None);
        assert_eq!(
            titles(&all),
            vec!["Onboarding Process", "Password Reset", "Supply Request"]
        );
    }

    #[test]
    fn surrounding_spaces_are_part_of_the_term() {
        let seed = default_seed();
        assert!(filter_protocols(&seed.protocols, "reset ", None).is_empty());
        assert_eq!(
            titles(&filter_protocols(&seed.protocols, " reset", None)),
            vec!["Password Reset"]
        );
        assert_eq!(
            titles(&filter_protocols(&seed.protocols, "password ", None)),
            vec!["Password Reset"]
        );
    }

    #[test]
    fn department_filter_is_and_composed_with_text() {
        let seed = default_seed();
        assert_eq!(
            titles(&filter_protocols(&seed.protocols, "", Some(3))),
            vec!["Supply Request"]
        );
        assert!(filter_protocols(&seed.protocols, "reset", Some(3)).is_empty());

        for term in ["", "reset", "o", "zzz"] {
            for dept in [None, Some(1), Some(2), Some(3), Some(9)] {
                let combined = filter_protocols(&seed.protocols, term, dept);
                let text_only: Vec<Protocol> = filter_protocols(&seed.protocols, term, None)
                    .into_iter()
                    .cloned()
                    .collect();
                let staged = filter_protocols(&text_only, "", dept);
                assert_eq!(titles(&combined), titles(&staged));
            }
        }
    }

    #[test]
    fn query_builder_sets_department() {
        let seed = default_seed();
        let query = ProtocolQuery::new("o").in_department(1);
        assert_eq!(
            titles(&run_query(&seed.protocols, &query)),
            vec!["Onboarding Process"]
        );
    }
}
