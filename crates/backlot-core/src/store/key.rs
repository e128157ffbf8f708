// ── Cache keys ──
//
// A QueryKey addresses exactly one cache entry: either a list page
// (discriminated by the full canonical parameter rendering) or a single
// record's detail entry (discriminated by canonical id).

use std::fmt;

use crate::model::{EntityId, ListParams};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    namespace: &'static str,
    kind: KeyKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum KeyKind {
    List(String),
    Detail(String),
}

impl QueryKey {
    /// Key for one page of a list. Two keys are equal iff the namespace
    /// and every parameter value (page, limit, search, filters) match.
    pub fn list(namespace: &'static str, params: &ListParams) -> Self {
        Self {
            namespace,
            kind: KeyKind::List(params.canonical()),
        }
    }

    /// Key for a single record's detail entry.
    pub fn detail(namespace: &'static str, id: &EntityId) -> Self {
        Self {
            namespace,
            kind: KeyKind::Detail(id.to_string()),
        }
    }

    pub fn namespace(&self) -> &'static str {
        self.namespace
    }

    pub fn is_list(&self) -> bool {
        matches!(self.kind, KeyKind::List(_))
    }

    pub fn is_detail(&self) -> bool {
        matches!(self.kind, KeyKind::Detail(_))
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            KeyKind::List(query) => write!(f, "{}?{}", self.namespace, query),
            KeyKind::Detail(id) => write!(f, "{}/{}", self.namespace, id),
        }
    }
}
