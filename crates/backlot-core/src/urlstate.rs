// ── URL state backend ──
//
// The list controller treats the page's query string as an injected
// dependency, not an ambient global: a read function and a navigate
// function. `MemoryUrlState` backs tests and the CLI; an embedding UI
// would wire these to its router.

use std::sync::RwLock;

/// Read/write access to the current query string.
pub trait UrlState: Send + Sync {
    /// The current query string, without a leading `?`.
    fn read(&self) -> String;

    /// Replace the query string. Fire-and-forget: callers do not await
    /// or observe the navigation result.
    fn navigate(&self, query: String);
}

/// In-memory query string.
#[derive(Debug, Default)]
pub struct MemoryUrlState {
    query: RwLock<String>,
}

impl MemoryUrlState {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            query: RwLock::new(initial.into()),
        }
    }
}

impl UrlState for MemoryUrlState {
    fn read(&self) -> String {
        self.query.read().map(|q| q.clone()).unwrap_or_default()
    }

    fn navigate(&self, query: String) {
        if let Ok(mut guard) = self.query.write() {
            *guard = query;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigate_replaces_the_query() {
        let url = MemoryUrlState::new("page=2");
        assert_eq!(url.read(), "page=2");

        url.navigate("page=3&search=fx6".into());
        assert_eq!(url.read(), "page=3&search=fx6");
    }
}
