// ── List controller ──
//
// Binds a paginated, filterable resource list to query-string state.
// The URL is the only durable source of truth for list configuration:
// every derived output is computed from a fresh parse, never from a
// shadow copy in memory.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::{FILTER_ALL, ListParams, Page};
use crate::ops::ResourceOps;
use crate::store::{QueryKey, ResourceCache};
use crate::urlstate::UrlState;

// ── FetchState ───────────────────────────────────────────────────────

/// Lifecycle of the current list fetch, observable by consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

impl FetchState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

// ── ListController ───────────────────────────────────────────────────

/// Controller for one resource list view.
///
/// Holds the injected URL backend, the shared cache, and the resource
/// operations. Mutators rewrite the query string; `load` executes the
/// list query for whatever the query string currently says.
pub struct ListController<O: ResourceOps> {
    ops: Arc<O>,
    cache: Arc<ResourceCache<O::Item>>,
    url: Arc<dyn UrlState>,
    /// Extra attempts after the first failure. Mutations never retry;
    /// this only applies to the read query.
    retries: u32,
    fetch_state: watch::Sender<FetchState>,
}

impl<O: ResourceOps> ListController<O> {
    pub fn new(ops: Arc<O>, cache: Arc<ResourceCache<O::Item>>, url: Arc<dyn UrlState>) -> Self {
        let (fetch_state, _) = watch::channel(FetchState::Idle);
        Self {
            ops,
            cache,
            url,
            retries: 0,
            fetch_state,
        }
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn cache(&self) -> &Arc<ResourceCache<O::Item>> {
        &self.cache
    }

    // ── URL state ────────────────────────────────────────────────────

    /// Parse the current query string. Total: malformed values default.
    pub fn params(&self) -> ListParams {
        ListParams::from_query(&self.url.read(), self.ops.default_limit())
    }

    /// Jump to a page. The only mutator that does NOT reset the page.
    pub fn set_page(&self, page: u32) {
        let mut params = self.params();
        params.page = page.max(1);
        self.navigate(params);
    }

    pub fn set_page_size(&self, limit: u32) {
        let mut params = self.params();
        params.limit = limit.max(1);
        params.page = 1;
        self.navigate(params);
    }

    pub fn set_search(&self, search: &str) {
        let mut params = self.params();
        params.search = search.to_owned();
        params.page = 1;
        self.navigate(params);
    }

    /// Set or clear a named filter. `None`, an empty value, or the
    /// `"all"` sentinel removes the parameter from the URL.
    pub fn set_filter(&self, key: &str, value: Option<&str>) {
        let mut params = self.params();
        match value {
            Some(v) if !v.is_empty() && v != FILTER_ALL => {
                params.filters.insert(key.to_owned(), v.to_owned());
            }
            _ => {
                params.filters.remove(key);
            }
        }
        params.page = 1;
        self.navigate(params);
    }

    /// Reset page, page size, search, and every filter to defaults.
    pub fn clear_all(&self) {
        self.navigate(ListParams::new(self.ops.default_limit()));
    }

    fn navigate(&self, params: ListParams) {
        let query = params.to_query(self.ops.default_limit());
        debug!(namespace = self.ops.namespace(), %query, "navigate");
        self.url.navigate(query);
    }

    // ── Fetch ────────────────────────────────────────────────────────

    /// Execute the list query for the current URL state and cache the
    /// resulting page. Errors are surfaced both in the returned
    /// `Result` and through [`fetch_state`](Self::fetch_state); they are
    /// never swallowed.
    pub async fn load(&self) -> Result<Page<O::Item>, CoreError> {
        let params = self.params();
        let key = QueryKey::list(self.ops.namespace(), &params);
        let _ = self.fetch_state.send(FetchState::Loading);

        let mut attempt: u32 = 0;
        let page = loop {
            match self.ops.list(&params).await {
                Ok(page) => break page,
                Err(err) if attempt < self.retries => {
                    attempt += 1;
                    warn!(
                        namespace = self.ops.namespace(),
                        attempt,
                        error = %err,
                        "list fetch failed, retrying"
                    );
                }
                Err(err) => {
                    let _ = self.fetch_state.send(FetchState::Failed(err.to_string()));
                    return Err(err);
                }
            }
        };

        debug!(
            namespace = self.ops.namespace(),
            key = %key,
            items = page.len(),
            total = page.total,
            "list fetch complete"
        );
        self.cache.insert_page(key, page.clone());
        let _ = self.fetch_state.send(FetchState::Loaded);
        Ok(page)
    }

    /// Re-issue the list query with unchanged parameters.
    pub async fn refetch(&self) -> Result<Page<O::Item>, CoreError> {
        self.load().await
    }

    // ── Derived outputs ──────────────────────────────────────────────

    /// Compute the current view from URL state plus whatever page is
    /// cached for it. Cheap; call after any cache notification.
    pub fn snapshot(&self) -> ListSnapshot<O::Item> {
        let params = self.params();
        let key = QueryKey::list(self.ops.namespace(), &params);
        ListSnapshot::from_parts(&params, self.cache.page(&key))
    }

    /// Subscribe to fetch lifecycle changes.
    pub fn fetch_state(&self) -> watch::Receiver<FetchState> {
        self.fetch_state.subscribe()
    }

    /// Subscribe to cache changes (shared with the coordinator, so
    /// optimistic patches show up here too).
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.cache.subscribe()
    }
}

// ── ListSnapshot ─────────────────────────────────────────────────────

/// Everything a list view needs to render, derived from URL state and
/// the cached page. Treat as a read-only snapshot.
#[derive(Debug, Clone)]
pub struct ListSnapshot<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub total_pages: u32,
    pub current_page: u32,
    pub page_size: u32,
    pub search_term: String,
    pub has_active_filters: bool,
    pub can_next_page: bool,
    pub can_prev_page: bool,
}

impl<T: Clone> ListSnapshot<T> {
    fn from_parts(params: &ListParams, page: Option<Page<T>>) -> Self {
        let (items, total, meta) = match page {
            Some(page) => (page.items, page.total, page.pagination),
            None => (Vec::new(), 0, None),
        };

        // Prefer the server's own page math when it sent any.
        let total_pages = meta.map_or_else(
            || u32::try_from(total.div_ceil(u64::from(params.limit))).unwrap_or(u32::MAX),
            |m| m.total_pages,
        );

        Self {
            items,
            total,
            total_pages,
            current_page: params.page,
            page_size: params.limit,
            search_term: params.search.clone(),
            has_active_filters: params.has_active_filters(),
            can_next_page: params.page < total_pages,
            can_prev_page: params.page > 1,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::PageInfo;

    fn page(items: &[&str], total: u64) -> Page<String> {
        Page {
            items: items.iter().map(|s| (*s).to_owned()).collect(),
            total,
            pagination: None,
        }
    }

    #[test]
    fn snapshot_computes_page_math() {
        let params = ListParams::from_query("page=2&limit=2", 10);
        let snap = ListSnapshot::from_parts(&params, Some(page(&["c", "d"], 5)));

        assert_eq!(snap.total_pages, 3);
        assert_eq!(snap.current_page, 2);
        assert!(snap.can_next_page);
        assert!(snap.can_prev_page);
    }

    #[test]
    fn snapshot_prefers_server_pagination_meta() {
        let params = ListParams::from_query("limit=2", 10);
        let mut p = page(&["a", "b"], 5);
        p.pagination = Some(PageInfo {
            current_page: 1,
            total_pages: 7,
            has_next_page: true,
            has_prev_page: false,
        });

        let snap = ListSnapshot::from_parts(&params, Some(p));
        assert_eq!(snap.total_pages, 7);
    }

    #[test]
    fn snapshot_without_cached_page_is_empty() {
        let params = ListParams::new(10);
        let snap: ListSnapshot<String> = ListSnapshot::from_parts(&params, None);

        assert!(snap.items.is_empty());
        assert_eq!(snap.total, 0);
        assert_eq!(snap.total_pages, 0);
        assert!(!snap.can_next_page);
        assert!(!snap.can_prev_page);
    }
}
