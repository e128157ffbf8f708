// ── Per-resource query cache ──
//
// Lock-free concurrent storage for fetched pages and detail records,
// with push-based change notification via a `watch` version counter.
// One cache instance per resource namespace; shared by reference
// (`Arc`) between the list controller and the mutation coordinator —
// never global.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::watch;

use super::key::QueryKey;
use crate::model::{EntityId, Page};

/// A cached value is either one page of a list or a single record.
/// Both live in the same keyspace; optimistic patchers only touch
/// `Page` entries and skip anything else.
#[derive(Debug, Clone)]
enum CachedValue<T> {
    Page(Page<T>),
    Item(T),
}

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: CachedValue<T>,
    /// Set by `invalidate()`; cleared when the entry is rewritten.
    stale: bool,
}

/// Pre-patch copies of every cached page, held for rollback.
///
/// Produced by [`ResourceCache::snapshot_pages`] and consumed verbatim
/// by [`ResourceCache::restore`].
pub struct PageSnapshot<T> {
    pages: Vec<(QueryKey, CacheEntry<T>)>,
}

/// Reactive cache of query results for a single resource namespace.
///
/// All reads are wait-free; writes use `DashMap`'s per-shard locks.
/// Every mutation bumps a version counter that subscribers observe
/// through a `watch` channel, after the rewrite has fully completed.
pub struct ResourceCache<T: Clone + Send + Sync + 'static> {
    namespace: &'static str,
    entries: DashMap<QueryKey, CacheEntry<T>>,
    version: watch::Sender<u64>,
    last_write: watch::Sender<Option<DateTime<Utc>>>,
}

impl<T: Clone + Send + Sync + 'static> ResourceCache<T> {
    pub fn new(namespace: &'static str) -> Self {
        let (version, _) = watch::channel(0u64);
        let (last_write, _) = watch::channel(None);

        Self {
            namespace,
            entries: DashMap::new(),
            version,
            last_write,
        }
    }

    pub fn shared(namespace: &'static str) -> Arc<Self> {
        Arc::new(Self::new(namespace))
    }

    pub fn namespace(&self) -> &'static str {
        self.namespace
    }

    // ── Page entries ─────────────────────────────────────────────────

    /// Store a freshly fetched page under its list key.
    pub fn insert_page(&self, key: QueryKey, page: Page<T>) {
        self.entries.insert(
            key,
            CacheEntry {
                value: CachedValue::Page(page),
                stale: false,
            },
        );
        let _ = self.last_write.send(Some(Utc::now()));
        self.bump_version();
    }

    /// Read a cached page, if one exists under this key.
    pub fn page(&self, key: &QueryKey) -> Option<Page<T>> {
        self.entries.get(key).and_then(|entry| match &entry.value {
            CachedValue::Page(page) => Some(page.clone()),
            CachedValue::Item(_) => None,
        })
    }

    // ── Detail entries ───────────────────────────────────────────────

    pub fn insert_item(&self, id: &EntityId, item: T) {
        self.entries.insert(
            QueryKey::detail(self.namespace, id),
            CacheEntry {
                value: CachedValue::Item(item),
                stale: false,
            },
        );
        self.bump_version();
    }

    pub fn item(&self, id: &EntityId) -> Option<T> {
        let key = QueryKey::detail(self.namespace, id);
        self.entries.get(&key).and_then(|entry| match &entry.value {
            CachedValue::Item(item) => Some(item.clone()),
            CachedValue::Page(_) => None,
        })
    }

    pub fn remove_item(&self, id: &EntityId) {
        let key = QueryKey::detail(self.namespace, id);
        if self.entries.remove(&key).is_some() {
            self.bump_version();
        }
    }

    // ── Optimistic patch protocol ────────────────────────────────────

    /// Phase one: copy every cached page so a failed mutation can roll
    /// back to exactly this state.
    pub fn snapshot_pages(&self) -> PageSnapshot<T> {
        let pages = self
            .entries
            .iter()
            .filter(|entry| matches!(entry.value().value, CachedValue::Page(_)))
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        PageSnapshot { pages }
    }

    /// Phase two: rewrite every cached page in place.
    ///
    /// Entries holding detail records are skipped. The whole rewrite
    /// completes before the version bump, so subscribers never observe
    /// a partially patched cache.
    pub fn patch_pages(&self, mut patch: impl FnMut(&mut Page<T>)) {
        for mut entry in self.entries.iter_mut() {
            if let CachedValue::Page(ref mut page) = entry.value_mut().value {
                patch(page);
            }
        }
        self.bump_version();
    }

    /// Phase three (failure path): restore every snapshotted page
    /// verbatim, including its staleness flag.
    pub fn restore(&self, snapshot: PageSnapshot<T>) {
        for (key, entry) in snapshot.pages {
            self.entries.insert(key, entry);
        }
        self.bump_version();
    }

    // ── Invalidation ─────────────────────────────────────────────────

    /// Mark every entry in the namespace stale. Stale entries remain
    /// readable (the UI keeps showing them) until the next fetch
    /// rewrites them.
    pub fn invalidate(&self) {
        for mut entry in self.entries.iter_mut() {
            entry.value_mut().stale = true;
        }
        self.bump_version();
    }

    /// Whether the entry under `key` is missing or has been invalidated.
    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.entries.get(key).is_none_or(|entry| entry.stale)
    }

    // ── Subscription & metadata ──────────────────────────────────────

    /// Subscribe to cache changes. The received value is a version
    /// counter; any change means "re-read what you care about".
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }

    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }

    /// When the cache last received a confirmed (non-optimistic) write.
    pub fn last_write(&self) -> Option<DateTime<Utc>> {
        *self.last_write.borrow()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
        self.bump_version();
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn bump_version(&self) {
        // `send_modify` updates unconditionally, even with zero receivers.
        self.version.send_modify(|v| *v += 1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::ListParams;

    fn page_of(items: &[&str]) -> Page<String> {
        Page {
            items: items.iter().map(|s| (*s).to_owned()).collect(),
            total: items.len() as u64,
            pagination: None,
        }
    }

    fn list_key(query: &str) -> QueryKey {
        QueryKey::list("brands", &ListParams::from_query(query, 10))
    }

    #[test]
    fn page_round_trip() {
        let cache: ResourceCache<String> = ResourceCache::new("brands");
        let key = list_key("page=1");
        cache.insert_page(key.clone(), page_of(&["sony", "canon"]));

        let page = cache.page(&key).unwrap();
        assert_eq!(page.items, vec!["sony", "canon"]);
        assert!(!cache.is_stale(&key));
    }

    #[test]
    fn item_round_trip_and_removal() {
        let cache: ResourceCache<String> = ResourceCache::new("brands");
        let id = EntityId::from(5);
        cache.insert_item(&id, "sony".into());

        assert_eq!(cache.item(&id).unwrap(), "sony");
        // Numeric and string forms address the same entry.
        assert_eq!(cache.item(&EntityId::from("5")).unwrap(), "sony");

        cache.remove_item(&id);
        assert!(cache.item(&id).is_none());
    }

    #[test]
    fn missing_entries_are_stale() {
        let cache: ResourceCache<String> = ResourceCache::new("brands");
        assert!(cache.is_stale(&list_key("page=1")));
    }

    #[test]
    fn invalidate_marks_everything_stale() {
        let cache: ResourceCache<String> = ResourceCache::new("brands");
        let key = list_key("page=1");
        cache.insert_page(key.clone(), page_of(&["sony"]));

        cache.invalidate();
        assert!(cache.is_stale(&key));
        // Stale entries are still readable.
        assert!(cache.page(&key).is_some());
    }

    #[test]
    fn patch_skips_detail_entries() {
        let cache: ResourceCache<String> = ResourceCache::new("brands");
        let key = list_key("page=1");
        cache.insert_page(key.clone(), page_of(&["sony"]));
        cache.insert_item(&EntityId::from(1), "sony".into());

        cache.patch_pages(|page| {
            page.items.insert(0, "arri".into());
            page.total += 1;
        });

        assert_eq!(cache.page(&key).unwrap().items, vec!["arri", "sony"]);
        // The detail entry was not touched by the page patch.
        assert_eq!(cache.item(&EntityId::from(1)).unwrap(), "sony");
    }

    #[test]
    fn restore_reverts_patch_verbatim() {
        let cache: ResourceCache<String> = ResourceCache::new("brands");
        let key = list_key("page=1");
        cache.insert_page(key.clone(), page_of(&["sony", "canon", "arri"]));

        let snapshot = cache.snapshot_pages();
        cache.patch_pages(|page| {
            page.items.retain(|item| item != "canon");
            page.total -= 1;
        });
        assert_eq!(cache.page(&key).unwrap().len(), 2);

        cache.restore(snapshot);
        let restored = cache.page(&key).unwrap();
        assert_eq!(restored.items, vec!["sony", "canon", "arri"]);
        assert_eq!(restored.total, 3);
    }

    #[test]
    fn every_mutation_bumps_the_version() {
        let cache: ResourceCache<String> = ResourceCache::new("brands");
        let v0 = cache.version();

        cache.insert_page(list_key("page=1"), page_of(&["sony"]));
        let v1 = cache.version();
        assert!(v1 > v0);

        cache.patch_pages(|_| {});
        assert!(cache.version() > v1);
    }

    #[test]
    fn subscribers_observe_changes() {
        let cache: ResourceCache<String> = ResourceCache::new("brands");
        let rx = cache.subscribe();
        assert!(!rx.has_changed().unwrap());

        cache.insert_page(list_key("page=1"), page_of(&["sony"]));
        assert!(rx.has_changed().unwrap());
    }
}
