#![allow(clippy::unwrap_used)]
// End-to-end tests for ListController + MutationCoordinator over an
// in-memory fake resource: URL round-trips, optimistic patching, and
// rollback behavior.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use backlot_core::{
    ChangeEvent, CoreError, EntityId, FetchState, ListController, ListParams, MemoryUrlState,
    MutationCoordinator, Notify, Page, QueryKey, ResourceCache, ResourceOps, UrlState,
};

// ── Fake resource ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
struct Rec {
    id: EntityId,
    name: String,
}

fn rec(id: i64, name: &str) -> Rec {
    Rec {
        id: EntityId::Num(id),
        name: name.to_owned(),
    }
}

#[derive(Default)]
struct FakeOps {
    rows: Mutex<Vec<Rec>>,
    next_id: AtomicI64,
    fail_create: AtomicBool,
    fail_delete: AtomicBool,
    /// Number of upcoming list calls that should fail.
    fail_lists: AtomicU32,
    /// When present, `delete` parks on this receiver before touching rows.
    delete_gate: Mutex<Option<tokio::sync::oneshot::Receiver<()>>>,
}

impl FakeOps {
    fn with_rows(rows: Vec<Rec>) -> Arc<Self> {
        let max_id = rows
            .iter()
            .filter_map(|r| r.id.as_num())
            .max()
            .unwrap_or(0);
        let ops = Self {
            rows: Mutex::new(rows),
            ..Self::default()
        };
        ops.next_id.store(max_id + 1, Ordering::Relaxed);
        Arc::new(ops)
    }
}

#[async_trait]
impl ResourceOps for FakeOps {
    type Item = Rec;
    type CreateInput = String;
    type UpdateInput = String;

    fn namespace(&self) -> &'static str {
        "brands"
    }

    fn identity_of(&self, item: &Rec) -> EntityId {
        item.id.clone()
    }

    async fn list(&self, params: &ListParams) -> Result<Page<Rec>, CoreError> {
        if self.fail_lists.load(Ordering::Relaxed) > 0 {
            self.fail_lists.fetch_sub(1, Ordering::Relaxed);
            return Err(CoreError::Api {
                message: "upstream flaked".into(),
                code: None,
                status: Some(503),
            });
        }

        let rows = self.rows.lock().unwrap();
        let needle = params.search.to_lowercase();
        let matching: Vec<Rec> = rows
            .iter()
            .filter(|r| needle.is_empty() || r.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        let start = ((params.page - 1) * params.limit) as usize;
        let items: Vec<Rec> = matching
            .iter()
            .skip(start)
            .take(params.limit as usize)
            .cloned()
            .collect();

        Ok(Page {
            items,
            total: matching.len() as u64,
            pagination: None,
        })
    }

    async fn create(&self, name: String) -> Result<Rec, CoreError> {
        if self.fail_create.load(Ordering::Relaxed) {
            return Err(CoreError::ValidationFailed {
                message: format!("name '{name}' is already taken"),
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let item = Rec {
            id: EntityId::Num(id),
            name,
        };
        self.rows.lock().unwrap().push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: &EntityId, name: String) -> Result<Rec, CoreError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|r| r.id == *id) else {
            return Err(CoreError::NotFound {
                resource: "brands".into(),
                identifier: id.to_string(),
            });
        };
        row.name = name;
        Ok(row.clone())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), CoreError> {
        let gate = self.delete_gate.lock().unwrap().take();
        if let Some(rx) = gate {
            let _ = rx.await;
        }

        if self.fail_delete.load(Ordering::Relaxed) {
            return Err(CoreError::Api {
                message: "storage offline".into(),
                code: Some("storage.offline".into()),
                status: Some(503),
            });
        }

        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != *id);
        if rows.len() == before {
            return Err(CoreError::NotFound {
                resource: "brands".into(),
                identifier: id.to_string(),
            });
        }
        Ok(())
    }
}

// ── Capturing notifier ──────────────────────────────────────────────

#[derive(Default)]
struct CapturingNotify {
    messages: Mutex<Vec<(&'static str, String)>>,
}

impl CapturingNotify {
    fn drain(&self) -> Vec<(&'static str, String)> {
        std::mem::take(&mut *self.messages.lock().unwrap())
    }
}

impl Notify for CapturingNotify {
    fn success(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(("success", message.to_owned()));
    }

    fn error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(("error", message.to_owned()));
    }
}

// ── Harness ─────────────────────────────────────────────────────────

struct Harness {
    ops: Arc<FakeOps>,
    cache: Arc<ResourceCache<Rec>>,
    url: Arc<MemoryUrlState>,
    controller: ListController<FakeOps>,
    coordinator: MutationCoordinator<FakeOps>,
    notify: Arc<CapturingNotify>,
}

fn harness(rows: Vec<Rec>, initial_query: &str) -> Harness {
    let ops = FakeOps::with_rows(rows);
    let cache = ResourceCache::shared("brands");
    let url = Arc::new(MemoryUrlState::new(initial_query));
    let notify = Arc::new(CapturingNotify::default());

    let controller = ListController::new(
        Arc::clone(&ops),
        Arc::clone(&cache),
        Arc::clone(&url) as Arc<dyn UrlState>,
    );
    let coordinator = MutationCoordinator::new(Arc::clone(&ops), Arc::clone(&cache))
        .with_notify(Arc::clone(&notify) as Arc<dyn Notify>);

    Harness {
        ops,
        cache,
        url,
        controller,
        coordinator,
        notify,
    }
}

fn current_list_key(h: &Harness) -> QueryKey {
    QueryKey::list("brands", &h.controller.params())
}

// ── URL state (P1, P2) ──────────────────────────────────────────────

#[tokio::test]
async fn setters_round_trip_through_the_url() {
    let h = harness(Vec::new(), "");

    h.controller.set_search("sony");
    h.controller.set_page_size(24);
    h.controller.set_filter("isActive", Some("true"));
    h.controller.set_page(3);

    let params = h.controller.params();
    assert_eq!(params.page, 3);
    assert_eq!(params.limit, 24);
    assert_eq!(params.search, "sony");
    assert_eq!(params.filter("isActive"), Some("true"));
}

#[tokio::test]
async fn clearing_a_filter_removes_it_from_the_url() {
    let h = harness(Vec::new(), "isActive=true&search=sony");

    h.controller.set_filter("isActive", Some("all"));
    assert!(!h.url.read().contains("isActive"));
    assert_eq!(h.controller.params().filter("isActive"), None);

    h.controller.set_filter("isActive", None);
    assert!(!h.url.read().contains("isActive"));
}

#[tokio::test]
async fn every_mutator_except_set_page_resets_the_page() {
    let h = harness(Vec::new(), "");

    h.controller.set_page(5);
    h.controller.set_search("mic");
    assert_eq!(h.controller.params().page, 1);

    h.controller.set_page(5);
    h.controller.set_filter("kind", Some("EQUIPMENT"));
    assert_eq!(h.controller.params().page, 1);

    h.controller.set_page(5);
    h.controller.set_page_size(24);
    assert_eq!(h.controller.params().page, 1);

    h.controller.set_page(5);
    assert_eq!(h.controller.params().page, 5);
}

#[tokio::test]
async fn clear_all_resets_everything() {
    let h = harness(Vec::new(), "page=4&limit=24&search=sony&isActive=true");

    h.controller.clear_all();

    assert_eq!(h.url.read(), "");
    let params = h.controller.params();
    assert_eq!(params.page, 1);
    assert_eq!(params.limit, 10);
    assert!(!params.has_active_filters());
}

// ── Paging scenario ─────────────────────────────────────────────────

#[tokio::test]
async fn brand_paging_scenario() {
    let rows = vec![
        rec(1, "Sony"),
        rec(2, "Canon"),
        rec(3, "Arri"),
        rec(4, "RED"),
        rec(5, "Blackmagic"),
    ];
    let h = harness(rows, "limit=2");

    let page = h.controller.load().await.unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].name, "Sony");
    assert_eq!(page.total, 5);

    let snap = h.controller.snapshot();
    assert_eq!(snap.total_pages, 3);
    assert!(snap.can_next_page);
    assert!(!snap.can_prev_page);

    h.controller.set_page(2);
    assert!(h.url.read().contains("page=2"));

    let page = h.controller.load().await.unwrap();
    assert_eq!(page.items[0].id, EntityId::from(3));
    assert_eq!(page.items[1].id, EntityId::from(4));
    assert_eq!(page.total, 5);

    let snap = h.controller.snapshot();
    assert_eq!(snap.current_page, 2);
    assert!(snap.can_next_page);
    assert!(snap.can_prev_page);
}

#[tokio::test]
async fn search_drives_the_list_query() {
    let rows = vec![rec(1, "Sony"), rec(2, "Canon"), rec(3, "Sennheiser")];
    let h = harness(rows, "");

    h.controller.set_search("s");
    let page = h.controller.load().await.unwrap();

    // "Sony" and "Sennheiser" match; "Canon" does not.
    assert_eq!(page.total, 2);
    assert!(h.controller.snapshot().has_active_filters);
}

// ── Fetch failure & retry ───────────────────────────────────────────

#[tokio::test]
async fn list_failure_is_surfaced_not_swallowed() {
    let h = harness(vec![rec(1, "Sony")], "");
    h.ops.fail_lists.store(1, Ordering::Relaxed);

    let err = h.controller.load().await.unwrap_err();
    assert!(matches!(err, CoreError::Api { .. }));

    let state = h.controller.fetch_state().borrow().clone();
    assert!(matches!(state, FetchState::Failed(_)));
    assert!(state.error().unwrap().contains("upstream flaked"));
}

#[tokio::test]
async fn configured_retries_recover_from_transient_failures() {
    let ops = FakeOps::with_rows(vec![rec(1, "Sony")]);
    ops.fail_lists.store(1, Ordering::Relaxed);

    let cache = ResourceCache::shared("brands");
    let url = Arc::new(MemoryUrlState::new(""));
    let controller = ListController::new(Arc::clone(&ops), cache, url as Arc<dyn UrlState>)
        .with_retries(1);

    let page = controller.load().await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(*controller.fetch_state().borrow(), FetchState::Loaded);
}

// ── Create (P5) ─────────────────────────────────────────────────────

#[tokio::test]
async fn create_prepends_to_cached_pages() {
    let h = harness(Vec::new(), "");

    // Prime the cache with an empty page.
    h.controller.load().await.unwrap();
    let key = current_list_key(&h);
    assert_eq!(h.cache.page(&key).unwrap().total, 0);

    let mut events = h.coordinator.subscribe_events();
    let created = h.coordinator.create("Arri".to_owned()).await.unwrap();

    let page = h.cache.page(&key).unwrap();
    assert_eq!(page.items[0], created);
    assert_eq!(page.total, 1);

    // Detail entry was written and the list marked stale for refetch.
    assert_eq!(h.cache.item(&created.id).unwrap(), created);
    assert!(h.cache.is_stale(&key));

    assert!(matches!(events.try_recv().unwrap(), ChangeEvent::Created(_)));
    let messages = h.notify.drain();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].0, "success");
}

#[tokio::test]
async fn failed_create_leaves_cache_untouched() {
    let h = harness(vec![rec(1, "Sony")], "");
    h.controller.load().await.unwrap();
    let key = current_list_key(&h);
    let before = h.cache.page(&key).unwrap();

    h.ops.fail_create.store(true, Ordering::Relaxed);
    let err = h.coordinator.create("Sony".to_owned()).await.unwrap_err();
    assert!(matches!(err, CoreError::ValidationFailed { .. }));

    assert_eq!(h.cache.page(&key).unwrap(), before);
    let messages = h.notify.drain();
    assert_eq!(messages[0].0, "error");
    assert!(messages[0].1.contains("already taken"));
}

// ── Update (P6) ─────────────────────────────────────────────────────

#[tokio::test]
async fn update_replaces_only_the_matching_item() {
    let h = harness(vec![rec(1, "Sony"), rec(2, "Canon"), rec(3, "Arri")], "");
    h.controller.load().await.unwrap();
    let key = current_list_key(&h);

    let updated = h
        .coordinator
        .update(&EntityId::from(2), "Canon Rumors".to_owned())
        .await
        .unwrap();
    assert_eq!(updated.name, "Canon Rumors");

    let page = h.cache.page(&key).unwrap();
    assert_eq!(page.items[0], rec(1, "Sony"));
    assert_eq!(page.items[1], rec(2, "Canon Rumors"));
    assert_eq!(page.items[2], rec(3, "Arri"));
    assert_eq!(page.total, 3);
}

#[tokio::test]
async fn update_matches_identity_across_numeric_and_string_forms() {
    let h = harness(vec![rec(1, "Sony"), rec(2, "Canon")], "");
    h.controller.load().await.unwrap();
    let key = current_list_key(&h);

    // The CLI hands ids around as text; the cache holds numeric ids.
    h.coordinator
        .update(&EntityId::from("2"), "Canon Inc".to_owned())
        .await
        .unwrap();

    let page = h.cache.page(&key).unwrap();
    assert_eq!(page.items[1].name, "Canon Inc");
}

// ── Delete (P4 + scenario) ──────────────────────────────────────────

#[tokio::test]
async fn delete_patches_before_dispatch_and_rolls_back_on_failure() {
    let h = harness(vec![rec(1, "Sony"), rec(2, "Canon"), rec(3, "Arri")], "");
    h.controller.load().await.unwrap();
    let key = current_list_key(&h);

    let (gate_tx, gate_rx) = tokio::sync::oneshot::channel();
    *h.ops.delete_gate.lock().unwrap() = Some(gate_rx);
    h.ops.fail_delete.store(true, Ordering::Relaxed);

    let target = EntityId::from(2);
    let fut = h.coordinator.delete(&target);
    tokio::pin!(fut);

    // Poll the delete exactly once: it applies the optimistic patch,
    // then parks on the gated network call.
    tokio::select! {
        biased;
        _ = &mut fut => panic!("delete should be parked on the gate"),
        () = std::future::ready(()) => {}
    }

    let patched = h.cache.page(&key).unwrap();
    assert_eq!(patched.items, vec![rec(1, "Sony"), rec(3, "Arri")]);
    assert_eq!(patched.total, 2);

    // Release the gate; the network call fails and the pages roll back.
    gate_tx.send(()).unwrap();
    let err = fut.await.unwrap_err();
    assert!(matches!(err, CoreError::Api { .. }));

    let restored = h.cache.page(&key).unwrap();
    assert_eq!(
        restored.items,
        vec![rec(1, "Sony"), rec(2, "Canon"), rec(3, "Arri")]
    );
    assert_eq!(restored.total, 3);

    let messages = h.notify.drain();
    assert_eq!(messages[0].0, "error");
    assert!(messages[0].1.contains("storage offline"));
}

#[tokio::test]
async fn successful_delete_removes_detail_and_invalidates() {
    let h = harness(vec![rec(1, "Sony"), rec(2, "Canon")], "");
    h.controller.load().await.unwrap();
    let key = current_list_key(&h);
    let id = EntityId::from(2);
    h.cache.insert_item(&id, rec(2, "Canon"));

    let mut events = h.coordinator.subscribe_events();
    h.coordinator.delete(&id).await.unwrap();

    let page = h.cache.page(&key).unwrap();
    assert_eq!(page.items, vec![rec(1, "Sony")]);
    assert_eq!(page.total, 1);
    assert!(h.cache.item(&id).is_none());
    assert!(h.cache.is_stale(&key));
    assert!(matches!(
        events.try_recv().unwrap(),
        ChangeEvent::Deleted(deleted) if deleted == id
    ));
}

#[tokio::test]
async fn second_delete_of_same_id_is_a_noop_patch() {
    let h = harness(vec![rec(1, "Sony"), rec(2, "Canon")], "");
    h.controller.load().await.unwrap();
    let key = current_list_key(&h);

    let id = EntityId::from(2);
    h.coordinator.delete(&id).await.unwrap();
    let after_first = h.cache.page(&key).unwrap();
    assert_eq!(after_first.total, 1);

    // No dedup guard: the second call goes to the network and fails
    // with NotFound, but the patch found nothing so nothing changes.
    let err = h.coordinator.delete(&id).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }));

    let after_second = h.cache.page(&key).unwrap();
    assert_eq!(after_second.items, after_first.items);
    assert_eq!(after_second.total, 1);
}

// ── Policy & unsupported operations ─────────────────────────────────

#[tokio::test]
async fn disabled_policy_skips_optimistic_patches() {
    let ops = FakeOps::with_rows(vec![rec(1, "Sony"), rec(2, "Canon")]);
    let cache = ResourceCache::shared("brands");
    let url = Arc::new(MemoryUrlState::new(""));
    let controller = ListController::new(
        Arc::clone(&ops),
        Arc::clone(&cache),
        url as Arc<dyn UrlState>,
    );
    controller.load().await.unwrap();
    let key = QueryKey::list("brands", &controller.params());

    let coordinator = MutationCoordinator::new(Arc::clone(&ops), Arc::clone(&cache)).with_policy(
        backlot_core::MutationPolicy {
            insert_into_lists: false,
            update_in_lists: false,
            remove_from_lists: false,
        },
    );

    coordinator.delete(&EntityId::from(2)).await.unwrap();

    // The cached page is stale but unpatched — the refetch will fix it.
    let page = cache.page(&key).unwrap();
    assert_eq!(page.items.len(), 2);
    assert!(cache.is_stale(&key));
}

#[tokio::test]
async fn read_only_resources_reject_mutations() {
    struct ReadOnlyOps;

    #[async_trait]
    impl ResourceOps for ReadOnlyOps {
        type Item = Rec;
        type CreateInput = String;
        type UpdateInput = String;

        fn namespace(&self) -> &'static str {
            "locales"
        }

        fn identity_of(&self, item: &Rec) -> EntityId {
            item.id.clone()
        }

        async fn list(&self, _params: &ListParams) -> Result<Page<Rec>, CoreError> {
            Ok(Page::empty())
        }
    }

    let cache = ResourceCache::shared("locales");
    let coordinator = MutationCoordinator::new(Arc::new(ReadOnlyOps), cache);

    let err = coordinator.create("nope".to_owned()).await.unwrap_err();
    assert!(matches!(err, CoreError::Unsupported { .. }));
}

// ── Cache subscription ──────────────────────────────────────────────

#[tokio::test]
async fn controller_observes_coordinator_patches() {
    let h = harness(vec![rec(1, "Sony")], "");
    h.controller.load().await.unwrap();

    let mut changes = h.controller.subscribe();
    changes.mark_unchanged();

    h.coordinator.create("Arri".to_owned()).await.unwrap();
    assert!(changes.has_changed().unwrap());

    // The controller's snapshot reflects the patched cache without a refetch.
    let snap = h.controller.snapshot();
    assert_eq!(snap.items[0].name, "Arri");
    assert_eq!(snap.total, 2);
}
