// ── CRUD mutation coordinator ──
//
// Performs create/update/delete against a resource's network operations
// and keeps every cached page plus the detail entry consistent. Deletes
// are optimistic: the cache is patched before the network call is
// dispatched and rolled back verbatim if it fails. Creates and updates
// patch only after the server confirms.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use tokio::sync::broadcast;
use tracing::debug;

use crate::error::CoreError;
use crate::model::EntityId;
use crate::notify::{Notify, NullNotify};
use crate::ops::ResourceOps;
use crate::store::ResourceCache;

const EVENT_CHANNEL_SIZE: usize = 64;

// ── Policy & events ──────────────────────────────────────────────────

/// Which optimistic list patches this coordinator applies.
#[derive(Debug, Clone, Copy)]
pub struct MutationPolicy {
    /// Prepend created items to every cached page (`total + 1`).
    pub insert_into_lists: bool,
    /// Replace updated items in every cached page (`total` unchanged).
    pub update_in_lists: bool,
    /// Remove deleted items from every cached page before the network
    /// call resolves, with full rollback on failure.
    pub remove_from_lists: bool,
}

impl Default for MutationPolicy {
    fn default() -> Self {
        Self {
            insert_into_lists: true,
            update_in_lists: true,
            remove_from_lists: true,
        }
    }
}

/// Broadcast after a mutation is confirmed by the server.
#[derive(Debug, Clone)]
pub enum ChangeEvent<T> {
    Created(T),
    Updated(T),
    Deleted(EntityId),
}

// ── Coordinator ──────────────────────────────────────────────────────

/// Mutation coordinator for one resource.
///
/// Shares its [`ResourceCache`] with the list controller, so the list
/// re-renders from patched cache entries without waiting for a refetch,
/// then self-corrects through invalidation.
pub struct MutationCoordinator<O: ResourceOps> {
    ops: Arc<O>,
    cache: Arc<ResourceCache<O::Item>>,
    policy: MutationPolicy,
    notify: Arc<dyn Notify>,
    events: broadcast::Sender<ChangeEvent<O::Item>>,
    creating: AtomicU32,
    updating: AtomicU32,
    deleting: AtomicU32,
}

impl<O: ResourceOps> MutationCoordinator<O> {
    pub fn new(ops: Arc<O>, cache: Arc<ResourceCache<O::Item>>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_SIZE);
        Self {
            ops,
            cache,
            policy: MutationPolicy::default(),
            notify: Arc::new(NullNotify),
            events,
            creating: AtomicU32::new(0),
            updating: AtomicU32::new(0),
            deleting: AtomicU32::new(0),
        }
    }

    pub fn with_policy(mut self, policy: MutationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_notify(mut self, notify: Arc<dyn Notify>) -> Self {
        self.notify = notify;
        self
    }

    /// Subscribe to confirmed mutations (the success-callback analogue).
    pub fn subscribe_events(&self) -> broadcast::Receiver<ChangeEvent<O::Item>> {
        self.events.subscribe()
    }

    // ── In-flight flags ──────────────────────────────────────────────

    pub fn is_creating(&self) -> bool {
        self.creating.load(Ordering::Relaxed) > 0
    }

    pub fn is_updating(&self) -> bool {
        self.updating.load(Ordering::Relaxed) > 0
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting.load(Ordering::Relaxed) > 0
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Create a record. No optimistic write: the cache changes only
    /// after the server returns the created item.
    pub async fn create(&self, input: O::CreateInput) -> Result<O::Item, CoreError> {
        let _flag = InflightGuard::enter(&self.creating);

        match self.ops.create(input).await {
            Ok(item) => {
                let id = self.ops.identity_of(&item);
                debug!(namespace = self.ops.namespace(), id = %id, "create confirmed");

                self.cache.insert_item(&id, item.clone());
                if self.policy.insert_into_lists {
                    self.cache.patch_pages(|page| {
                        page.items.insert(0, item.clone());
                        page.total += 1;
                    });
                }
                self.cache.invalidate();

                self.notify
                    .success(&format!("{}: created {id}", self.ops.namespace()));
                let _ = self.events.send(ChangeEvent::Created(item.clone()));
                Ok(item)
            }
            Err(err) => {
                self.notify.error(&err.to_string());
                Err(err)
            }
        }
    }

    /// Update a record by id. No optimistic write; on confirmation the
    /// matching item is replaced in every cached page, leaving each
    /// page's `total` unchanged. Updates against different ids never
    /// interfere: each patch matches only its own identity.
    pub async fn update(&self, id: &EntityId, input: O::UpdateInput) -> Result<O::Item, CoreError> {
        let _flag = InflightGuard::enter(&self.updating);

        match self.ops.update(id, input).await {
            Ok(item) => {
                debug!(namespace = self.ops.namespace(), id = %id, "update confirmed");

                self.cache.insert_item(id, item.clone());
                if self.policy.update_in_lists {
                    self.cache.patch_pages(|page| {
                        for slot in &mut page.items {
                            if self.ops.identity_of(slot) == *id {
                                *slot = item.clone();
                            }
                        }
                    });
                }
                self.cache.invalidate();

                self.notify
                    .success(&format!("{}: updated {id}", self.ops.namespace()));
                let _ = self.events.send(ChangeEvent::Updated(item.clone()));
                Ok(item)
            }
            Err(err) => {
                self.notify.error(&err.to_string());
                Err(err)
            }
        }
    }

    /// Delete a record by id, optimistically.
    ///
    /// The removal patch is applied synchronously before the network
    /// call is dispatched, so the UI reflects the pending delete
    /// immediately. A page's `total` is only decremented when the item
    /// was actually present in it, which makes a second delete of the
    /// same id a no-op patch. There is deliberately no double-delete
    /// guard: the second network call's outcome is whatever the API
    /// says.
    pub async fn delete(&self, id: &EntityId) -> Result<(), CoreError> {
        let _flag = InflightGuard::enter(&self.deleting);

        let snapshot = if self.policy.remove_from_lists {
            let snapshot = self.cache.snapshot_pages();
            self.cache.patch_pages(|page| {
                let before = page.items.len();
                page.items.retain(|item| self.ops.identity_of(item) != *id);
                if page.items.len() < before {
                    page.total = page.total.saturating_sub(1);
                }
            });
            Some(snapshot)
        } else {
            None
        };

        match self.ops.delete(id).await {
            Ok(()) => {
                debug!(namespace = self.ops.namespace(), id = %id, "delete confirmed");

                self.cache.remove_item(id);
                self.cache.invalidate();

                self.notify
                    .success(&format!("{}: deleted {id}", self.ops.namespace()));
                let _ = self.events.send(ChangeEvent::Deleted(id.clone()));
                Ok(())
            }
            Err(err) => {
                if let Some(snapshot) = snapshot {
                    debug!(namespace = self.ops.namespace(), id = %id, "delete failed, rolling back");
                    self.cache.restore(snapshot);
                }
                self.notify.error(&err.to_string());
                Err(err)
            }
        }
    }
}

// ── In-flight counter guard ──────────────────────────────────────────

struct InflightGuard<'a>(&'a AtomicU32);

impl<'a> InflightGuard<'a> {
    fn enter(counter: &'a AtomicU32) -> Self {
        counter.fetch_add(1, Ordering::Relaxed);
        Self(counter)
    }
}

impl Drop for InflightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}
