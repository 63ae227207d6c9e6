//! Per-owner item collection.
//!
//! # Responsibility
//! - Hold one owner's deduplicated item set.
//! - Serialize every read and mutation on that set behind one lock.
//!
//! # Invariants
//! - The lock is scoped to this collection; no operation touches another
//!   owner's collection.
//! - Reads return owned snapshots, never a view into the live set.
//! - `add` and `remove_by_value` match on full-field equality, while
//!   `remove_by_id` and `contains` match on `id` alone.

use crate::identity::Identity;
use crate::model::item::{Category, Item, ItemId};
use log::{debug, info, warn};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

/// One owner's wishlist.
#[derive(Debug)]
pub struct Collection {
    owner: Identity,
    items: RwLock<HashSet<Item>>,
    contentions: AtomicU64,
}

impl Collection {
    /// Creates an empty collection owned by `owner`.
    pub fn new(owner: Identity) -> Self {
        debug!("event=collection_init module=collection status=ok owner={owner}");
        Self {
            owner,
            items: RwLock::new(HashSet::new()),
            contentions: AtomicU64::new(0),
        }
    }

    pub fn owner(&self) -> Identity {
        self.owner
    }

    /// Adds `item` unless an equal item is already present.
    ///
    /// Returns `false` for a duplicate; the set is left unchanged.
    pub fn add(&self, item: Item) -> bool {
        let item_id = item.id();
        let added = self.write().insert(item);
        if added {
            info!(
                "event=item_add module=collection status=added owner={} item_id={}",
                self.owner, item_id
            );
        } else {
            warn!(
                "event=item_add module=collection status=duplicate owner={} item_id={}",
                self.owner, item_id
            );
        }
        added
    }

    /// Removes every item whose id is `id`.
    ///
    /// Returns whether anything was removed.
    pub fn remove_by_id(&self, id: ItemId) -> bool {
        let removed = {
            let mut items = self.write();
            let before = items.len();
            items.retain(|item| item.id() != id);
            items.len() != before
        };
        self.log_removal("id", id, removed);
        removed
    }

    /// Removes the item equal to `item` under full-field equality.
    pub fn remove_by_value(&self, item: &Item) -> bool {
        let removed = self.write().remove(item);
        self.log_removal("value", item.id(), removed);
        removed
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.read().iter().any(|item| item.id() == id)
    }

    /// Snapshot of all items.
    pub fn items(&self) -> HashSet<Item> {
        self.read().clone()
    }

    /// Snapshot of the items in `category`.
    pub fn filter_by_category(&self, category: Category) -> HashSet<Item> {
        let filtered: HashSet<Item> = self
            .read()
            .iter()
            .filter(|item| item.category() == category)
            .cloned()
            .collect();
        debug!(
            "event=item_filter module=collection status=ok owner={} category={} matched={}",
            self.owner,
            category,
            filtered.len()
        );
        filtered
    }

    /// Removes all items. Calling it on an empty collection is a no-op.
    pub fn clear(&self) {
        let cleared = {
            let mut items = self.write();
            let count = items.len();
            items.clear();
            count
        };
        info!(
            "event=collection_clear module=collection status=ok owner={} cleared={}",
            self.owner, cleared
        );
    }

    pub fn size(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Number of lock acquisitions on this collection that had to wait
    /// for another caller.
    pub fn lock_contentions(&self) -> u64 {
        self.contentions.load(Ordering::Relaxed)
    }

    fn read(&self) -> RwLockReadGuard<'_, HashSet<Item>> {
        if let Some(guard) = self.items.try_read() {
            return guard;
        }
        self.contentions.fetch_add(1, Ordering::Relaxed);
        self.items.read()
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashSet<Item>> {
        if let Some(guard) = self.items.try_write() {
            return guard;
        }
        self.contentions.fetch_add(1, Ordering::Relaxed);
        self.items.write()
    }

    fn log_removal(&self, matched_by: &str, id: ItemId, removed: bool) {
        if removed {
            info!(
                "event=item_remove module=collection status=removed owner={} by={} item_id={}",
                self.owner, matched_by, id
            );
        } else {
            warn!(
                "event=item_remove module=collection status=not_found owner={} by={} item_id={}",
                self.owner, matched_by, id
            );
        }
    }
}
