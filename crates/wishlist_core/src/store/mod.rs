//! Process-wide owner-to-collection registry.
//!
//! # Responsibility
//! - Create, look up and drop one `Collection` per `Identity`.
//! - Never inspect collection contents.
//!
//! # Invariants
//! - At most one `Collection` exists per identity; creation runs exactly
//!   once even when first accesses race.
//! - There is no store-wide lock: the backing map is sharded, and item
//!   mutation only takes the owning collection's lock.
//! - The store is an owned value threaded to callers, not a global.
//!
//! # See also
//! - crate::model::collection

use crate::identity::Identity;
use crate::model::collection::Collection;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use log::{debug, info};
use std::sync::Arc;

/// In-memory registry of collections keyed by owner identity.
#[derive(Debug, Default)]
pub struct CollectionStore {
    collections: DashMap<Identity, Arc<Collection>>,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collection for `owner`, creating an empty one if needed.
    pub fn ensure(&self, owner: Identity) -> Arc<Collection> {
        self.ensure_tracked(owner).0
    }

    /// Like [`ensure`](Self::ensure), also reporting whether this call
    /// created the collection.
    pub fn ensure_tracked(&self, owner: Identity) -> (Arc<Collection>, bool) {
        if let Some(existing) = self.collections.get(&owner) {
            return (Arc::clone(existing.value()), false);
        }

        // The entry holds its shard's write lock, so only one racing caller
        // reaches the vacant arm.
        match self.collections.entry(owner) {
            Entry::Occupied(entry) => (Arc::clone(entry.get()), false),
            Entry::Vacant(entry) => {
                let collection = Arc::new(Collection::new(owner));
                entry.insert(Arc::clone(&collection));
                info!("event=collection_create module=store status=created owner={owner}");
                (collection, true)
            }
        }
    }

    /// Returns the collection for `owner` without creating one.
    pub fn get(&self, owner: Identity) -> Option<Arc<Collection>> {
        self.collections
            .get(&owner)
            .map(|entry| Arc::clone(entry.value()))
    }

    pub fn exists(&self, owner: Identity) -> bool {
        let exists = self.collections.contains_key(&owner);
        debug!("event=collection_exists module=store status=ok owner={owner} exists={exists}");
        exists
    }

    /// Drops the collection for `owner`. Returns whether one existed.
    ///
    /// Callers still holding an `Arc` keep a detached collection; the store
    /// no longer hands it out.
    pub fn remove(&self, owner: Identity) -> bool {
        let removed = self.collections.remove(&owner).is_some();
        info!(
            "event=collection_delete module=store status={} owner={owner}",
            if removed { "deleted" } else { "not_found" }
        );
        removed
    }

    /// Number of live collections.
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::CollectionStore;
    use crate::identity::resolve;
    use std::sync::Arc;

    #[test]
    fn ensure_reuses_existing_collection() {
        let store = CollectionStore::new();
        let owner = resolve("fiona");

        let (first, created) = store.ensure_tracked(owner);
        assert!(created);
        let (second, created_again) = store.ensure_tracked(owner);
        assert!(!created_again);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_reports_absence() {
        let store = CollectionStore::new();
        let owner = resolve("gregor");

        assert!(!store.remove(owner));
        store.ensure(owner);
        assert!(store.exists(owner));
        assert!(store.remove(owner));
        assert!(!store.exists(owner));
        assert!(store.get(owner).is_none());
    }
}
