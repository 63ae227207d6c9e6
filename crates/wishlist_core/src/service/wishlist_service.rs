//! Wishlist use-case service.
//!
//! # Responsibility
//! - Expose the operations a transport layer calls, keyed by external id.
//! - Turn "not present" / "already present" booleans into semantic errors
//!   a transport can map onto its own status codes.
//!
//! # Invariants
//! - Item operations never create a collection; the caller must create it
//!   first.
//! - External ids resolve byte-for-byte; blank ids are rejected.
//! - The service never encodes transport details (status codes, headers).

use crate::identity::{resolve, Identity};
use crate::model::collection::Collection;
use crate::model::item::{Category, Item, ItemId, ItemValidationError};
use crate::model::request::ItemRequest;
use crate::store::CollectionStore;
use log::debug;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Service error for wishlist use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// External id is empty or whitespace only.
    InvalidExternalId,
    /// No collection exists for the resolved owner.
    CollectionNotFound(Identity),
    /// No item matched the removal request.
    ItemNotFound(ItemId),
    /// An equal item is already in the collection.
    DuplicateItem(ItemId),
    /// Inbound item fields failed validation.
    InvalidItem(ItemValidationError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidExternalId => write!(f, "external id must not be blank"),
            Self::CollectionNotFound(owner) => write!(f, "wish list not found: {owner}"),
            Self::ItemNotFound(item_id) => write!(f, "item not found: {item_id}"),
            Self::DuplicateItem(item_id) => write!(f, "item already exists: {item_id}"),
            Self::InvalidItem(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidItem(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ItemValidationError> for ServiceError {
    fn from(value: ItemValidationError) -> Self {
        Self::InvalidItem(value)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result of `create_collection`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// This call created the collection.
    Created,
    /// The collection was already present and is left untouched.
    AlreadyExists,
}

/// Read model returned by `get_items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionView {
    pub owner: Identity,
    /// Sorted by item id so repeated reads list items in the same order.
    pub items: Vec<Item>,
}

/// Wishlist facade over a shared [`CollectionStore`].
#[derive(Debug, Clone)]
pub struct WishlistService {
    store: Arc<CollectionStore>,
}

impl WishlistService {
    /// Creates a service over an existing store.
    pub fn new(store: Arc<CollectionStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<CollectionStore> {
        &self.store
    }

    /// Creates the caller's collection when it does not exist yet.
    pub fn create_collection(&self, external_id: &str) -> ServiceResult<CreateOutcome> {
        let owner = resolve_owner(external_id)?;
        let (_, created) = self.store.ensure_tracked(owner);
        Ok(if created {
            CreateOutcome::Created
        } else {
            CreateOutcome::AlreadyExists
        })
    }

    /// Empties and drops the caller's collection.
    pub fn delete_collection(&self, external_id: &str) -> ServiceResult<()> {
        let owner = resolve_owner(external_id)?;
        let collection = self.existing(owner)?;
        collection.clear();
        if !self.store.remove(owner) {
            return Err(ServiceError::CollectionNotFound(owner));
        }
        Ok(())
    }

    /// Lists the caller's items, optionally restricted to one category.
    pub fn get_items(
        &self,
        external_id: &str,
        category: Option<Category>,
    ) -> ServiceResult<CollectionView> {
        let owner = resolve_owner(external_id)?;
        let collection = self.existing(owner)?;
        let snapshot = match category {
            Some(category) => collection.filter_by_category(category),
            None => collection.items(),
        };
        let mut items: Vec<Item> = snapshot.into_iter().collect();
        items.sort_by_key(Item::id);
        debug!(
            "event=items_get module=service status=ok owner={owner} category={} count={}",
            category.map_or("all", Category::as_str),
            items.len()
        );
        Ok(CollectionView { owner, items })
    }

    /// Validates `request` and adds the resulting item.
    ///
    /// Returns the stored item's id, generated when the request had none.
    pub fn add_item(&self, external_id: &str, request: ItemRequest) -> ServiceResult<ItemId> {
        let owner = resolve_owner(external_id)?;
        let collection = self.existing(owner)?;
        let item = request.into_item()?;
        let item_id = item.id();
        if !collection.add(item) {
            return Err(ServiceError::DuplicateItem(item_id));
        }
        Ok(item_id)
    }

    /// Removes every item with `item_id`.
    pub fn remove_item_by_id(&self, external_id: &str, item_id: ItemId) -> ServiceResult<()> {
        let owner = resolve_owner(external_id)?;
        let collection = self.existing(owner)?;
        if !collection.remove_by_id(item_id) {
            return Err(ServiceError::ItemNotFound(item_id));
        }
        Ok(())
    }

    /// Removes the item matching every field of `request`.
    pub fn remove_item_by_value(&self, external_id: &str, request: ItemRequest) -> ServiceResult<()> {
        let owner = resolve_owner(external_id)?;
        let collection = self.existing(owner)?;
        let item = request.into_item_with_id_required()?;
        if !collection.remove_by_value(&item) {
            return Err(ServiceError::ItemNotFound(item.id()));
        }
        Ok(())
    }

    pub fn contains_item(&self, external_id: &str, item_id: ItemId) -> ServiceResult<bool> {
        let owner = resolve_owner(external_id)?;
        Ok(self.existing(owner)?.contains(item_id))
    }

    pub fn collection_size(&self, external_id: &str) -> ServiceResult<usize> {
        let owner = resolve_owner(external_id)?;
        Ok(self.existing(owner)?.size())
    }

    /// Removes all items but keeps the collection.
    pub fn clear_collection(&self, external_id: &str) -> ServiceResult<()> {
        let owner = resolve_owner(external_id)?;
        self.existing(owner)?.clear();
        Ok(())
    }

    fn existing(&self, owner: Identity) -> ServiceResult<Arc<Collection>> {
        self.store
            .get(owner)
            .ok_or(ServiceError::CollectionNotFound(owner))
    }
}

fn resolve_owner(external_id: &str) -> ServiceResult<Identity> {
    if external_id.trim().is_empty() {
        return Err(ServiceError::InvalidExternalId);
    }
    let owner = resolve(external_id);
    debug!("event=owner_resolve module=service status=ok owner={owner}");
    Ok(owner)
}
