//! Inbound item payload shared by add and remove-by-value.
//!
//! # Responsibility
//! - Carry untyped, possibly incomplete item fields from a transport.
//! - Enforce the inbound length bounds before an `Item` is built.
//!
//! # Invariants
//! - Length bounds are counted in chars, not bytes.
//! - Length bounds apply to inbound requests only; `Item` itself only
//!   enforces required fields.

use crate::model::item::{Category, Item, ItemBuilder, ItemId, ItemValidationError, Metadata};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MAX_TITLE_CHARS: usize = 100;
pub const MAX_DESCRIPTION_CHARS: usize = 500;
pub const MAX_IMAGE_CHARS: usize = 255;

/// Item fields as received from a caller.
///
/// `id` is optional on add (one is generated) and required on
/// remove-by-value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl ItemRequest {
    /// Request with the two required fields set.
    pub fn new(title: impl Into<String>, category: Category) -> Self {
        Self {
            title: Some(title.into()),
            category: Some(category),
            ..Self::default()
        }
    }

    /// Checks required fields and inbound length bounds.
    ///
    /// # Errors
    /// - `MissingTitle` / `MissingCategory` for absent required fields.
    /// - `FieldTooLong` when title, description or image exceed their bound.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        let title = self
            .title
            .as_deref()
            .filter(|title| !title.trim().is_empty())
            .ok_or(ItemValidationError::MissingTitle)?;
        check_len("title", title, MAX_TITLE_CHARS)?;
        if self.category.is_none() {
            return Err(ItemValidationError::MissingCategory);
        }
        if let Some(description) = self.description.as_deref() {
            check_len("description", description, MAX_DESCRIPTION_CHARS)?;
        }
        if let Some(image) = self.image.as_deref() {
            check_len("image", image, MAX_IMAGE_CHARS)?;
        }
        Ok(())
    }

    /// Validates and builds an item, generating an id when absent.
    pub fn into_item(self) -> Result<Item, ItemValidationError> {
        self.validate()?;
        self.into_builder().build()
    }

    /// Validates and builds an item whose id must come from the caller.
    ///
    /// Used where the item refers to one already stored (remove-by-value).
    pub fn into_item_with_id_required(self) -> Result<Item, ItemValidationError> {
        if self.id.is_none() {
            return Err(ItemValidationError::MissingId);
        }
        self.into_item()
    }

    fn into_builder(self) -> ItemBuilder {
        ItemBuilder {
            id: self.id,
            title: self.title,
            category: self.category,
            description: self.description,
            image: self.image,
            date: self.date,
            metadata: self.metadata,
        }
    }
}

impl From<&Item> for ItemRequest {
    fn from(item: &Item) -> Self {
        Self {
            id: Some(item.id()),
            title: Some(item.title().to_string()),
            category: Some(item.category()),
            description: item.description().map(str::to_string),
            image: item.image().map(str::to_string),
            date: item.date(),
            metadata: item.metadata().cloned(),
        }
    }
}

/// Decoding path for already-stored items: id required, no length bounds.
impl TryFrom<ItemRequest> for Item {
    type Error = ItemValidationError;

    fn try_from(value: ItemRequest) -> Result<Self, Self::Error> {
        if value.id.is_none() {
            return Err(ItemValidationError::MissingId);
        }
        value.into_builder().build()
    }
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ItemValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ItemValidationError::FieldTooLong { field, max, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ItemRequest, MAX_TITLE_CHARS};
    use crate::model::item::{Category, ItemValidationError};

    #[test]
    fn validate_counts_chars_not_bytes() {
        let title = "é".repeat(MAX_TITLE_CHARS);
        assert!(ItemRequest::new(title, Category::Event).validate().is_ok());

        let title = "é".repeat(MAX_TITLE_CHARS + 1);
        assert_eq!(
            ItemRequest::new(title, Category::Event).validate(),
            Err(ItemValidationError::FieldTooLong {
                field: "title",
                max: MAX_TITLE_CHARS,
                actual: MAX_TITLE_CHARS + 1,
            })
        );
    }

    #[test]
    fn validate_requires_category() {
        let request = ItemRequest {
            title: Some("Kelpies".to_string()),
            ..ItemRequest::default()
        };
        assert_eq!(request.validate(), Err(ItemValidationError::MissingCategory));
    }
}
