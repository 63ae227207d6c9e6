//! Wishlist item domain model.
//!
//! # Responsibility
//! - Define the immutable `Item` record stored in collections.
//! - Define full-field equality, the rule collections deduplicate by.
//!
//! # Invariants
//! - `id` is never nil and `title` is never blank.
//! - `Eq` and `Hash` cover all seven fields; `title` compares case-insensitively.
//! - Two items with different ids are never equal, whatever else matches.
//!
//! # See also
//! - crate::model::collection

use crate::model::request::ItemRequest;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use unicase::UniCase;
use uuid::Uuid;

/// Stable identifier of one item.
pub type ItemId = Uuid;

/// Free-form item metadata; values are arbitrary JSON.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// Closed classification used to group and filter items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Lodging or overnight stays.
    Accommodation,
    /// Tourist attractions and points of interest.
    Attraction,
    /// Scheduled events such as festivals or performances.
    Event,
}

impl Category {
    pub const ALL: [Category; 3] = [Self::Accommodation, Self::Attraction, Self::Event];

    /// Wire name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accommodation => "ACCOMMODATION",
            Self::Attraction => "ATTRACTION",
            Self::Event => "EVENT",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ItemValidationError;

    /// Parses a wire name, ignoring ASCII case and surrounding whitespace.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ItemValidationError::UnknownCategory(trimmed.to_string()))
    }
}

/// Validation errors for item construction and inbound item requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    /// The nil UUID cannot identify an item.
    NilId,
    /// Request path that needs an explicit id did not carry one.
    MissingId,
    /// Title is absent or whitespace only.
    MissingTitle,
    /// Category is absent.
    MissingCategory,
    /// Category text does not name a known category.
    UnknownCategory(String),
    /// A bounded text field exceeds its limit (counted in chars).
    FieldTooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "item id must not be nil"),
            Self::MissingId => write!(f, "item id must be provided"),
            Self::MissingTitle => write!(f, "item title must not be blank"),
            Self::MissingCategory => write!(f, "item category must be specified"),
            Self::UnknownCategory(value) => write!(
                f,
                "unknown category `{value}`; expected ACCOMMODATION|ATTRACTION|EVENT"
            ),
            Self::FieldTooLong { field, max, actual } => write!(
                f,
                "item {field} must not exceed {max} characters (got {actual})"
            ),
        }
    }
}

impl Error for ItemValidationError {}

/// One wishlist entry.
///
/// Fields are private so an `Item` can only be produced through
/// [`ItemBuilder::build`] (or deserialization, which goes through it).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ItemRequest")]
pub struct Item {
    id: ItemId,
    title: String,
    category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<Metadata>,
}

impl Item {
    /// Starts a builder with the two required fields set.
    pub fn builder(title: impl Into<String>, category: Category) -> ItemBuilder {
        ItemBuilder::default().title(title).category(category)
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }
}

/// Title under Unicode case folding, so `Σ`, `σ` and `ς` all compare equal.
fn folded_title(title: &str) -> UniCase<&str> {
    UniCase::new(title)
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.category == other.category
            && folded_title(&self.title) == folded_title(&other.title)
            && self.description == other.description
            && self.image == other.image
            && self.date == other.date
            && self.metadata == other.metadata
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.category.hash(state);
        folded_title(&self.title).hash(state);
        self.description.hash(state);
        self.image.hash(state);
        self.date.hash(state);
        // JSON values are not `Hash`; keys alone still agree with `Eq`.
        match &self.metadata {
            None => state.write_u8(0),
            Some(map) => {
                state.write_u8(1);
                map.len().hash(state);
                for key in map.keys() {
                    key.hash(state);
                }
            }
        }
    }
}

/// Builder for [`Item`]; `build` enforces the required-field rules.
#[derive(Debug, Clone, Default)]
pub struct ItemBuilder {
    pub(crate) id: Option<ItemId>,
    pub(crate) title: Option<String>,
    pub(crate) category: Option<Category>,
    pub(crate) description: Option<String>,
    pub(crate) image: Option<String>,
    pub(crate) date: Option<NaiveDate>,
    pub(crate) metadata: Option<Metadata>,
}

impl ItemBuilder {
    /// Uses a caller-provided id instead of generating one.
    pub fn id(mut self, id: ItemId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Builds the item, generating a v4 id when none was set.
    ///
    /// # Errors
    /// - `NilId` when the provided id is nil.
    /// - `MissingTitle` when the title is absent or blank.
    /// - `MissingCategory` when the category is absent.
    pub fn build(self) -> Result<Item, ItemValidationError> {
        let id = self.id.unwrap_or_else(Uuid::new_v4);
        if id.is_nil() {
            return Err(ItemValidationError::NilId);
        }
        let title = match self.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => return Err(ItemValidationError::MissingTitle),
        };
        let category = self.category.ok_or(ItemValidationError::MissingCategory)?;

        Ok(Item {
            id,
            title,
            category,
            description: self.description,
            image: self.image,
            date: self.date,
            metadata: self.metadata,
        })
    }
}
