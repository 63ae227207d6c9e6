//! Core domain logic for the wishlist store.
//! This crate is the single source of truth for ownership, locking and
//! deduplication invariants.

pub mod config;
pub mod identity;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use config::{ConfigError, CoreConfig, LogLevel};
pub use identity::{resolve, Identity, IdentityError};
pub use logging::{init_logging, logging_status, LoggingError};
pub use model::collection::Collection;
pub use model::item::{Category, Item, ItemBuilder, ItemId, ItemValidationError, Metadata};
pub use model::request::ItemRequest;
pub use service::wishlist_service::{
    CollectionView, CreateOutcome, ServiceError, ServiceResult, WishlistService,
};
pub use store::CollectionStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
