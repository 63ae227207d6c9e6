//! Wishlist domain model.
//!
//! # Responsibility
//! - Define the item record and the per-owner collection that holds it.
//! - Define the inbound request shape transports build items from.
//!
//! # Invariants
//! - Items are immutable once built.
//! - A collection always has exactly one owner identity.

pub mod collection;
pub mod item;
pub mod request;
