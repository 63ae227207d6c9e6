//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store and collection calls into use-case level APIs.
//! - Keep transport layers decoupled from locking and storage details.

pub mod wishlist_service;
