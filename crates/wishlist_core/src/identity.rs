//! Identity resolution for collection owners.
//!
//! # Responsibility
//! - Map an external caller id (any string) to a stable internal `Identity`.
//! - Guard the "every collection has an owner" rule at construction time.
//!
//! # Invariants
//! - `resolve` is pure and total: same input, same output, in any process.
//! - No randomness, locale or process-local seed participates in derivation.
//! - An `Identity` is never the nil UUID.
//!
//! # See also
//! - crate::store::CollectionStore

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Fixed UUID v5 namespace for owner identities.
///
/// Changing this value re-keys every identity, so it must stay constant
/// for the lifetime of any deployment.
pub const IDENTITY_NAMESPACE: Uuid = Uuid::from_u128(0x5c1e_7a2d_94b3_4f06_8e2a_d7b1_3f90_c4a8);

/// Internal owner key derived from an external id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Uuid", into = "Uuid")]
pub struct Identity(Uuid);

/// Error raised when an identity value cannot represent an owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityError {
    /// The nil UUID never identifies an owner.
    Nil,
}

impl Display for IdentityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nil => write!(f, "identity must not be the nil uuid"),
        }
    }
}

impl Error for IdentityError {}

impl Identity {
    /// Rebuilds an identity from a previously derived UUID.
    ///
    /// # Errors
    /// - Returns `IdentityError::Nil` for the nil UUID.
    pub fn from_uuid(value: Uuid) -> Result<Self, IdentityError> {
        if value.is_nil() {
            return Err(IdentityError::Nil);
        }
        Ok(Self(value))
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl TryFrom<Uuid> for Identity {
    type Error = IdentityError;

    fn try_from(value: Uuid) -> Result<Self, Self::Error> {
        Self::from_uuid(value)
    }
}

impl From<Identity> for Uuid {
    fn from(value: Identity) -> Self {
        value.0
    }
}

impl Display for Identity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Derives the stable identity for an external id.
///
/// Uses UUID v5 (SHA-1) over the raw UTF-8 bytes under
/// [`IDENTITY_NAMESPACE`]. The input is not trimmed or case-folded here;
/// callers that want normalization apply it before resolving.
pub fn resolve(external_id: &str) -> Identity {
    // v5 output carries version bits, so it can never be nil.
    Identity(Uuid::new_v5(&IDENTITY_NAMESPACE, external_id.as_bytes()))
}
