//! Registry record types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::env::Height;

/// Opaque account identity, the sole key of the registry.
///
/// Authentication happens upstream; by the time a key reaches the registry it
/// is taken at face value. No format validation is performed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountKey(String);

impl AccountKey {
    /// Wrap a raw identity string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the raw identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AccountKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccountKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<String> for AccountKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Display for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle state of a stored record.
///
/// `Absent` is not represented: an account without a record simply has no
/// `Maison`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaisonStatus {
    /// Registered and updatable by its owner.
    Active,
    /// Moderated by the admin. Terminal.
    Rejected,
}

/// Profile record owned by one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maison {
    /// Display name. Not unique.
    pub name: String,
    /// Content identifier pointing at off-system metadata. Uninterpreted.
    pub cid: String,
    /// True while the record is usable.
    pub registered: bool,
    /// True once moderated. Never cleared.
    pub rejected: bool,
    /// Height of the last write.
    pub updated_at: Height,
}

impl Maison {
    /// Record shape written by registration and update.
    pub fn active(name: impl Into<String>, cid: impl Into<String>, height: Height) -> Self {
        Self {
            name: name.into(),
            cid: cid.into(),
            registered: true,
            rejected: false,
            updated_at: height,
        }
    }

    /// Moderated copy of this record: `name`/`cid` preserved, flags flipped,
    /// height re-stamped.
    #[must_use]
    pub fn into_rejected(self, height: Height) -> Self {
        Self { registered: false, rejected: true, updated_at: height, ..self }
    }

    /// Current lifecycle state.
    ///
    /// `rejected` wins over `registered`, matching the write shapes above
    /// where the two flags are never both set.
    pub fn status(&self) -> MaisonStatus {
        if self.rejected { MaisonStatus::Rejected } else { MaisonStatus::Active }
    }
}
