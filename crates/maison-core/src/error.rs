//! Registry error types.
//!
//! Every failure is an expected business outcome returned as a value. None of
//! them is fatal, and every guard runs before any mutation, so a failed
//! operation leaves the registry exactly as it was.

use serde_repr::{Deserialize_repr, Serialize_repr};
use thiserror::Error;

use crate::types::AccountKey;

/// Stable wire codes for registry failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u16)]
pub enum ErrorCode {
    /// Caller is not the admin.
    Unauthorized = 100,
    /// Account already has a record.
    AlreadyRegistered = 101,
    /// Account has no record.
    NotFound = 102,
    /// Record has been moderated and is frozen.
    Rejected = 103,
}

impl ErrorCode {
    /// Numeric wire value.
    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

/// Errors from `RegistryService` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Privileged operation attempted by a non-admin.
    #[error("unauthorized: {caller} is not the admin")]
    Unauthorized {
        /// Identity that attempted the operation.
        caller: AccountKey,
    },

    /// Registration attempted for a key that already has a record.
    #[error("already registered: {account}")]
    AlreadyRegistered {
        /// Key that is already present.
        account: AccountKey,
    },

    /// No record exists for the key.
    #[error("maison not found: {account}")]
    NotFound {
        /// Key that was looked up.
        account: AccountKey,
    },

    /// Update attempted on a moderated record.
    #[error("maison rejected: {account}")]
    Rejected {
        /// Key of the moderated record.
        account: AccountKey,
    },
}

impl RegistryError {
    /// Stable wire code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Unauthorized { .. } => ErrorCode::Unauthorized,
            Self::AlreadyRegistered { .. } => ErrorCode::AlreadyRegistered,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::Rejected { .. } => ErrorCode::Rejected,
        }
    }

    /// Whether re-issuing the same call could succeed once state changes.
    ///
    /// `AlreadyRegistered` and `Rejected` are permanent for the key: nothing
    /// removes a record or clears the rejected flag.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Unauthorized { .. } | Self::NotFound { .. } => true,
            Self::AlreadyRegistered { .. } | Self::Rejected { .. } => false,
        }
    }
}
