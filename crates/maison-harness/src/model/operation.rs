//! Operations for model-based testing.
//!
//! Operations represent all possible actions in the system. They are generated
//! randomly by proptest and applied to both the model and real implementation.

use arbitrary::Arbitrary;
use maison_core::{AccountKey, ErrorCode, RegistryCall};

/// Client identifier (0-indexed). Client 0 starts as admin.
pub type ClientId = u8;

/// Map a model client to its account key in the real system.
pub fn account_key(client_id: ClientId) -> AccountKey {
    AccountKey::new(format!("ST{client_id}USER"))
}

/// Operations that can be applied to the system.
///
/// Every registry call is covered, plus height movement. Client IDs are
/// clamped to the world size before use.
#[derive(Debug, Clone, Arbitrary)]
pub enum Operation {
    /// Client registers a maison.
    Register {
        /// Client performing the operation.
        client_id: ClientId,
        /// Name/cid seed.
        content: SmallContent,
    },

    /// Client replaces its maison.
    Update {
        /// Client performing the operation.
        client_id: ClientId,
        /// Name/cid seed.
        content: SmallContent,
    },

    /// Client attempts to reject another client's maison.
    Reject {
        /// Client performing the operation.
        client_id: ClientId,
        /// Owner of the targeted record.
        target: ClientId,
    },

    /// Client attempts to hand admin rights to another client.
    TransferAdmin {
        /// Client performing the operation.
        client_id: ClientId,
        /// Proposed next admin.
        new_admin: ClientId,
    },

    /// Read a client's record.
    Inspect {
        /// Client whose record is read.
        client_id: ClientId,
    },

    /// Advance the ledger height.
    AdvanceHeight {
        /// Blocks to advance.
        blocks: u8,
    },
}

impl Operation {
    /// Copy with every client ID reduced modulo `num_clients`.
    pub fn clamp(&self, num_clients: usize) -> Self {
        let n = u8::try_from(num_clients.clamp(1, usize::from(u8::MAX))).unwrap_or(u8::MAX);
        match self.clone() {
            Self::Register { client_id, content } => {
                Self::Register { client_id: client_id % n, content }
            },
            Self::Update { client_id, content } => Self::Update { client_id: client_id % n, content },
            Self::Reject { client_id, target } => {
                Self::Reject { client_id: client_id % n, target: target % n }
            },
            Self::TransferAdmin { client_id, new_admin } => {
                Self::TransferAdmin { client_id: client_id % n, new_admin: new_admin % n }
            },
            Self::Inspect { client_id } => Self::Inspect { client_id: client_id % n },
            other @ Self::AdvanceHeight { .. } => other,
        }
    }

    /// Registry call this operation maps to. `None` for height movement.
    pub fn to_call(&self) -> Option<RegistryCall> {
        match self {
            Self::Register { client_id, content } => Some(RegistryCall::RegisterMaison {
                caller: account_key(*client_id),
                name: content.name(),
                cid: content.cid(),
            }),
            Self::Update { client_id, content } => Some(RegistryCall::UpdateMaison {
                caller: account_key(*client_id),
                name: content.name(),
                cid: content.cid(),
            }),
            Self::Reject { client_id, target } => Some(RegistryCall::RejectMaison {
                caller: account_key(*client_id),
                target: account_key(*target),
            }),
            Self::TransferAdmin { client_id, new_admin } => Some(RegistryCall::TransferAdmin {
                caller: account_key(*client_id),
                new_admin: account_key(*new_admin),
            }),
            Self::Inspect { client_id } => {
                Some(RegistryCall::GetMaison { account: account_key(*client_id) })
            },
            Self::AdvanceHeight { .. } => None,
        }
    }
}

/// Compact name/cid content for testing.
///
/// The seed expands deterministically, so two operations with the same seed
/// write identical records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub struct SmallContent {
    /// Content seed.
    pub seed: u8,
}

impl SmallContent {
    /// Display name for this seed.
    pub fn name(&self) -> String {
        format!("Maison {}", self.seed)
    }

    /// Content identifier for this seed.
    pub fn cid(&self) -> String {
        format!("Qm{:02x}", self.seed)
    }
}

/// Result of applying an operation.
///
/// Used to compare model and real system behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationResult {
    /// Operation succeeded.
    Ok,

    /// Operation failed with a registry error code.
    Error(ErrorCode),
}

impl OperationResult {
    /// Check if operation succeeded.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Check if operation failed.
    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }
}
