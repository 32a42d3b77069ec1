//! Model registry - the reference implementation.
//!
//! Tracks each client's record as an explicit lifecycle state instead of two
//! flags, so the model cannot represent the "registered and rejected" state
//! at all. The real implementation is checked against it.

use std::collections::BTreeMap;

use maison_core::ErrorCode;

use super::operation::{ClientId, Operation, OperationResult, SmallContent};

/// Lifecycle of a client's record in the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelStatus {
    /// Registered, updatable.
    Active,
    /// Rejected by the admin. Terminal.
    Rejected,
}

/// Record in the model (simplified).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelMaison {
    /// Content last written by the owner.
    pub content: SmallContent,
    /// Lifecycle state.
    pub status: ModelStatus,
    /// Height of last write.
    pub updated_at: u64,
}

/// Observable state for oracle comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservableState {
    /// Current admin.
    pub admin: ClientId,
    /// Every record, ordered by client.
    pub records: Vec<(ClientId, ModelMaison)>,
}

/// Reference registry.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    admin: ClientId,
    records: BTreeMap<ClientId, ModelMaison>,
    height: u64,
}

impl ModelRegistry {
    /// Create a model with client 0 as admin, starting at `genesis`.
    pub fn new(genesis: u64) -> Self {
        Self { admin: 0, records: BTreeMap::new(), height: genesis }
    }

    /// Current admin.
    pub fn admin(&self) -> ClientId {
        self.admin
    }

    /// Current height.
    pub fn height(&self) -> u64 {
        self.height
    }

    /// Record for a client, if any.
    pub fn record(&self, client_id: ClientId) -> Option<&ModelMaison> {
        self.records.get(&client_id)
    }

    /// Apply an operation and return the result.
    ///
    /// The result should match the real implementation's result.
    pub fn apply(&mut self, op: &Operation) -> OperationResult {
        match op {
            Operation::Register { client_id, content } => self.register(*client_id, *content),
            Operation::Update { client_id, content } => self.update(*client_id, *content),
            Operation::Reject { client_id, target } => self.reject(*client_id, *target),
            Operation::TransferAdmin { client_id, new_admin } => {
                self.transfer_admin(*client_id, *new_admin)
            },
            Operation::Inspect { client_id } => {
                if self.records.contains_key(client_id) {
                    OperationResult::Ok
                } else {
                    OperationResult::Error(ErrorCode::NotFound)
                }
            },
            Operation::AdvanceHeight { blocks } => {
                self.height = self.height.saturating_add(u64::from(*blocks));
                OperationResult::Ok
            },
        }
    }

    /// Extract observable state for comparison.
    pub fn observable_state(&self) -> ObservableState {
        ObservableState {
            admin: self.admin,
            records: self.records.iter().map(|(id, m)| (*id, m.clone())).collect(),
        }
    }

    fn register(&mut self, client_id: ClientId, content: SmallContent) -> OperationResult {
        if self.records.contains_key(&client_id) {
            return OperationResult::Error(ErrorCode::AlreadyRegistered);
        }

        self.records.insert(
            client_id,
            ModelMaison { content, status: ModelStatus::Active, updated_at: self.height },
        );
        OperationResult::Ok
    }

    fn update(&mut self, client_id: ClientId, content: SmallContent) -> OperationResult {
        let height = self.height;
        match self.records.get_mut(&client_id) {
            None => OperationResult::Error(ErrorCode::NotFound),
            Some(record) if record.status == ModelStatus::Rejected => {
                OperationResult::Error(ErrorCode::Rejected)
            },
            Some(record) => {
                *record = ModelMaison { content, status: ModelStatus::Active, updated_at: height };
                OperationResult::Ok
            },
        }
    }

    fn reject(&mut self, client_id: ClientId, target: ClientId) -> OperationResult {
        if client_id != self.admin {
            return OperationResult::Error(ErrorCode::Unauthorized);
        }

        let height = self.height;
        match self.records.get_mut(&target) {
            None => OperationResult::Error(ErrorCode::NotFound),
            Some(record) => {
                record.status = ModelStatus::Rejected;
                record.updated_at = height;
                OperationResult::Ok
            },
        }
    }

    fn transfer_admin(&mut self, client_id: ClientId, new_admin: ClientId) -> OperationResult {
        if client_id != self.admin {
            return OperationResult::Error(ErrorCode::Unauthorized);
        }

        self.admin = new_admin;
        OperationResult::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(seed: u8) -> SmallContent {
        SmallContent { seed }
    }

    #[test]
    fn model_follows_lifecycle() {
        let mut model = ModelRegistry::new(0);

        assert!(model.apply(&Operation::Register { client_id: 1, content: content(1) }).is_ok());
        assert!(model.apply(&Operation::Reject { client_id: 0, target: 1 }).is_ok());
        assert_eq!(
            model.apply(&Operation::Update { client_id: 1, content: content(2) }),
            OperationResult::Error(ErrorCode::Rejected)
        );
        assert_eq!(model.record(1).map(|r| r.status), Some(ModelStatus::Rejected));
        assert_eq!(model.record(1).map(|r| r.content), Some(content(1)));
    }

    #[test]
    fn model_stamps_current_height() {
        let mut model = ModelRegistry::new(50);
        model.apply(&Operation::Register { client_id: 2, content: content(0) });
        model.apply(&Operation::AdvanceHeight { blocks: 4 });
        model.apply(&Operation::Update { client_id: 2, content: content(9) });

        assert_eq!(model.height(), 54);
        assert_eq!(model.record(2).map(|r| r.updated_at), Some(54));
    }

    #[test]
    fn model_admin_transfer() {
        let mut model = ModelRegistry::new(0);

        assert_eq!(
            model.apply(&Operation::TransferAdmin { client_id: 1, new_admin: 1 }),
            OperationResult::Error(ErrorCode::Unauthorized)
        );
        assert!(model.apply(&Operation::TransferAdmin { client_id: 0, new_admin: 3 }).is_ok());
        assert_eq!(model.admin(), 3);
    }
}
