//! Reference model for model-based testing.
//!
//! The model is a simplified implementation that captures the intended
//! behavior of the registry with none of its representation choices. It
//! serves as the oracle against which the real implementation is verified.
//!
//! # Design Principles
//!
//! - Simplicity: The model should be obviously correct
//! - Behavior not representation: Captures WHAT, not HOW
//! - Deterministic: Same inputs produce same outputs

pub mod operation;
mod registry;

pub use operation::{ClientId, Operation, OperationResult, SmallContent, account_key};
pub use registry::{ModelMaison, ModelRegistry, ModelStatus, ObservableState};
