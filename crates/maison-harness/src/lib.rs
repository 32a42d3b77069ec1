//! Deterministic simulation harness for Maison registry testing.
//!
//! Provides a manually driven `HeightOracle` and a reference model of the
//! registry.
//!
//! # Model-Based Testing
//!
//! The `model` module provides a reference implementation for model-based
//! testing. Operations are applied to both the model and real implementation,
//! and their observable states are compared.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod model;
pub mod sim_height;

pub use model::{
    ClientId, ModelMaison, ModelRegistry, ModelStatus, ObservableState, Operation,
    OperationResult, SmallContent, account_key,
};
pub use sim_height::SimHeight;
