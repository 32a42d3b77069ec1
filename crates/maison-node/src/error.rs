//! Node error types.

use thiserror::Error;

use crate::script::ScriptError;

/// Errors that can occur in the node.
#[derive(Debug, Error)]
pub enum NodeError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Script could not be parsed
    #[error("script error: {0}")]
    Script(#[from] ScriptError),

    /// Reading the script or writing the report failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
