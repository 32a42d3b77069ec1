//! Maison registry replay node.
//!
//! Drives a [`RegistryService`] from a script of calls, one per line, and
//! reports each outcome in the registry's tagged `value`/`error` form.
//!
//! ## Architecture
//!
//! ```text
//! maison-node
//!   ├─ SystemHeight     (wall-clock HeightOracle)
//!   ├─ script           (line format → RegistryCall)
//!   └─ Node             (parse, dispatch, report)
//! ```
//!
//! The whole script is parsed before anything is executed, so a malformed
//! line never leaves a half-applied replay behind.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
pub mod script;
mod system_height;

use std::{io::Write, time::Duration};

pub use error::NodeError;
use maison_core::{AccountKey, HeightOracle, RegistryService};
pub use script::{ScriptCall, ScriptError, parse_line, parse_script};
pub use system_height::SystemHeight;

/// Node configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Initial admin identity
    pub admin: String,
    /// Height reported when the node starts
    pub genesis_height: u64,
    /// Wall-clock time per block (zero pins the height)
    pub block_interval: Duration,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            admin: "ST1ADMIN".to_string(),
            genesis_height: 0,
            block_interval: Duration::from_secs(600),
        }
    }
}

impl NodeConfig {
    /// Check the configuration for values the registry cannot start with.
    ///
    /// # Errors
    ///
    /// Returns `NodeError::Config` if the admin identity is blank.
    pub fn validate(&self) -> Result<(), NodeError> {
        if self.admin.trim().is_empty() {
            return Err(NodeError::Config("admin identity must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Totals from one replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplaySummary {
    /// Calls executed
    pub calls: usize,
    /// State-changing calls that succeeded
    pub mutations: usize,
    /// Calls that returned an error outcome
    pub failures: usize,
}

/// Replay node wrapping a registry.
#[derive(Debug)]
pub struct Node<H = SystemHeight>
where
    H: HeightOracle,
{
    registry: RegistryService<H>,
}

impl Node<SystemHeight> {
    /// Create a node from configuration, using the wall clock for heights.
    ///
    /// # Errors
    ///
    /// Returns `NodeError::Config` if the configuration is invalid.
    pub fn new(config: &NodeConfig) -> Result<Self, NodeError> {
        config.validate()?;
        let oracle = SystemHeight::new(config.genesis_height, config.block_interval);
        Ok(Self::with_oracle(config.admin.as_str(), oracle))
    }
}

impl<H> Node<H>
where
    H: HeightOracle,
{
    /// Create a node with an explicit height oracle.
    pub fn with_oracle(admin: impl Into<AccountKey>, oracle: H) -> Self {
        Self { registry: RegistryService::with_admin(admin, oracle) }
    }

    /// Registry driven by this node.
    pub fn registry(&self) -> &RegistryService<H> {
        &self.registry
    }

    /// Parse `source` and execute every call in order, writing one report
    /// line per call to `out`.
    ///
    /// Error outcomes are reported, not raised: they are ordinary registry
    /// results.
    ///
    /// # Errors
    ///
    /// Returns `NodeError::Script` if any line fails to parse (nothing is
    /// executed) and `NodeError::Io` if writing the report fails.
    pub fn replay(
        &mut self,
        source: &str,
        out: &mut impl Write,
    ) -> Result<ReplaySummary, NodeError> {
        let calls = parse_script(source)?;
        tracing::info!("Replaying {} calls", calls.len());

        let mut summary = ReplaySummary::default();
        for ScriptCall { line, call } in calls {
            let op = call.name();
            let mutating = call.is_mutating();
            let outcome = self.registry.dispatch(call);

            tracing::debug!(line, op, %outcome, "call executed");
            writeln!(out, "{line} {op} -> {outcome}")?;

            summary.calls += 1;
            if !outcome.is_ok() {
                summary.failures += 1;
            } else if mutating {
                summary.mutations += 1;
            }
        }

        tracing::info!(
            "Replay finished: {} calls, {} mutations, {} failures",
            summary.calls,
            summary.mutations,
            summary.failures
        );
        Ok(summary)
    }
}
