//! Height oracle abstraction for deterministic testing.
//!
//! The `HeightOracle` trait decouples registry logic from the source of the
//! ledger height that gets stamped onto every write. This enables:
//!
//! - Deterministic Simulation: the harness advances a shared counter by hand,
//!   so every `updated_at` in a test is known in advance.
//!
//! - Production Runtime: the node derives the height from a monotonic clock
//!   without any change to the registry logic.
//!
//! # Invariants
//!
//! - Monotonicity: `current_height()` must never go backwards
//! - Isolation: Implementations must not share global state

use std::sync::Arc;

/// Ledger height stamped onto records at write time.
pub type Height = u64;

/// Abstract source of the current ledger height.
///
/// The registry reads the oracle once per successful mutating operation and
/// embeds the value verbatim into the record's `updated_at`. The registry
/// does not enforce monotonicity itself; it is a contract on the
/// implementation.
pub trait HeightOracle {
    /// Returns the current height.
    ///
    /// # Invariants
    ///
    /// - Monotonicity: Subsequent calls must return heights >= previous calls
    ///   within a single total order of operations.
    fn current_height(&self) -> Height;
}

impl<T: HeightOracle + ?Sized> HeightOracle for &T {
    fn current_height(&self) -> Height {
        (**self).current_height()
    }
}

impl<T: HeightOracle + ?Sized> HeightOracle for Arc<T> {
    fn current_height(&self) -> Height {
        (**self).current_height()
    }
}

/// Oracle pinned to a single height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedHeight(pub Height);

impl HeightOracle for FixedHeight {
    fn current_height(&self) -> Height {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_height_is_constant() {
        let oracle = FixedHeight(1234);
        assert_eq!(oracle.current_height(), 1234);
        assert_eq!(oracle.current_height(), 1234);
    }

    #[test]
    fn shared_handles_forward_to_inner() {
        let oracle = Arc::new(FixedHeight(7));
        let by_ref = &oracle;

        assert_eq!(oracle.current_height(), 7);
        assert_eq!(by_ref.current_height(), 7);
    }
}
