//! Simulated height oracle.
//!
//! A shared counter that only moves when the test says so. Clones share the
//! same counter, so a test keeps one handle and hands another to the
//! registry.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use maison_core::{Height, HeightOracle};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Upper bound (exclusive) for seeded genesis heights.
const MAX_SEEDED_GENESIS: Height = 1_000_000;

/// Manually advanced height oracle for deterministic simulation.
#[derive(Debug, Clone, Default)]
pub struct SimHeight {
    height: Arc<AtomicU64>,
}

impl SimHeight {
    /// Start at `genesis`.
    pub fn new(genesis: Height) -> Self {
        Self { height: Arc::new(AtomicU64::new(genesis)) }
    }

    /// Start at a genesis height derived from `seed`.
    ///
    /// Same seed, same genesis. Keeps tests from silently depending on the
    /// chain starting at zero.
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::new(rng.gen_range(0..MAX_SEEDED_GENESIS))
    }

    /// Move forward by `blocks` and return the new height. Saturates at
    /// `u64::MAX`.
    pub fn advance(&self, blocks: u64) -> Height {
        let previous = self
            .height
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |h| Some(h.saturating_add(blocks)))
            .unwrap_or_else(|h| h);
        previous.saturating_add(blocks)
    }
}

impl HeightOracle for SimHeight {
    fn current_height(&self) -> Height {
        self.height.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_height() {
        let height = SimHeight::new(10);
        let handle = height.clone();

        assert_eq!(handle.advance(5), 15);
        assert_eq!(height.current_height(), 15);
    }

    #[test]
    fn advance_saturates() {
        let height = SimHeight::new(u64::MAX - 1);

        assert_eq!(height.advance(10), u64::MAX);
        assert_eq!(height.current_height(), u64::MAX);
    }

    #[test]
    fn seeded_genesis_is_deterministic() {
        let a = SimHeight::with_seed(42);
        let b = SimHeight::with_seed(42);

        assert_eq!(a.current_height(), b.current_height());
        assert!(a.current_height() < MAX_SEEDED_GENESIS);
    }
}
