//! Production height oracle using the system monotonic clock.
//!
//! `SystemHeight` counts whole block intervals elapsed since the node started
//! and adds them to a configured genesis height.

use std::time::{Duration, Instant};

use maison_core::{Height, HeightOracle};

/// Wall-clock height oracle.
///
/// Monotonic because it is built on `Instant`, which never goes backwards.
#[derive(Debug, Clone)]
pub struct SystemHeight {
    genesis: Height,
    started: Instant,
    block_interval: Duration,
}

impl SystemHeight {
    /// Create an oracle at `genesis` that advances one block per
    /// `block_interval`. A zero interval pins the height at `genesis`.
    pub fn new(genesis: Height, block_interval: Duration) -> Self {
        Self { genesis, started: Instant::now(), block_interval }
    }
}

impl HeightOracle for SystemHeight {
    fn current_height(&self) -> Height {
        if self.block_interval.is_zero() {
            return self.genesis;
        }

        let blocks = self.started.elapsed().as_nanos() / self.block_interval.as_nanos();
        self.genesis.saturating_add(u64::try_from(blocks).unwrap_or(u64::MAX))
    }
}
