//! Unified entry point: one closed `Mode` enum, resolved exactly once.

use crate::greedy;
use crate::reduce;
use crate::sampled::{self, FastConfig};
use crate::system::CoverSystem;
use crate::universe::normalize_pool;

/// Pools at or below this size gain nothing from sampling; fast mode
/// downgrades to classic, which is both better and quicker there.
const FAST_MODE_MIN_POOL: usize = 16;

/// Optimizer variant selection.
#[derive(Clone, Debug, PartialEq)]
pub enum Mode {
    /// Exact greedy over the full candidate set.
    Classic,
    /// Rarity-weighted sampled greedy with independent restarts.
    Fast(FastConfig),
    /// Classic greedy followed by redundancy elimination.
    Hybrid,
}

/// Runs the selected optimizer variant on `(numbers, k)`.
pub fn run(numbers: &[u32], k: usize, mode: Mode) -> CoverSystem {
    match mode {
        Mode::Fast(cfg) if normalize_pool(numbers).len() >= FAST_MODE_MIN_POOL => {
            sampled::cover_fast(numbers, k, &cfg)
        }
        // Small pool: sampling overhead is pure loss.
        Mode::Fast(_) | Mode::Classic => greedy::cover(numbers, k),
        Mode::Hybrid => reduce::cover_hybrid(numbers, k),
    }
}
