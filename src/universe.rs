//! Number-pool normalization and the triple universe.
//!
//! Every algorithm variant operating on the same pool must agree on the bit
//! position of each triplet, so the universe (ordered triplet list + index
//! map) is built once per pool and shared by reference.

use std::collections::HashMap;

/// An ascending 3-element subset of the pool; the unit of coverage.
pub type Triplet = [u32; 3];

/// Deduplicates and sorts the caller's numbers into a canonical pool.
///
/// The returned vector is strictly ascending, which fixes the enumeration
/// order of every combination derived from it.
pub fn normalize_pool(numbers: &[u32]) -> Vec<u32> {
    let mut pool: Vec<u32> = numbers.to_vec();
    pool.sort_unstable();
    pool.dedup();
    pool
}

/// The full triplet space of a pool, with a stable index per triplet.
#[derive(Clone, Debug, Default)]
pub struct TripleUniverse {
    triplets: Vec<Triplet>,
    index: HashMap<Triplet, usize>,
}

impl TripleUniverse {
    /// Enumerates all 3-combinations of `pool` in lexicographic order and
    /// assigns each its position as index.
    ///
    /// `pool` must already be normalized (sorted, deduplicated). A pool with
    /// fewer than 3 elements yields an empty universe, which callers treat as
    /// vacuously covered.
    pub fn build(pool: &[u32]) -> Self {
        debug_assert!(pool.windows(2).all(|w| w[0] < w[1]), "pool not normalized");

        let n = pool.len();
        if n < 3 {
            return Self::default();
        }

        let mut triplets = Vec::with_capacity(n * (n - 1) * (n - 2) / 6);
        for a in 0..n - 2 {
            for b in a + 1..n - 1 {
                for c in b + 1..n {
                    triplets.push([pool[a], pool[b], pool[c]]);
                }
            }
        }
        let index = triplets.iter().enumerate().map(|(i, &t)| (t, i)).collect();
        Self { triplets, index }
    }

    /// Universe size `U` (total triplet count).
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.triplets.len()
    }

    /// Returns `true` for a degenerate (pool < 3) universe.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.triplets.is_empty()
    }

    /// Bit position of `triplet`, if it belongs to this universe.
    #[inline]
    pub fn index_of(&self, triplet: &Triplet) -> Option<usize> {
        self.index.get(triplet).copied()
    }

    /// The triplet occupying bit position `i`.
    #[inline]
    pub fn triplet_at(&self, i: usize) -> Triplet {
        self.triplets[i]
    }

    /// All triplets in index order.
    #[inline]
    pub fn triplets(&self) -> &[Triplet] {
        &self.triplets
    }
}

/// Visits each ascending 3-combination of `ticket` once.
///
/// `ticket` is assumed sorted; the visited triplets are then themselves in
/// lexicographic order.
#[inline]
pub fn for_each_triplet<F: FnMut(Triplet)>(ticket: &[u32], mut f: F) {
    let n = ticket.len();
    if n < 3 {
        return;
    }
    for a in 0..n - 2 {
        for b in a + 1..n - 1 {
            for c in b + 1..n {
                f([ticket[a], ticket[b], ticket[c]]);
            }
        }
    }
}
