//! Classic greedy maximum-coverage selection over the full candidate set.
//!
//! Deterministic: candidates are scanned in enumeration order every
//! iteration, the strictly largest marginal gain wins, and ties keep the
//! first-seen candidate. The full rescan per iteration is intentional
//! simplicity; incremental bookkeeping (lazy greedy) would change
//! tie-breaking under equal gains.

use crate::candidate::CandidateSet;
use crate::mask::Mask;
use crate::system::CoverSystem;
use crate::universe::{TripleUniverse, normalize_pool};

/// Builds a ticket system covering as much of the pool's triplet universe as
/// possible, one maximum-gain ticket at a time.
///
/// Terminal non-error states: an insufficient pool or a fully filtered
/// candidate set both return an empty system with a warning; a pool of fewer
/// than 3 numbers has nothing to cover and reports 100%.
pub fn cover(numbers: &[u32], k: usize) -> CoverSystem {
    let pool = normalize_pool(numbers);
    if pool.len() < k {
        return CoverSystem::empty_with_warning(
            0,
            format!("not enough numbers: pool has {}, ticket size is {k}", pool.len()),
        );
    }

    let universe = TripleUniverse::build(&pool);
    if universe.is_empty() {
        return CoverSystem::trivially_covered();
    }

    let candidates = CandidateSet::build(&pool, k, &universe);
    if candidates.is_empty() {
        let mut sys = CoverSystem::empty_with_warning(
            universe.len(),
            "all candidate tickets excluded by the four-in-row rule",
        );
        sys.uncovered_triplets = universe.triplets().to_vec();
        return sys;
    }

    let (chosen, uncovered) = greedy_select(&candidates, universe.len());
    CoverSystem::from_selection(chosen, &uncovered, &universe, true)
}

/// The greedy loop proper: returns the chosen tickets (in selection order)
/// and the final uncovered mask.
///
/// Each iteration clears at least one bit or terminates, so the loop runs at
/// most `universe_len` times.
pub(crate) fn greedy_select(
    candidates: &CandidateSet,
    universe_len: usize,
) -> (Vec<Vec<u32>>, Mask) {
    let mut uncovered = Mask::ones(universe_len);
    let mut chosen = Vec::new();

    while !uncovered.is_zero() {
        let mut best_idx = None;
        let mut best_gain = 0usize;

        for (idx, mask) in candidates.masks.iter().enumerate() {
            let gain = mask.and_count(&uncovered);
            if gain > best_gain {
                best_gain = gain;
                best_idx = Some(idx);
            }
        }

        // Zero gain: remaining triplets are unreachable under the exclusion
        // rule. Valid terminal state.
        let Some(idx) = best_idx else { break };

        chosen.push(candidates.tickets[idx].clone());
        uncovered.clear_bits_of(&candidates.masks[idx]);
    }

    (chosen, uncovered)
}
