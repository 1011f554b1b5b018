//! Candidate ticket enumeration and coverage-mask building.
//!
//! Candidates are all k-subsets of the pool in lexicographic order, minus any
//! combination containing four numerically consecutive values. Enumeration
//! order is fixed so that classic-mode results are reproducible and greedy
//! tie-breaking (first-seen wins) is well defined.

use crate::mask::Mask;
use crate::universe::{TripleUniverse, for_each_triplet};

/// Returns `true` if the sorted slice contains four consecutive integers.
pub fn has_four_in_row(ticket: &[u32]) -> bool {
    if ticket.len() < 4 {
        return false;
    }
    for w in ticket.windows(4) {
        if w[1] == w[0] + 1 && w[2] == w[0] + 2 && w[3] == w[0] + 3 {
            return true;
        }
    }
    false
}

/// Enumerates all valid k-subsets of a normalized pool, lexicographically.
///
/// Returns an empty vector when `pool.len() < k` or `k == 0`; the caller is
/// responsible for reporting that as an insufficient-pool condition.
pub fn enumerate_tickets(pool: &[u32], k: usize) -> Vec<Vec<u32>> {
    let n = pool.len();
    if k == 0 || n < k {
        return Vec::new();
    }

    let mut out = Vec::new();
    // Standard odometer over index positions.
    let mut idx: Vec<usize> = (0..k).collect();
    loop {
        let combo: Vec<u32> = idx.iter().map(|&i| pool[i]).collect();
        if !has_four_in_row(&combo) {
            out.push(combo);
        }

        // Advance to the next combination.
        let mut pos = k;
        loop {
            if pos == 0 {
                return out;
            }
            pos -= 1;
            if idx[pos] != pos + n - k {
                break;
            }
        }
        idx[pos] += 1;
        for j in pos + 1..k {
            idx[j] = idx[j - 1] + 1;
        }
    }
}

/// Candidate tickets together with their coverage masks, in parallel order.
#[derive(Clone, Debug)]
pub struct CandidateSet {
    /// Valid tickets in enumeration order.
    pub tickets: Vec<Vec<u32>>,
    /// Coverage mask of the ticket at the same position.
    pub masks: Vec<Mask>,
}

impl CandidateSet {
    /// Enumerates candidates for `(pool, k)` and builds one coverage mask per
    /// ticket against `universe`.
    pub fn build(pool: &[u32], k: usize, universe: &TripleUniverse) -> Self {
        let tickets = enumerate_tickets(pool, k);
        let masks = tickets
            .iter()
            .map(|t| mask_for_ticket(t, universe))
            .collect();
        Self { tickets, masks }
    }

    /// Number of valid candidates.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    /// Returns `true` when every k-subset was filtered out (or none existed).
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

/// ORs together the bits of every triplet the ticket covers.
pub fn mask_for_ticket(ticket: &[u32], universe: &TripleUniverse) -> Mask {
    let mut m = Mask::zeros(universe.len());
    for_each_triplet(ticket, |t| {
        if let Some(i) = universe.index_of(&t) {
            m.set(i);
        }
    });
    m
}
