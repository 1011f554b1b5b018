//! Redundancy elimination for full-coverage systems, and the hybrid mode.
//!
//! A ticket is redundant when the union of the other active tickets still
//! equals the target coverage. Removing one and restarting the scan is a
//! plain local search, bounded by O(active²) mask unions; system sizes here
//! are tens of tickets, so quadratic is fine.

use crate::candidate::mask_for_ticket;
use crate::greedy;
use crate::mask::Mask;
use crate::system::CoverSystem;
use crate::universe::{TripleUniverse, normalize_pool};

/// Minimum input coverage for reduction to be attempted. Below this there is
/// nothing safe to remove, so the input passes through unchanged.
const REDUCE_COVERAGE_FLOOR: f64 = 99.9;

/// Classic greedy followed by redundancy elimination.
pub fn cover_hybrid(numbers: &[u32], k: usize) -> CoverSystem {
    let base = greedy::cover(numbers, k);
    reduce(numbers, base)
}

/// Removes redundant tickets from `system` while preserving its achieved
/// coverage exactly.
///
/// Guarantees: the ticket count never grows, and the union of the remaining
/// tickets' coverage equals the union of the input's. Systems below the
/// coverage floor (or empty ones) are returned unchanged.
pub fn reduce(numbers: &[u32], system: CoverSystem) -> CoverSystem {
    if system.coverage < REDUCE_COVERAGE_FLOOR || system.tickets.is_empty() {
        return system;
    }

    let pool = normalize_pool(numbers);
    let universe = TripleUniverse::build(&pool);
    if universe.is_empty() {
        return system;
    }

    let masks: Vec<Mask> = system
        .tickets
        .iter()
        .map(|t| mask_for_ticket(t, &universe))
        .collect();

    // Target is what the input actually covers; with the coverage floor this
    // is the full universe in practice.
    let mut target = Mask::zeros(universe.len());
    for m in &masks {
        target.or_assign(m);
    }

    let mut active: Vec<usize> = (0..system.tickets.len()).collect();
    let mut changed = true;
    while changed {
        changed = false;
        // Snapshot: the inner loop mutates `active` on removal and restarts.
        for &idx in active.clone().iter() {
            if active.len() == 1 {
                break;
            }
            let mut union_without = Mask::zeros(universe.len());
            for &j in &active {
                if j != idx {
                    union_without.or_assign(&masks[j]);
                }
            }
            if union_without == target {
                active.retain(|&j| j != idx);
                changed = true;
                break;
            }
        }
    }

    let tickets: Vec<Vec<u32>> = active.into_iter().map(|i| system.tickets[i].clone()).collect();
    let mut uncovered = Mask::ones(universe.len());
    uncovered.clear_bits_of(&target);
    let mut reduced = CoverSystem::from_selection(tickets, &uncovered, &universe, true);
    reduced.warning = system.warning;
    reduced
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a system record for handcrafted tickets over `pool`.
    fn system_of(pool: &[u32], tickets: Vec<Vec<u32>>) -> CoverSystem {
        let norm = normalize_pool(pool);
        let universe = TripleUniverse::build(&norm);
        let mut covered = Mask::zeros(universe.len());
        for t in &tickets {
            covered.or_assign(&mask_for_ticket(t, &universe));
        }
        let mut uncovered = Mask::ones(universe.len());
        uncovered.clear_bits_of(&covered);
        CoverSystem::from_selection(tickets, &uncovered, &universe, true)
    }

    #[test]
    fn removes_a_fully_redundant_ticket() {
        let pool = [1, 2, 4, 5, 7];
        // All C(5,4) tickets together cover all 10 triplets; any one of them
        // is redundant given the other four.
        let tickets = vec![
            vec![1, 2, 4, 5],
            vec![1, 2, 4, 7],
            vec![1, 2, 5, 7],
            vec![1, 4, 5, 7],
            vec![2, 4, 5, 7],
        ];
        let sys = system_of(&pool, tickets);
        assert_eq!(sys.coverage, 100.0);

        let reduced = reduce(&pool, sys.clone());
        assert!(reduced.system_size < sys.system_size);
        assert_eq!(reduced.coverage, 100.0);
        assert_eq!(reduced.triplets_covered, sys.triplets_covered);
    }

    #[test]
    fn partial_coverage_passes_through_unchanged() {
        let pool = [1, 2, 3, 4, 5, 6];
        let sys = system_of(&pool, vec![vec![1, 2, 3]]);
        assert!(sys.coverage < 99.9);
        let reduced = reduce(&pool, sys.clone());
        assert_eq!(reduced, sys);
    }

    #[test]
    fn never_increases_ticket_count_or_loses_coverage() {
        let sys = greedy::cover(&[1, 2, 3, 4, 5, 6, 7, 8, 9], 5);
        let reduced = reduce(&[1, 2, 3, 4, 5, 6, 7, 8, 9], sys.clone());
        assert!(reduced.system_size <= sys.system_size);
        assert!(reduced.coverage >= sys.coverage);
        assert!(reduced.triplets_covered >= sys.triplets_covered);
    }

    #[test]
    fn hybrid_matches_classic_coverage() {
        let pool = [1, 2, 3, 4, 5, 6, 7, 8];
        let classic = greedy::cover(&pool, 5);
        let hybrid = cover_hybrid(&pool, 5);
        assert_eq!(hybrid.coverage, classic.coverage);
        assert!(hybrid.system_size <= classic.system_size);
    }

    #[test]
    fn hybrid_propagates_terminal_warnings() {
        let sys = cover_hybrid(&[1, 2, 3], 5);
        assert_eq!(sys.system_size, 0);
        assert!(sys.warning.is_some());
    }

    #[test]
    fn single_ticket_full_cover_is_kept() {
        // One k=5 ticket over a 5-number pool covers everything; it must not
        // be removed even though the scan considers it.
        let pool = [1, 2, 3, 7, 9];
        let sys = system_of(&pool, vec![vec![1, 2, 3, 7, 9]]);
        assert_eq!(sys.coverage, 100.0);
        let reduced = reduce(&pool, sys.clone());
        assert_eq!(reduced.system_size, 1);
        assert_eq!(reduced.coverage, 100.0);
    }
}
