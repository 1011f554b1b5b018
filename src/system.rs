//! Result records shared by every optimizer variant.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mask::Mask;
use crate::universe::{Triplet, TripleUniverse};

/// A ticket system produced by one optimizer invocation.
///
/// Immutable once returned. Partial coverage is a valid terminal state, not
/// an error; the caller decides whether it is acceptable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverSystem {
    /// Chosen tickets, each an ascending list of k numbers, in selection order.
    pub tickets: Vec<Vec<u32>>,
    /// Number of chosen tickets.
    pub system_size: usize,
    /// Achieved coverage percentage in [0, 100], rounded to two decimals.
    pub coverage: f64,
    /// Universe size `U` for the pool.
    pub triplets_total: usize,
    /// Number of distinct triplets covered by at least one ticket.
    pub triplets_covered: usize,
    /// Triplets left uncovered (populated by the exact modes only).
    pub uncovered_triplets: Vec<Triplet>,
    /// Non-fatal condition, e.g. an insufficient pool or an empty candidate
    /// set after exclusion filtering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl CoverSystem {
    /// An empty system with a warning attached (insufficient pool, all
    /// candidates excluded). Terminal for this invocation; not retryable.
    pub fn empty_with_warning(triplets_total: usize, warning: impl Into<String>) -> Self {
        Self {
            triplets_total,
            warning: Some(warning.into()),
            ..Self::default()
        }
    }

    /// The vacuous success for a degenerate universe (pool < 3): nothing to
    /// cover, so coverage is 100%.
    pub fn trivially_covered() -> Self {
        Self {
            coverage: 100.0,
            ..Self::default()
        }
    }

    /// Assembles a system from chosen tickets and the final uncovered mask.
    ///
    /// `collect_uncovered` controls whether the literal uncovered triplet
    /// list is materialized (exact modes) or left empty (sampled/budget
    /// modes, where it is informational noise).
    pub fn from_selection(
        tickets: Vec<Vec<u32>>,
        uncovered: &Mask,
        universe: &TripleUniverse,
        collect_uncovered: bool,
    ) -> Self {
        let total = universe.len();
        let remaining = uncovered.count_ones();
        let covered = total - remaining;

        let uncovered_triplets = if collect_uncovered && remaining > 0 {
            uncovered.iter_ones().map(|i| universe.triplet_at(i)).collect()
        } else {
            Vec::new()
        };

        Self {
            system_size: tickets.len(),
            tickets,
            coverage: coverage_percent(covered, total),
            triplets_total: total,
            triplets_covered: covered,
            uncovered_triplets,
            warning: None,
        }
    }
}

/// Coverage percentage rounded to two decimals; a zero-width universe counts
/// as fully covered.
#[inline]
pub fn coverage_percent(covered: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    (covered as f64 / total as f64 * 10_000.0).round() / 100.0
}

/// Budget-mode failures. These abort before any selection is attempted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BudgetError {
    /// `ticket_cost <= 0` makes the ticket count underivable.
    #[error("ticket cost must be > 0")]
    InvalidTicketCost,
    /// The budget buys zero tickets (or a zero ticket limit was requested).
    #[error("budget too small: allows zero tickets")]
    BudgetTooSmall,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::universe::normalize_pool;

    #[test]
    fn coverage_rounds_to_two_decimals() {
        assert_eq!(coverage_percent(1, 3), 33.33);
        assert_eq!(coverage_percent(2, 3), 66.67);
        assert_eq!(coverage_percent(20, 20), 100.0);
        assert_eq!(coverage_percent(0, 7), 0.0);
        assert_eq!(coverage_percent(0, 0), 100.0);
    }

    #[test]
    fn from_selection_reports_uncovered_for_exact_modes() {
        let pool = normalize_pool(&[1, 2, 3, 4]);
        let universe = TripleUniverse::build(&pool);
        assert_eq!(universe.len(), 4);

        let mut uncovered = Mask::ones(4);
        uncovered.clear_bits_of(&{
            let mut m = Mask::zeros(4);
            m.set(0);
            m
        });

        let sys = CoverSystem::from_selection(vec![vec![1, 2, 3]], &uncovered, &universe, true);
        assert_eq!(sys.system_size, 1);
        assert_eq!(sys.triplets_covered, 1);
        assert_eq!(sys.coverage, 25.0);
        assert_eq!(sys.uncovered_triplets.len(), 3);

        let sys = CoverSystem::from_selection(vec![vec![1, 2, 3]], &uncovered, &universe, false);
        assert!(sys.uncovered_triplets.is_empty());
        assert_eq!(sys.triplets_covered, 1);
    }

    #[test]
    fn warning_systems_are_empty() {
        let sys = CoverSystem::empty_with_warning(10, "not enough numbers");
        assert_eq!(sys.system_size, 0);
        assert!(sys.tickets.is_empty());
        assert_eq!(sys.coverage, 0.0);
        assert!(sys.warning.is_some());
    }

    #[test]
    fn serializes_without_warning_field_when_absent() {
        let sys = CoverSystem::trivially_covered();
        let json = serde_json::to_string(&sys).unwrap();
        assert!(!json.contains("warning"));
        assert!(json.contains("\"coverage\":100.0"));
    }
}
