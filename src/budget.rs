//! Budget-bounded ticket selection.
//!
//! Unlike the coverers, this module does not optimize coverage. It ranks
//! candidates by historical triplet frequency when enough history exists, or
//! shuffles them uniformly when it does not, then takes the first
//! `max_tickets`. Coverage is computed afterwards purely as a report.
//!
//! Ranking ties are broken with an unpredictable random key on purpose:
//! equally-ranked tickets should not win deterministically by enumeration
//! order. Tests therefore check invariants, never exact output.

use std::collections::HashMap;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::candidate::CandidateSet;
use crate::mask::Mask;
use crate::system::{BudgetError, CoverSystem};
use crate::universe::{TripleUniverse, Triplet, for_each_triplet, normalize_pool};

/// Minimum number of historical draws before history-ranked mode engages.
const MIN_HISTORY_DRAWS: usize = 5;

/// Read-only snapshot of historical draws, reduced to triplet frequencies.
///
/// Built by the caller and passed in explicitly; the optimizer never reaches
/// into ambient state for history.
#[derive(Clone, Debug, Default)]
pub struct DrawHistory {
    draws: usize,
    counts: HashMap<Triplet, u32>,
}

impl DrawHistory {
    /// Reduces raw draw rows to a triplet frequency table. Rows with fewer
    /// than 3 numbers contribute nothing but still count as draws.
    pub fn from_rows(rows: &[Vec<u32>]) -> Self {
        let mut counts: HashMap<Triplet, u32> = HashMap::new();
        for row in rows {
            let nums = normalize_pool(row);
            for_each_triplet(&nums, |t| {
                *counts.entry(t).or_insert(0) += 1;
            });
        }
        Self {
            draws: rows.len(),
            counts,
        }
    }

    /// Builds a snapshot directly from a precomputed frequency table.
    pub fn from_counts(draws: usize, counts: HashMap<Triplet, u32>) -> Self {
        Self { draws, counts }
    }

    /// Frequency of one triplet across the recorded draws.
    #[inline]
    pub fn frequency(&self, triplet: &Triplet) -> u32 {
        self.counts.get(triplet).copied().unwrap_or(0)
    }

    /// Whether this history is substantial enough to rank with.
    fn is_usable(&self) -> bool {
        self.draws >= MIN_HISTORY_DRAWS && !self.counts.is_empty()
    }
}

/// Selects up to `max_tickets` candidates, history-ranked or neutral.
///
/// # Errors
/// `BudgetError::BudgetTooSmall` when `max_tickets` is zero.
pub fn select_fixed(
    numbers: &[u32],
    k: usize,
    max_tickets: usize,
    history: Option<&DrawHistory>,
) -> Result<CoverSystem, BudgetError> {
    if max_tickets == 0 {
        return Err(BudgetError::BudgetTooSmall);
    }

    let pool = normalize_pool(numbers);
    if pool.len() < k {
        return Ok(CoverSystem::empty_with_warning(
            0,
            format!("not enough numbers: pool has {}, ticket size is {k}", pool.len()),
        ));
    }

    let universe = TripleUniverse::build(&pool);
    let candidates = CandidateSet::build(&pool, k, &universe);
    if candidates.is_empty() {
        return Ok(CoverSystem::empty_with_warning(
            universe.len(),
            "all candidate tickets excluded by the four-in-row rule",
        ));
    }

    let mut rng = rand::rng();
    let mut order: Vec<usize> = (0..candidates.len()).collect();

    match history.filter(|h| h.is_usable()) {
        Some(h) => {
            // Rank by summed triplet frequency, random key on equal scores.
            let keys: Vec<(u64, u32)> = candidates
                .tickets
                .iter()
                .map(|t| (history_score(t, h), rng.random::<u32>()))
                .collect();
            order.sort_unstable_by(|&a, &b| keys[b].cmp(&keys[a]));
        }
        None => {
            // Neutral mode: uniform shuffle.
            order.shuffle(&mut rng);
        }
    }

    order.truncate(max_tickets);
    let chosen: Vec<Vec<u32>> = order.iter().map(|&i| candidates.tickets[i].clone()).collect();

    // Informational coverage over the same universe, not an objective.
    let mut covered = Mask::zeros(universe.len());
    for &i in &order {
        covered.or_assign(&candidates.masks[i]);
    }
    let mut uncovered = Mask::ones(universe.len());
    uncovered.clear_bits_of(&covered);

    Ok(CoverSystem::from_selection(chosen, &uncovered, &universe, false))
}

/// Derives a ticket limit from a monetary budget and delegates to
/// [`select_fixed`].
///
/// # Errors
/// `BudgetError::InvalidTicketCost` when `ticket_cost <= 0`;
/// `BudgetError::BudgetTooSmall` when the budget buys zero tickets.
pub fn select_budget(
    numbers: &[u32],
    k: usize,
    budget: f64,
    ticket_cost: f64,
    history: Option<&DrawHistory>,
) -> Result<CoverSystem, BudgetError> {
    if ticket_cost <= 0.0 {
        return Err(BudgetError::InvalidTicketCost);
    }
    let max_tickets = (budget / ticket_cost).floor();
    if max_tickets < 1.0 {
        return Err(BudgetError::BudgetTooSmall);
    }
    select_fixed(numbers, k, max_tickets as usize, history)
}

/// Sum of historical frequencies over the ticket's triplets.
fn history_score(ticket: &[u32], history: &DrawHistory) -> u64 {
    let mut score = 0u64;
    for_each_triplet(ticket, |t| {
        score += u64::from(history.frequency(&t));
    });
    score
}
