//! # triplecover
//!
//! Combinatorial set-cover optimizer for triplet-coverage ticket systems.
//!
//! Given a pool of distinct integers and a ticket size `k`, the crate selects
//! a small collection of k-subsets ("tickets") such that every 3-element
//! subset ("triplet") of the pool is covered by at least one ticket, subject
//! to a structural rule forbidding four numerically consecutive values within
//! a ticket.
//!
//! The crate provides:
//! - A shared triplet universe with stable bit positions per pool.
//! - `u64`-word coverage bitsets with popcount-based gain scoring.
//! - An exact, deterministic greedy coverer (classic maximum-coverage
//!   approximation with first-seen tie-breaking).
//! - A rarity-weighted, sampled, multi-restart greedy for large pools.
//! - A redundancy-elimination pass that shrinks full-coverage systems.
//! - Budget-bounded selection ranked by historical triplet frequency.
//!
//! ## Quick Start
//!
//! ```
//! use triplecover::greedy;
//!
//! let sys = greedy::cover(&[1, 2, 3, 4, 5, 6], 3);
//! assert_eq!(sys.coverage, 100.0);
//! assert_eq!(sys.triplets_total, 20);
//! ```
//!
//! ## Choosing a variant
//!
//! ```
//! use triplecover::cover::{run, Mode};
//!
//! let pool: Vec<u32> = (1..=12).collect();
//! let exact = run(&pool, 6, Mode::Hybrid);
//! assert_eq!(exact.coverage, 100.0);
//! ```
//!
//! ## Budget mode
//!
//! ```
//! use triplecover::budget::{select_budget, DrawHistory};
//!
//! let history = DrawHistory::from_rows(&[
//!     vec![1, 2, 3, 7], vec![1, 2, 3, 9], vec![2, 3, 5, 8],
//!     vec![1, 3, 6, 9], vec![1, 2, 4, 7],
//! ]);
//! let sys = select_budget(&[1, 2, 3, 4, 5, 6, 7, 8, 9], 5, 10.0, 2.0, Some(&history))
//!     .expect("valid budget");
//! assert!(sys.system_size <= 5);
//! ```
//!
//! ## Design notes
//!
//! - All algorithms are synchronous and CPU-bound per invocation; the fast
//!   variant runs its independent attempts on rayon workers, which is safe
//!   because attempts share no mutable state and derive separate RNG seeds.
//! - Classic mode is fully deterministic and idempotent. Fast and budget
//!   modes are randomized by design (injectable seed in fast mode,
//!   deliberately unpredictable tie-breaking in budget mode).
//! - Partial coverage is a valid terminal state, reported through the
//!   coverage fields, never an error.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod budget;
pub mod candidate;
pub mod cover;
pub mod greedy;
pub mod mask;
pub mod reduce;
pub mod sampled;
pub mod system;
pub mod universe;

/// Re-export of the commonly used surface.
pub mod prelude {
    pub use crate::budget::{DrawHistory, select_budget, select_fixed};
    pub use crate::cover::{Mode, run};
    pub use crate::greedy::cover;
    pub use crate::reduce::cover_hybrid;
    pub use crate::sampled::{FastConfig, cover_fast};
    pub use crate::system::{BudgetError, CoverSystem};
}
