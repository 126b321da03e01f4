//! Counting strategies
//!
//! Every strategy answers the same question for a prepared [`Problem`]: how
//! many arrangements satisfy all of its conditions. They differ in how:
//!
//! - `direct` - closed forms for condition-free requests, and the trivial case
//! - `recurrence` - derangement recurrence, bounded-sum DP
//! - `exhaustive` - backtracking over every distinct arrangement
//! - `sampling` - Monte Carlo estimate for search spaces too large to walk
//!
//! Strategies are stateless unit structs; the selector keeps them in ordered
//! tables and runs the first one that [`EnumMethod::accepts`] the problem.

pub mod direct;
pub mod exhaustive;
pub mod recurrence;
pub mod sampling;

pub use direct::{
    DirUnqCombinations, DirUnqPermutations, DirectCombinationsRp, DirectPermutations,
    DirectPermutationsRp, Trivial,
};
pub use exhaustive::{AllPermutations, Combinations, CombinationsRp, Permutations, PermutationsRp};
pub use recurrence::{BoundedSumCombinations, Derangements};
pub use sampling::{PrCombinations, PrCombinationsRp, PrPermutations, PrPermutationsRp};

use crate::combinatorics::{
    multiplicities, n_c_r_approx, n_p_r_approx, power_approx, remove_duplicates, to_precision,
};
use crate::condition::{Condition, Context, Mode};
use crate::config::EngineConfig;

/// A fully validated request, ready to be counted
///
/// Owns sorted copies of the input so strategies never touch caller data.
#[derive(Debug, Clone)]
pub struct Problem {
    pub context: Context,
    /// Input values, sorted ascending
    pub multiset: Vec<i64>,
    /// Distinct input values, sorted ascending
    pub distinct: Vec<i64>,
    pub conditions: Vec<Condition>,
    pub config: EngineConfig,
}

impl Problem {
    pub fn new(context: Context, conditions: Vec<Condition>, config: EngineConfig) -> Self {
        let mut multiset = context.original.clone();
        multiset.sort_unstable();
        let distinct = remove_duplicates(&multiset);
        Self {
            context,
            multiset,
            distinct,
            conditions,
            config,
        }
    }

    /// Input size
    pub fn n(&self) -> usize {
        self.multiset.len()
    }

    /// Number of distinct input values
    pub fn u(&self) -> usize {
        self.distinct.len()
    }

    /// Target arrangement length
    pub fn length(&self) -> usize {
        self.context.length
    }

    pub fn mode(&self) -> Mode {
        self.context.mode
    }

    pub fn repetition(&self) -> bool {
        self.context.repetition
    }

    /// The input has no repeated values
    pub fn is_distinct(&self) -> bool {
        self.u() == self.n()
    }

    /// The conjunction of every condition; true when there are none
    pub fn evaluate(&self, candidate: &[i64]) -> bool {
        self.conditions
            .iter()
            .all(|c| c.evaluate(candidate, &self.context))
    }

    /// `mode`, `repetition` flag pair
    pub fn branch(&self) -> (Mode, bool) {
        (self.mode(), self.repetition())
    }

    /// Upper bound on the raw arrangement count of this problem's branch
    pub fn search_space(&self) -> f64 {
        let (n, u, r) = (self.n() as u64, self.u() as u64, self.length() as u64);
        match self.branch() {
            (Mode::Permutation, false) => n_p_r_approx(n, r),
            (Mode::Combination, false) => n_c_r_approx(n, r),
            (Mode::Permutation, true) => power_approx(u, r),
            (Mode::Combination, true) => n_c_r_approx((u + r).saturating_sub(1), r),
        }
    }

    /// Values occurring more than once, with their multiplicities, rarest first
    pub fn repeats(&self) -> Vec<(i64, usize)> {
        let mut repeats: Vec<(i64, usize)> = multiplicities(&self.multiset)
            .into_iter()
            .filter(|&(_, m)| m > 1)
            .collect();
        repeats.sort_by_key(|&(_, m)| m);
        repeats
    }
}

/// What a strategy reports back
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Number of satisfying arrangements; `None` when too large to estimate
    pub count: Option<u128>,
    /// How the count was obtained
    pub description: String,
    /// Diagnostic detail
    pub detail: String,
    pub is_approximation: bool,
}

impl Outcome {
    pub fn exact(count: u128, description: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            count: Some(count),
            description: description.into(),
            detail: detail.into(),
            is_approximation: false,
        }
    }

    /// Result of walking `total` arrangements of which `res` passed
    pub fn brute_force(res: u64, total: u64, mode: Mode) -> Self {
        let pct = if total == 0 {
            0.0
        } else {
            res as f64 / total as f64 * 100.0
        };
        Self::exact(
            res as u128,
            "via brute force evaluation",
            format!(
                "of {} checked {}s, {} satisfied the conditions ({}%)",
                total,
                mode,
                res,
                to_precision(pct, 4)
            ),
        )
    }
}

/// A way of counting the satisfying arrangements of a problem
pub trait EnumMethod: Send + Sync + std::fmt::Debug {
    /// Strategy name, for logs
    fn name(&self) -> &'static str;

    /// Whether this strategy gives a correct answer for `problem`
    fn accepts(&self, problem: &Problem) -> bool;

    /// Count (or estimate) the satisfying arrangements
    fn enumerate(&self, problem: &Problem) -> Outcome;
}
