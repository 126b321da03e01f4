//! Exact strategies built on recurrences
//!
//! Each handles exactly one shape of request (a single condition of a given
//! kind) in time polynomial in the input, where backtracking would be
//! exponential.

use super::exhaustive::Combinations;
use super::{EnumMethod, Outcome, Problem};
use crate::combinatorics::{factorial, multiplicities};
use crate::condition::{Aggregate, Comparison, ConditionKind, Mode};

/// D(n) = (n - 1)(D(n - 1) + D(n - 2)), D(0) = 1, D(1) = 0
pub fn derangements(n: u64) -> Option<u128> {
    let (mut prev, mut cur): (u128, u128) = (1, 0);
    if n == 0 {
        return Some(prev);
    }
    for k in 2..=n as u128 {
        let next = (k - 1).checked_mul(cur.checked_add(prev)?)?;
        prev = cur;
        cur = next;
    }
    Some(cur)
}

/// Derangements of a distinct input, or their complement when negated
#[derive(Debug, Clone, Copy, Default)]
pub struct Derangements;

impl EnumMethod for Derangements {
    fn name(&self) -> &'static str {
        "Derangements"
    }

    fn accepts(&self, problem: &Problem) -> bool {
        problem.branch() == (Mode::Permutation, false)
            && problem.is_distinct()
            && problem.length() == problem.n()
            && matches!(
                problem.conditions.as_slice(),
                [c] if c.kind == ConditionKind::Derangement
            )
            && factorial(problem.n() as u64).is_some()
    }

    fn enumerate(&self, problem: &Problem) -> Outcome {
        let n = problem.n() as u64;
        let deranged = derangements(n).unwrap_or_default();
        let negate = problem.conditions.first().is_some_and(|c| c.negate);
        let description = "via recurrence: D(n) = (n - 1)(D(n - 1) + D(n - 2))";
        if negate {
            let total = factorial(n).unwrap_or_default();
            Outcome::exact(
                total - deranged,
                description,
                format!(
                    "{}! arrangements less the D({}) = {} that move every value",
                    n, n, deranged
                ),
            )
        } else {
            Outcome::exact(
                deranged,
                description,
                format!("{} distinct values, none left in its original position", n),
            )
        }
    }
}

/// Combinations whose sum compares with a target, by subset-sum DP
///
/// The table is indexed by (values considered, values chosen, running sum);
/// sums past the target share one overflow cell, which is all a comparison
/// needs.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundedSumCombinations;

impl BoundedSumCombinations {
    /// `(target, comparison, negate)` of the sole sum condition, if that is the shape
    fn sum_condition(problem: &Problem) -> Option<(f64, Comparison, bool)> {
        match problem.conditions.as_slice() {
            [c] => match c.kind {
                ConditionKind::Aggregate {
                    aggregate: Aggregate::Sum,
                    value,
                    comparison,
                } => Some((value, comparison, c.negate)),
                _ => None,
            },
            _ => None,
        }
    }

    fn cells(problem: &Problem, target: f64) -> f64 {
        problem.u() as f64 * (problem.length() + 1) as f64 * (target + 2.0)
    }

    /// Row of the table for exactly `length` chosen values, indexed by sum;
    /// the last cell counts every sum above `target`
    fn sums(problem: &Problem, target: usize) -> Vec<u128> {
        let length = problem.length();
        let cap = target + 1;
        let mut table = vec![vec![0u128; cap + 1]; length + 1];
        table[0][0] = 1;

        for (value, available) in multiplicities(&problem.multiset) {
            let value = usize::try_from(value).unwrap_or(usize::MAX);
            let mut next = vec![vec![0u128; cap + 1]; length + 1];
            for (chosen, row) in table.iter().enumerate() {
                for (sum, &ways) in row.iter().enumerate() {
                    if ways == 0 {
                        continue;
                    }
                    for take in 0..=available.min(length - chosen) {
                        let reached = sum.saturating_add(take.saturating_mul(value)).min(cap);
                        next[chosen + take][reached] += ways;
                    }
                }
            }
            table = next;
        }
        table.swap_remove(length)
    }
}

impl EnumMethod for BoundedSumCombinations {
    fn name(&self) -> &'static str {
        "BoundedSumCombinations"
    }

    fn accepts(&self, problem: &Problem) -> bool {
        if problem.branch() != (Mode::Combination, false) {
            return false;
        }
        if problem.multiset.iter().any(|&e| e < 0) {
            return false;
        }
        match Self::sum_condition(problem) {
            Some((target, _, _)) => {
                target >= 0.0
                    && target.fract() == 0.0
                    && Self::cells(problem, target) <= problem.config.sum_dp_limit as f64
            }
            None => false,
        }
    }

    fn enumerate(&self, problem: &Problem) -> Outcome {
        let Some((target, comparison, negate)) = Self::sum_condition(problem) else {
            // not the table's shape, count by search
            return Combinations.enumerate(problem);
        };
        let t = target as usize;
        let sums = Self::sums(problem, t);
        let total: u128 = sums.iter().sum();
        let matching: u128 = match comparison {
            Comparison::Less => sums[..t].iter().sum(),
            Comparison::Equal => sums[t],
            Comparison::More => sums[t + 1],
        };
        let count = if negate { total - matching } else { matching };

        Outcome::exact(
            count,
            "via dynamic programming: subset sums over the distinct values",
            format!(
                "of {} combinations of length {}, {} have a sum {}{} {}",
                total,
                problem.length(),
                count,
                if negate { "not " } else { "" },
                comparison,
                t
            ),
        )
    }
}
