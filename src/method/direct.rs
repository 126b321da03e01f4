//! Closed-form strategies
//!
//! None of these search: they apply only when there is nothing to filter
//! (no conditions) or nothing to count (the trivial case).

use super::{EnumMethod, Outcome, Problem};
use crate::combinatorics::{element_to_string, multiset_permutations, n_c_r, n_p_r, power};
use crate::condition::Mode;

/// Zero length, an empty input, or more positions than elements
#[derive(Debug, Clone, Copy, Default)]
pub struct Trivial;

impl EnumMethod for Trivial {
    fn name(&self) -> &'static str {
        "Trivial"
    }

    fn accepts(&self, problem: &Problem) -> bool {
        problem.length() == 0
            || problem.n() == 0
            || (!problem.repetition() && problem.length() > problem.n())
    }

    fn enumerate(&self, problem: &Problem) -> Outcome {
        if problem.length() == 0 {
            let count = u128::from(problem.evaluate(&[]));
            return Outcome::exact(
                count,
                "trivial case",
                "length is zero, so the only arrangement is the empty one",
            );
        }
        if problem.n() == 0 {
            return Outcome::exact(0, "trivial case", "input is empty");
        }
        Outcome::exact(0, "trivial case", "length exceeds length of input")
    }
}

/// Full-length permutations of a multiset: n! / (m1! m2! ...)
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectPermutations;

impl EnumMethod for DirectPermutations {
    fn name(&self) -> &'static str {
        "DirectPermutations"
    }

    fn accepts(&self, problem: &Problem) -> bool {
        problem.branch() == (Mode::Permutation, false)
            && problem.conditions.is_empty()
            && problem.length() == problem.n()
            && multiset_permutations(&problem.multiset).is_some()
    }

    fn enumerate(&self, problem: &Problem) -> Outcome {
        let count = multiset_permutations(&problem.multiset).unwrap_or_default();
        let repeats = problem.repeats();

        let mut description = format!("via direct calculation: {}!", problem.length());
        let mut detail = format!("input of length {}", problem.n());
        if repeats.is_empty() {
            detail.push_str(" with no repeats");
        } else {
            description.push_str(" divided by ");
            detail.push_str(" with repeats");
            for (value, times) in &repeats {
                description.push_str(&format!("{}!", times));
                detail.push_str(&format!(" '{}' ({} times)", element_to_string(*value), times));
            }
        }
        Outcome::exact(count, description, detail)
    }
}

/// r of n distinct values, order mattering: nPr
#[derive(Debug, Clone, Copy, Default)]
pub struct DirUnqPermutations;

impl EnumMethod for DirUnqPermutations {
    fn name(&self) -> &'static str {
        "DirUnqPermutations"
    }

    fn accepts(&self, problem: &Problem) -> bool {
        problem.branch() == (Mode::Permutation, false)
            && problem.conditions.is_empty()
            && problem.is_distinct()
            && n_p_r(problem.n() as u64, problem.length() as u64).is_some()
    }

    fn enumerate(&self, problem: &Problem) -> Outcome {
        let (n, r) = (problem.n(), problem.length());
        Outcome::exact(
            n_p_r(n as u64, r as u64).unwrap_or_default(),
            format!(
                "via direct calculation: {} values permuted from {} unique elements",
                r, n
            ),
            format!(
                "there are {} distinct values, so we permute {} of them",
                n, r
            ),
        )
    }
}

/// r of n distinct values, order ignored: nCr
#[derive(Debug, Clone, Copy, Default)]
pub struct DirUnqCombinations;

impl EnumMethod for DirUnqCombinations {
    fn name(&self) -> &'static str {
        "DirUnqCombinations"
    }

    fn accepts(&self, problem: &Problem) -> bool {
        problem.branch() == (Mode::Combination, false)
            && problem.conditions.is_empty()
            && problem.is_distinct()
            && n_c_r(problem.n() as u64, problem.length() as u64).is_some()
    }

    fn enumerate(&self, problem: &Problem) -> Outcome {
        let (n, r) = (problem.n(), problem.length());
        Outcome::exact(
            n_c_r(n as u64, r as u64).unwrap_or_default(),
            format!(
                "via direct calculation: {} values chosen from {} unique elements",
                r, n
            ),
            format!("there are {} distinct values, so we choose {} of them", n, r),
        )
    }
}

/// Sequences over the distinct values: u^r
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectPermutationsRp;

impl EnumMethod for DirectPermutationsRp {
    fn name(&self) -> &'static str {
        "DirectPermutationsRp"
    }

    fn accepts(&self, problem: &Problem) -> bool {
        problem.branch() == (Mode::Permutation, true)
            && problem.conditions.is_empty()
            && power(problem.u() as u64, problem.length() as u64).is_some()
    }

    fn enumerate(&self, problem: &Problem) -> Outcome {
        let (u, r) = (problem.u(), problem.length());
        Outcome::exact(
            power(u as u64, r as u64).unwrap_or_default(),
            format!("via direct calculation: {} to the power of {}", u, r),
            format!(
                "for each of the {} elements, we can choose from {} unique values",
                r, u
            ),
        )
    }
}

/// Multisets over the distinct values: C(u + r - 1, r)
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectCombinationsRp;

impl DirectCombinationsRp {
    fn count(problem: &Problem) -> Option<u128> {
        let (u, r) = (problem.u() as u64, problem.length() as u64);
        n_c_r((u + r).saturating_sub(1), r)
    }
}

impl EnumMethod for DirectCombinationsRp {
    fn name(&self) -> &'static str {
        "DirectCombinationsRp"
    }

    fn accepts(&self, problem: &Problem) -> bool {
        problem.branch() == (Mode::Combination, true)
            && problem.conditions.is_empty()
            && problem.u() > 0
            && Self::count(problem).is_some()
    }

    fn enumerate(&self, problem: &Problem) -> Outcome {
        let (u, r) = (problem.u(), problem.length());
        Outcome::exact(
            Self::count(problem).unwrap_or_default(),
            format!(
                "via direct calculation: choice of {} from {} + {}",
                r,
                r,
                u.saturating_sub(1)
            ),
            format!(
                "consider {} stars and {} bars, where the bars separate the {} unique elements \
                 and the stars represent the amount of each element we choose",
                r,
                u.saturating_sub(1),
                u
            ),
        )
    }
}
