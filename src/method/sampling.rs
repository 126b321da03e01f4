//! Monte Carlo estimation
//!
//! Draw `sample_runs` arrangements uniformly from a space whose size is
//! known, discard the draws the input cannot actually form, and scale the
//! pass rate of the rest:
//!
//! ```text
//! estimate = passed / valid * (valid / runs * space)
//! ```
//!
//! Too few realisable draws means the input is too sparse in the sampled
//! space to say anything; that is reported as a count of `None` rather than
//! a guess.

use super::{EnumMethod, Outcome, Problem};
use crate::combinatorics::{n_c_r_approx, n_p_r_approx, power_approx, sub_multiset};
use crate::condition::Mode;
use crate::random::{rand_choice, rand_choice_rp, rand_perm, rand_perm_rp};
use rand::rngs::StdRng;
use rand::SeedableRng;

const APPROXIMATION: &str = "via approximation";

fn rng(problem: &Problem) -> StdRng {
    match problem.config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Run the sampler; `draw` yields `None` for arrangements the input cannot form
fn estimate<F>(problem: &Problem, space: f64, mut draw: F) -> Outcome
where
    F: FnMut(&mut StdRng) -> Option<Vec<i64>>,
{
    let runs = problem.config.sample_runs;
    let mut rng = rng(problem);
    let (mut valid, mut passed) = (0u64, 0u64);
    for _ in 0..runs {
        if let Some(candidate) = draw(&mut rng) {
            valid += 1;
            if problem.evaluate(&candidate) {
                passed += 1;
            }
        }
    }

    if valid < problem.config.min_valid_samples {
        tracing::warn!(
            valid,
            runs,
            required = problem.config.min_valid_samples,
            "too few realisable samples, no estimate"
        );
        return Outcome {
            count: None,
            description: APPROXIMATION.into(),
            detail: format!(
                "the input was too large to estimate: only {} of {} random arrangements could be formed from it",
                valid, runs
            ),
            is_approximation: false,
        };
    }

    let total = valid as f64 / runs as f64 * space;
    let value = (passed as f64 / valid as f64 * total).round();
    let count = (value.is_finite() && value < u128::MAX as f64).then_some(value as u128);
    tracing::debug!(valid, passed, runs, space, value, "sampling finished");
    Outcome {
        count,
        description: APPROXIMATION.into(),
        detail: format!(
            "this result was determined probabilistically as the input was too large, it may be \
             inaccurate ({} of {} sampled arrangements satisfied the conditions)",
            passed, valid
        ),
        is_approximation: true,
    }
}

/// Permutations without repetition
///
/// Shuffling positions is uniform over distinct arrangements when the input
/// is distinct or the whole input is used. Otherwise sequences over the
/// distinct values are drawn and those exceeding the input's multiplicities
/// rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrPermutations;

impl EnumMethod for PrPermutations {
    fn name(&self) -> &'static str {
        "PrPermutations"
    }

    fn accepts(&self, problem: &Problem) -> bool {
        problem.branch() == (Mode::Permutation, false)
    }

    fn enumerate(&self, problem: &Problem) -> Outcome {
        let (n, u, r) = (problem.n() as u64, problem.u() as u64, problem.length());
        if problem.is_distinct() {
            estimate(problem, n_p_r_approx(n, r as u64), |rng| {
                rand_perm(&problem.multiset, r, rng)
            })
        } else if r == problem.n() {
            let space = problem
                .repeats()
                .iter()
                .fold(n_p_r_approx(n, n), |acc, &(_, m)| {
                    acc / n_p_r_approx(m as u64, m as u64)
                });
            estimate(problem, space, |rng| rand_perm(&problem.multiset, r, rng))
        } else {
            estimate(problem, power_approx(u, r as u64), |rng| {
                let candidate = rand_perm_rp(&problem.distinct, r, rng);
                sub_multiset(&candidate, &problem.multiset).then_some(candidate)
            })
        }
    }
}

/// Sequences over the distinct values; every draw is valid
#[derive(Debug, Clone, Copy, Default)]
pub struct PrPermutationsRp;

impl EnumMethod for PrPermutationsRp {
    fn name(&self) -> &'static str {
        "PrPermutationsRp"
    }

    fn accepts(&self, problem: &Problem) -> bool {
        problem.branch() == (Mode::Permutation, true)
    }

    fn enumerate(&self, problem: &Problem) -> Outcome {
        let (u, r) = (problem.u() as u64, problem.length());
        estimate(problem, power_approx(u, r as u64), |rng| {
            Some(rand_perm_rp(&problem.distinct, r, rng))
        })
    }
}

/// Combinations without repetition
///
/// Subsets of positions for a distinct input; otherwise multisets over the
/// distinct values, rejecting those the input cannot supply.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrCombinations;

impl EnumMethod for PrCombinations {
    fn name(&self) -> &'static str {
        "PrCombinations"
    }

    fn accepts(&self, problem: &Problem) -> bool {
        problem.branch() == (Mode::Combination, false)
    }

    fn enumerate(&self, problem: &Problem) -> Outcome {
        let (n, u, r) = (problem.n() as u64, problem.u() as u64, problem.length());
        if problem.is_distinct() {
            estimate(problem, n_c_r_approx(n, r as u64), |rng| {
                Some(rand_choice(&problem.multiset, r, rng))
            })
        } else {
            estimate(problem, n_c_r_approx(u + r as u64 - 1, r as u64), |rng| {
                let candidate = rand_choice_rp(&problem.distinct, r, rng);
                sub_multiset(&candidate, &problem.multiset).then_some(candidate)
            })
        }
    }
}

/// Multisets over the distinct values; every draw is valid
#[derive(Debug, Clone, Copy, Default)]
pub struct PrCombinationsRp;

impl EnumMethod for PrCombinationsRp {
    fn name(&self) -> &'static str {
        "PrCombinationsRp"
    }

    fn accepts(&self, problem: &Problem) -> bool {
        problem.branch() == (Mode::Combination, true)
    }

    fn enumerate(&self, problem: &Problem) -> Outcome {
        let (u, r) = (problem.u() as u64, problem.length());
        estimate(
            problem,
            n_c_r_approx((u + r as u64).saturating_sub(1), r as u64),
            |rng| Some(rand_choice_rp(&problem.distinct, r, rng)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::ConditionSpec;
    use crate::method::fixtures::problem;

    fn within(outcome: &Outcome, exact: u128, tolerance: f64) -> bool {
        outcome
            .count
            .is_some_and(|c| (c as f64 - exact as f64).abs() <= exact as f64 * tolerance)
    }

    fn smaller(mut p: Problem) -> Problem {
        p.config.sample_runs = 1 << 16;
        p
    }

    #[test]
    fn test_permutations_rp_converges() {
        let p = smaller(problem(&[1, 2, 3], Mode::Permutation, 2, true, &[]));
        let outcome = PrPermutationsRp.enumerate(&p);
        assert!(outcome.is_approximation);
        assert_eq!(outcome.count, Some(9));
        assert_eq!(outcome.description, "via approximation");
    }

    #[test]
    fn test_pass_rate_is_applied() {
        let spec = [ConditionSpec::new("distinct")];
        let p = smaller(problem(&[1, 2, 3, 4], Mode::Permutation, 3, true, &spec));
        // 4P3 = 24 of 64
        assert!(within(&PrPermutationsRp.enumerate(&p), 24, 0.05));
    }

    #[test]
    fn test_permutations_of_multiset_use_rejection() {
        let p = smaller(problem(&[1, 1, 2, 3, 3], Mode::Permutation, 3, false, &[]));
        let exact = crate::method::Permutations.enumerate(&p).count.unwrap();
        assert!(within(&PrPermutations.enumerate(&p), exact, 0.05));
    }

    #[test]
    fn test_full_length_multiset_shuffle() {
        let spec = [ConditionSpec::new("startsWith").with_arg("1")];
        let p = smaller(problem(&[1, 1, 2, 2, 3], Mode::Permutation, 5, false, &spec));
        let exact = crate::method::Permutations.enumerate(&p).count.unwrap();
        assert!(within(&PrPermutations.enumerate(&p), exact, 0.05));
    }

    #[test]
    fn test_combinations() {
        let spec = [ConditionSpec::new("sum").with_arg("10").with_comparison("more")];
        let p = smaller(problem(&[1, 2, 3, 4, 5, 6], Mode::Combination, 3, false, &spec));
        let exact = crate::method::Combinations.enumerate(&p).count.unwrap();
        assert!(within(&PrCombinations.enumerate(&p), exact, 0.05));

        let p = smaller(problem(&[1, 1, 2, 2, 3, 6], Mode::Combination, 3, false, &spec));
        let exact = crate::method::Combinations.enumerate(&p).count.unwrap();
        assert!(within(&PrCombinations.enumerate(&p), exact, 0.08));

        let p = smaller(problem(&[1, 2, 3, 6], Mode::Combination, 3, true, &spec));
        let exact = crate::method::CombinationsRp.enumerate(&p).count.unwrap();
        assert!(within(&PrCombinationsRp.enumerate(&p), exact, 0.05));
    }

    #[test]
    fn test_too_few_valid_samples() {
        let mut p = problem(&[1, 1, 2, 3, 4, 5, 6, 7], Mode::Permutation, 6, false, &[]);
        p.config.sample_runs = 2048;
        p.config.min_valid_samples = 2048;
        let outcome = PrPermutations.enumerate(&p);
        assert_eq!(outcome.count, None);
        assert!(!outcome.is_approximation);
        assert!(outcome.detail.contains("too large to estimate"));
    }

    #[test]
    fn test_seed_makes_runs_repeatable() {
        let spec = [ConditionSpec::new("palindrome")];
        let p = smaller(problem(&[1, 2, 3, 4], Mode::Permutation, 4, true, &spec));
        assert_eq!(PrPermutationsRp.enumerate(&p), PrPermutationsRp.enumerate(&p));
    }
}
