//! Strategy selection
//!
//! Picks exactly one [`EnumMethod`] for a problem, cheapest correct answer
//! first:
//!
//! 1. the trivial case
//! 2. the first closed form or recurrence of the problem's branch that
//!    accepts it
//! 3. exhaustive search, unless the estimated work exceeds the configured
//!    ceiling, in which case Monte Carlo sampling
//!
//! Branches are the four (mode, repetition) pairs; each has its own ordered
//! tables.

use crate::condition::Mode;
use crate::error::{Error, Result};
use crate::method::*;

/// Strategies available to one (mode, repetition) branch
struct Branch {
    /// Exact strategies tried in order before any search
    closed: &'static [&'static dyn EnumMethod],
    /// Exhaustive strategies tried in order when the search is affordable
    exhaustive: &'static [&'static dyn EnumMethod],
    sampling: &'static dyn EnumMethod,
}

const PERMUTATIONS: Branch = Branch {
    closed: &[&DirectPermutations, &DirUnqPermutations, &Derangements],
    exhaustive: &[&AllPermutations, &Permutations],
    sampling: &PrPermutations,
};

const COMBINATIONS: Branch = Branch {
    closed: &[&DirUnqCombinations, &BoundedSumCombinations],
    exhaustive: &[&Combinations],
    sampling: &PrCombinations,
};

const PERMUTATIONS_RP: Branch = Branch {
    closed: &[&DirectPermutationsRp],
    exhaustive: &[&PermutationsRp],
    sampling: &PrPermutationsRp,
};

const COMBINATIONS_RP: Branch = Branch {
    closed: &[&DirectCombinationsRp],
    exhaustive: &[&CombinationsRp],
    sampling: &PrCombinationsRp,
};

fn branch(mode: Mode, repetition: bool) -> &'static Branch {
    match (mode, repetition) {
        (Mode::Permutation, false) => &PERMUTATIONS,
        (Mode::Combination, false) => &COMBINATIONS,
        (Mode::Permutation, true) => &PERMUTATIONS_RP,
        (Mode::Combination, true) => &COMBINATIONS_RP,
    }
}

/// Estimated work of an exhaustive search: arrangements times condition cost
pub fn complexity(problem: &Problem) -> f64 {
    let scale: f64 = problem
        .conditions
        .iter()
        .map(|c| c.cost_scale(&problem.context))
        .sum();
    problem.search_space() * (1.0 + scale)
}

/// Strategy dispatcher
#[derive(Debug, Clone, Copy, Default)]
pub struct EnSelector;

impl EnSelector {
    pub fn new() -> Self {
        Self
    }

    /// Choose the strategy to run for `problem`
    pub fn select(&self, problem: &Problem) -> Result<&'static dyn EnumMethod> {
        if Trivial.accepts(problem) {
            tracing::debug!(strategy = "Trivial", "selected trivial case");
            return Ok(&Trivial);
        }

        let (mode, repetition) = problem.branch();
        let branch = branch(mode, repetition);

        if let Some(method) = branch.closed.iter().find(|m| m.accepts(problem)) {
            tracing::debug!(strategy = method.name(), "selected closed form");
            return Ok(*method);
        }

        let estimate = complexity(problem);
        if estimate > problem.config.complexity_ceiling {
            tracing::debug!(
                strategy = branch.sampling.name(),
                estimate,
                ceiling = problem.config.complexity_ceiling,
                "search too large, sampling"
            );
            return Ok(branch.sampling);
        }

        branch
            .exhaustive
            .iter()
            .find(|m| m.accepts(problem))
            .map(|method| {
                tracing::debug!(strategy = method.name(), estimate, "selected exhaustive search");
                *method
            })
            .ok_or_else(|| {
                Error::NoStrategy(format!(
                    "no strategy accepts {} {}s of length {}",
                    if repetition { "repeating" } else { "non-repeating" },
                    mode,
                    problem.length()
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::ConditionSpec;
    use crate::method::fixtures::problem;

    fn selected(p: &Problem) -> &'static str {
        EnSelector::new().select(p).unwrap().name()
    }

    #[test]
    fn test_trivial_first() {
        assert_eq!(selected(&problem(&[1, 2], Mode::Permutation, 0, false, &[])), "Trivial");
        assert_eq!(selected(&problem(&[1, 2], Mode::Combination, 3, false, &[])), "Trivial");
        assert_eq!(selected(&problem(&[], Mode::Combination, 3, true, &[])), "Trivial");
    }

    #[test]
    fn test_closed_forms_preferred() {
        assert_eq!(
            selected(&problem(&[1, 1, 2], Mode::Permutation, 3, false, &[])),
            "DirectPermutations"
        );
        assert_eq!(
            selected(&problem(&[1, 2, 3], Mode::Permutation, 2, false, &[])),
            "DirUnqPermutations"
        );
        assert_eq!(
            selected(&problem(&[1, 2, 3], Mode::Combination, 2, false, &[])),
            "DirUnqCombinations"
        );
        assert_eq!(
            selected(&problem(&[1, 2, 3], Mode::Permutation, 5, true, &[])),
            "DirectPermutationsRp"
        );
        assert_eq!(
            selected(&problem(&[1, 2, 3], Mode::Combination, 5, true, &[])),
            "DirectCombinationsRp"
        );
    }

    #[test]
    fn test_recurrences_preferred() {
        let spec = [ConditionSpec::new("derangement")];
        assert_eq!(
            selected(&problem(&[0, 1, 2, 3], Mode::Permutation, 4, false, &spec)),
            "Derangements"
        );
        let spec = [ConditionSpec::new("sum").with_arg("5").with_comparison("equal")];
        assert_eq!(
            selected(&problem(&[1, 2, 3, 4], Mode::Combination, 2, false, &spec)),
            "BoundedSumCombinations"
        );
    }

    #[test]
    fn test_exhaustive_when_affordable() {
        let spec = [ConditionSpec::new("palindrome")];
        assert_eq!(
            selected(&problem(&[1, 2, 3], Mode::Permutation, 3, false, &spec)),
            "AllPermutations"
        );
        assert_eq!(
            selected(&problem(&[1, 2, 3], Mode::Permutation, 2, false, &spec)),
            "Permutations"
        );
        assert_eq!(
            selected(&problem(&[1, 1, 2], Mode::Combination, 2, false, &[])),
            "Combinations"
        );
        assert_eq!(
            selected(&problem(&[1, 2], Mode::Permutation, 4, true, &spec)),
            "PermutationsRp"
        );
        let spec = [ConditionSpec::new("distinct")];
        assert_eq!(
            selected(&problem(&[1, 2], Mode::Combination, 4, true, &spec)),
            "CombinationsRp"
        );
    }

    #[test]
    fn test_sampling_above_ceiling() {
        let spec = [ConditionSpec::new("palindrome")];
        let input: Vec<i64> = (0..20).collect();
        assert_eq!(
            selected(&problem(&input, Mode::Permutation, 20, false, &spec)),
            "PrPermutations"
        );
        assert_eq!(
            selected(&problem(&input, Mode::Permutation, 12, true, &spec)),
            "PrPermutationsRp"
        );

        let mut p = problem(&[1, 2, 3], Mode::Combination, 2, true, &[ConditionSpec::new("distinct")]);
        p.config.complexity_ceiling = 1.0;
        assert_eq!(selected(&p), "PrCombinationsRp");
    }

    #[test]
    fn test_complexity_counts_condition_cost() {
        let specs = [
            ConditionSpec::new("distinct"),
            ConditionSpec::new("countOverlap")
                .with_arg("1")
                .with_arg2("1")
                .with_comparison("equal"),
        ];
        let p = problem(&[1, 2, 3, 4], Mode::Permutation, 2, false, &specs);
        // 4P2 * (1 + 2 + 2^2)
        assert_eq!(complexity(&p), 12.0 * 7.0);
    }
}
