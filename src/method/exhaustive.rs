//! Exhaustive strategies
//!
//! Walk every distinct arrangement of the requested shape and test the
//! conditions on each. Always correct, and always applicable within their
//! branch; the selector only keeps them away from search spaces it judges
//! too large.
//!
//! The depth-first search chooses among the distinct input values with a
//! per-value stock, so a value already tried at one level is never tried
//! again there and duplicate arrangements are never produced. Combinations
//! only ever pick values at or above the last one picked.

use super::{EnumMethod, Outcome, Problem};
use crate::combinatorics::{multiplicities, next_permutation};
use crate::condition::Mode;

#[derive(Debug, Default)]
struct Tally {
    passed: u64,
    seen: u64,
}

impl Tally {
    fn check(&mut self, problem: &Problem, candidate: &[i64]) {
        self.seen += 1;
        if problem.evaluate(candidate) {
            self.passed += 1;
        }
    }

    fn into_outcome(self, mode: Mode) -> Outcome {
        Outcome::brute_force(self.passed, self.seen, mode)
    }
}

struct Search<'a> {
    problem: &'a Problem,
    values: Vec<i64>,
    /// Copies of `values[i]` still available; `usize::MAX` when unlimited
    stock: Vec<usize>,
    ordered: bool,
    current: Vec<i64>,
    /// Index into `values` of each element of `current`
    chosen: Vec<usize>,
    tally: Tally,
}

impl<'a> Search<'a> {
    fn new(problem: &'a Problem, ordered: bool) -> Self {
        let (values, stock) = if problem.repetition() {
            (problem.distinct.clone(), vec![usize::MAX; problem.u()])
        } else {
            multiplicities(&problem.multiset).into_iter().unzip()
        };
        Self {
            problem,
            values,
            stock,
            ordered,
            current: Vec::with_capacity(problem.length()),
            chosen: Vec::with_capacity(problem.length()),
            tally: Tally::default(),
        }
    }

    /// Depth-first walk with an explicit stack, so the depth is bounded by
    /// memory rather than by the thread's stack
    fn run(mut self) -> Tally {
        let length = self.problem.length();
        // next[d]: first value index still to try at depth d
        let mut next = vec![0usize];
        while let Some(&start) = next.last() {
            if self.current.len() == length {
                self.tally.check(self.problem, &self.current);
                next.pop();
                self.retreat();
                continue;
            }
            match (start..self.values.len()).find(|&i| self.stock[i] > 0) {
                Some(i) => {
                    if let Some(top) = next.last_mut() {
                        *top = i + 1;
                    }
                    self.stock[i] -= 1;
                    self.current.push(self.values[i]);
                    self.chosen.push(i);
                    next.push(if self.ordered { 0 } else { i });
                }
                None => {
                    next.pop();
                    self.retreat();
                }
            }
        }
        self.tally
    }

    fn retreat(&mut self) {
        if let Some(i) = self.chosen.pop() {
            self.current.pop();
            self.stock[i] += 1;
        }
    }
}

fn search(problem: &Problem) -> Outcome {
    let ordered = problem.mode() == Mode::Permutation;
    Search::new(problem, ordered).run().into_outcome(problem.mode())
}

/// Full-length permutations by next-permutation sweep
#[derive(Debug, Clone, Copy, Default)]
pub struct AllPermutations;

impl EnumMethod for AllPermutations {
    fn name(&self) -> &'static str {
        "AllPermutations"
    }

    fn accepts(&self, problem: &Problem) -> bool {
        problem.branch() == (Mode::Permutation, false) && problem.length() == problem.n()
    }

    fn enumerate(&self, problem: &Problem) -> Outcome {
        let mut tally = Tally::default();
        let mut arrangement = problem.multiset.clone();
        loop {
            tally.check(problem, &arrangement);
            if !next_permutation(&mut arrangement) {
                break;
            }
        }
        tally.into_outcome(Mode::Permutation)
    }
}

/// Permutations without repetition, any length
#[derive(Debug, Clone, Copy, Default)]
pub struct Permutations;

impl EnumMethod for Permutations {
    fn name(&self) -> &'static str {
        "Permutations"
    }

    fn accepts(&self, problem: &Problem) -> bool {
        problem.branch() == (Mode::Permutation, false)
    }

    fn enumerate(&self, problem: &Problem) -> Outcome {
        search(problem)
    }
}

/// Combinations without repetition
#[derive(Debug, Clone, Copy, Default)]
pub struct Combinations;

impl EnumMethod for Combinations {
    fn name(&self) -> &'static str {
        "Combinations"
    }

    fn accepts(&self, problem: &Problem) -> bool {
        problem.branch() == (Mode::Combination, false)
    }

    fn enumerate(&self, problem: &Problem) -> Outcome {
        search(problem)
    }
}

/// Sequences over the distinct values
#[derive(Debug, Clone, Copy, Default)]
pub struct PermutationsRp;

impl EnumMethod for PermutationsRp {
    fn name(&self) -> &'static str {
        "PermutationsRp"
    }

    fn accepts(&self, problem: &Problem) -> bool {
        problem.branch() == (Mode::Permutation, true)
    }

    fn enumerate(&self, problem: &Problem) -> Outcome {
        search(problem)
    }
}

/// Multisets over the distinct values
#[derive(Debug, Clone, Copy, Default)]
pub struct CombinationsRp;

impl EnumMethod for CombinationsRp {
    fn name(&self) -> &'static str {
        "CombinationsRp"
    }

    fn accepts(&self, problem: &Problem) -> bool {
        problem.branch() == (Mode::Combination, true)
    }

    fn enumerate(&self, problem: &Problem) -> Outcome {
        search(problem)
    }
}
