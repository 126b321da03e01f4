//! Conditions on arrangements
//!
//! A condition decides, for one candidate arrangement, whether it satisfies a
//! named rule. Conditions are built once per run (see [`parse`]), validated
//! once against the run's [`Context`], then evaluated for every candidate.
//!
//! - `parse` - declarative description → [`Condition`]
//! - `catalogue` - names, descriptions and argument shapes of every condition
//!
//! Evaluation is pure: the same candidate and context always give the same
//! answer, so a condition may be evaluated any number of times.

pub mod catalogue;
pub mod parse;

pub use catalogue::{catalogue, ArgType, ConditionInfo};
pub use parse::{parse_condition, ConditionSpec};

use crate::combinatorics::{element_to_string, is_prefix, is_suffix, multiplicities, sub_multiset};
use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Whether order matters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Order matters
    #[default]
    Permutation,
    /// Order is ignored; candidates are canonicalised ascending
    Combination,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Permutation => write!(f, "permutation"),
            Mode::Combination => write!(f, "combination"),
        }
    }
}

/// Comparison between a computed quantity and the condition's argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    Less,
    Equal,
    More,
}

impl Comparison {
    /// `value <cmp> arg`
    pub fn holds(self, value: f64, arg: f64) -> bool {
        match self {
            Comparison::Less => value < arg,
            Comparison::Equal => value == arg,
            Comparison::More => value > arg,
        }
    }
}

impl std::str::FromStr for Comparison {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "less" => Ok(Comparison::Less),
            "equal" => Ok(Comparison::Equal),
            "more" => Ok(Comparison::More),
            other => Err(Error::ConditionArgument(format!(
                "Unrecognised comparison '{}' (expected less, equal or more)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Comparison::Less => write!(f, "less than"),
            Comparison::Equal => write!(f, "equal to"),
            Comparison::More => write!(f, "more than"),
        }
    }
}

/// Numeric summaries of a candidate that can be compared with a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregate {
    Sum,
    Average,
    Median,
    Maximum,
    Minimum,
    CountDistinct,
    MaxFrequency,
    MinFrequency,
}

impl Aggregate {
    pub fn name(self) -> &'static str {
        match self {
            Aggregate::Sum => "sum",
            Aggregate::Average => "average",
            Aggregate::Median => "median",
            Aggregate::Maximum => "maximum",
            Aggregate::Minimum => "minimum",
            Aggregate::CountDistinct => "countDistinct",
            Aggregate::MaxFrequency => "maxFrequency",
            Aggregate::MinFrequency => "minFrequency",
        }
    }

    /// Value of the aggregate over `candidate`, `None` where it is undefined
    /// (extremes, frequencies, mean and median of the empty arrangement)
    pub fn compute(self, candidate: &[i64]) -> Option<f64> {
        match self {
            Aggregate::Sum => Some(candidate.iter().map(|&e| e as i128).sum::<i128>() as f64),
            Aggregate::Average => {
                if candidate.is_empty() {
                    return None;
                }
                let sum: i128 = candidate.iter().map(|&e| e as i128).sum();
                Some(sum as f64 / candidate.len() as f64)
            }
            Aggregate::Median => {
                if candidate.is_empty() {
                    return None;
                }
                let mut sorted = candidate.to_vec();
                sorted.sort_unstable();
                let mid = sorted.len() / 2;
                if sorted.len() % 2 == 1 {
                    Some(sorted[mid] as f64)
                } else {
                    Some((sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0)
                }
            }
            Aggregate::Maximum => candidate.iter().max().map(|&e| e as f64),
            Aggregate::Minimum => candidate.iter().min().map(|&e| e as f64),
            Aggregate::CountDistinct => Some(multiplicities(candidate).len() as f64),
            Aggregate::MaxFrequency => multiplicities(candidate).into_values().max().map(|c| c as f64),
            Aggregate::MinFrequency => multiplicities(candidate).into_values().min().map(|c| c as f64),
        }
    }
}

/// Run context a condition is validated and evaluated against
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    /// Input values in the caller's order
    pub original: Vec<i64>,
    pub mode: Mode,
    /// Target arrangement length
    pub length: usize,
    pub repetition: bool,
}

/// The rule a condition checks, with its constant argument
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionKind {
    /// Adjacent pairs never decrease (never stay equal when strict)
    Increasing { strict: bool },
    /// Adjacent pairs never increase (never stay equal when strict)
    Decreasing { strict: bool },
    /// Candidate is a super-multiset of the argument
    Contains(Vec<i64>),
    /// None of the argument's values appear
    Excludes(Vec<i64>),
    /// Non-overlapping contiguous occurrences, counted greedily left to right
    Count {
        arg: Vec<i64>,
        amount: f64,
        comparison: Comparison,
    },
    /// Overlapping contiguous occurrences
    CountOverlap {
        arg: Vec<i64>,
        amount: f64,
        comparison: Comparison,
    },
    /// Number of ways to delete elements of the candidate to obtain the argument
    SubseqCount {
        arg: Vec<i64>,
        amount: f64,
        comparison: Comparison,
    },
    /// Argument occurs as an ordered, not necessarily contiguous, subsequence
    Subsequence(Vec<i64>),
    /// Argument occurs as a contiguous run
    Subarray(Vec<i64>),
    StartsWith(Vec<i64>),
    EndsWith(Vec<i64>),
    /// A numeric summary compared with a value
    Aggregate {
        aggregate: Aggregate,
        value: f64,
        comparison: Comparison,
    },
    /// All elements pairwise distinct
    Distinct,
    /// No element in its original position
    Derangement,
    /// Equal to its reverse
    Palindrome,
}

/// A condition: a rule plus a negation flag applied to its result
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub kind: ConditionKind,
    pub negate: bool,
}

impl Condition {
    pub fn new(kind: ConditionKind, negate: bool) -> Self {
        Self { kind, negate }
    }

    /// Name of the rule as used in declarative descriptions
    pub fn name(&self) -> &'static str {
        match &self.kind {
            ConditionKind::Increasing { .. } => "increasing",
            ConditionKind::Decreasing { .. } => "decreasing",
            ConditionKind::Contains(_) => "contains",
            ConditionKind::Excludes(_) => "excludes",
            ConditionKind::Count { .. } => "count",
            ConditionKind::CountOverlap { .. } => "countOverlap",
            ConditionKind::SubseqCount { .. } => "subseqCount",
            ConditionKind::Subsequence(_) => "subsequence",
            ConditionKind::Subarray(_) => "subarray",
            ConditionKind::StartsWith(_) => "startsWith",
            ConditionKind::EndsWith(_) => "endsWith",
            ConditionKind::Aggregate { aggregate, .. } => aggregate.name(),
            ConditionKind::Distinct => "distinct",
            ConditionKind::Derangement => "derangement",
            ConditionKind::Palindrome => "palindrome",
        }
    }

    /// Order-dependent rules are vacuous on canonically sorted combinations
    pub fn is_order_dependent(&self) -> bool {
        matches!(
            self.kind,
            ConditionKind::Increasing { .. }
                | ConditionKind::Decreasing { .. }
                | ConditionKind::Subsequence(_)
                | ConditionKind::Subarray(_)
                | ConditionKind::StartsWith(_)
                | ConditionKind::EndsWith(_)
                | ConditionKind::Derangement
                | ConditionKind::Palindrome
        )
    }

    fn sub_array_arg(&self) -> Option<&[i64]> {
        match &self.kind {
            ConditionKind::Contains(arg)
            | ConditionKind::Excludes(arg)
            | ConditionKind::Subsequence(arg)
            | ConditionKind::Subarray(arg)
            | ConditionKind::StartsWith(arg)
            | ConditionKind::EndsWith(arg)
            | ConditionKind::Count { arg, .. }
            | ConditionKind::CountOverlap { arg, .. }
            | ConditionKind::SubseqCount { arg, .. } => Some(arg),
            _ => None,
        }
    }

    fn numeric_arg(&self) -> Option<f64> {
        match &self.kind {
            ConditionKind::Count { amount, .. }
            | ConditionKind::CountOverlap { amount, .. }
            | ConditionKind::SubseqCount { amount, .. } => Some(*amount),
            ConditionKind::Aggregate { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Check the condition makes sense for this run
    pub fn validate(&self, ctx: &Context) -> Result<()> {
        if let Some(arg) = self.sub_array_arg() {
            if arg.is_empty() {
                return Err(Error::ConditionArgument(format!(
                    "Missing argument for {}",
                    self.name()
                )));
            }
        }
        if let Some(n) = self.numeric_arg() {
            if !n.is_finite() {
                return Err(Error::ConditionArgument(format!(
                    "Invalid argument for {}",
                    self.name()
                )));
            }
        }
        if self.is_order_dependent() && ctx.mode != Mode::Permutation {
            return Err(Error::ConditionNotApplicable(format!(
                "{} is order dependent (permutations only)",
                self.name()
            )));
        }
        if self.kind == ConditionKind::Derangement && ctx.length != ctx.original.len() {
            return Err(Error::ConditionNotApplicable(format!(
                "derangement requires the full input length ({}), not {}",
                ctx.original.len(),
                ctx.length
            )));
        }
        Ok(())
    }

    /// Result of the rule before negation
    pub fn raw_evaluate(&self, candidate: &[i64], ctx: &Context) -> bool {
        match &self.kind {
            ConditionKind::Increasing { strict } => candidate
                .windows(2)
                .all(|w| w[0] < w[1] || (!strict && w[0] == w[1])),
            ConditionKind::Decreasing { strict } => candidate
                .windows(2)
                .all(|w| w[0] > w[1] || (!strict && w[0] == w[1])),
            ConditionKind::Contains(arg) => sub_multiset(arg, candidate),
            ConditionKind::Excludes(arg) => !arg.iter().any(|e| candidate.contains(e)),
            ConditionKind::Count {
                arg,
                amount,
                comparison,
            } => comparison.holds(count_non_overlapping(candidate, arg) as f64, *amount),
            ConditionKind::CountOverlap {
                arg,
                amount,
                comparison,
            } => comparison.holds(count_overlapping(candidate, arg) as f64, *amount),
            ConditionKind::SubseqCount {
                arg,
                amount,
                comparison,
            } => comparison.holds(count_subsequences(candidate, arg) as f64, *amount),
            ConditionKind::Subsequence(arg) => is_subsequence(arg, candidate),
            ConditionKind::Subarray(arg) => {
                arg.is_empty() || candidate.windows(arg.len()).any(|w| w == arg.as_slice())
            }
            ConditionKind::StartsWith(arg) => is_prefix(arg, candidate),
            ConditionKind::EndsWith(arg) => is_suffix(arg, candidate),
            ConditionKind::Aggregate {
                aggregate,
                value,
                comparison,
            } => match aggregate {
                // compare the sum against value * len to stay exact on integers
                Aggregate::Average if !candidate.is_empty() => {
                    let sum: i128 = candidate.iter().map(|&e| e as i128).sum();
                    comparison.holds(sum as f64, value * candidate.len() as f64)
                }
                _ => aggregate
                    .compute(candidate)
                    .is_some_and(|x| comparison.holds(x, *value)),
            },
            ConditionKind::Distinct => multiplicities(candidate).len() == candidate.len(),
            ConditionKind::Derangement => candidate
                .iter()
                .zip(&ctx.original)
                .all(|(c, o)| c != o),
            ConditionKind::Palindrome => candidate.iter().eq(candidate.iter().rev()),
        }
    }

    /// `negate XOR raw_evaluate`
    pub fn evaluate(&self, candidate: &[i64], ctx: &Context) -> bool {
        self.negate != self.raw_evaluate(candidate, ctx)
    }

    /// Relative evaluation cost, used only to budget strategy selection
    pub fn cost_scale(&self, ctx: &Context) -> f64 {
        let length = ctx.length as f64;
        match self.kind {
            ConditionKind::CountOverlap { .. } | ConditionKind::SubseqCount { .. } => {
                length * length
            }
            _ => length,
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.negate {
            write!(f, "not ")?;
        }
        match &self.kind {
            ConditionKind::Increasing { strict } | ConditionKind::Decreasing { strict } => {
                if *strict {
                    write!(f, "strictly ")?;
                }
                write!(f, "{}", self.name())
            }
            ConditionKind::Contains(arg)
            | ConditionKind::Excludes(arg)
            | ConditionKind::Subsequence(arg)
            | ConditionKind::Subarray(arg)
            | ConditionKind::StartsWith(arg)
            | ConditionKind::EndsWith(arg) => write!(f, "{} '{}'", self.name(), render(arg)),
            ConditionKind::Count {
                arg,
                amount,
                comparison,
            }
            | ConditionKind::CountOverlap {
                arg,
                amount,
                comparison,
            }
            | ConditionKind::SubseqCount {
                arg,
                amount,
                comparison,
            } => write!(f, "{} '{}' {} {}", self.name(), render(arg), comparison, amount),
            ConditionKind::Aggregate {
                value, comparison, ..
            } => write!(f, "{} {} {}", self.name(), comparison, value),
            ConditionKind::Distinct | ConditionKind::Derangement | ConditionKind::Palindrome => {
                write!(f, "{}", self.name())
            }
        }
    }
}

/// Render a sequence of values compactly: a word when every value is a
/// letter, a comma-separated list otherwise
pub fn render(arr: &[i64]) -> String {
    let parts: Vec<String> = arr.iter().map(|&e| element_to_string(e)).collect();
    if parts
        .iter()
        .all(|p| p.chars().all(|c| c.is_ascii_alphabetic()))
    {
        parts.concat()
    } else {
        parts.join(", ")
    }
}

/// Non-overlapping occurrences of `arg` as a contiguous run, scanning left to
/// right and skipping past each match
fn count_non_overlapping(candidate: &[i64], arg: &[i64]) -> usize {
    if arg.is_empty() {
        return 0;
    }
    let mut res = 0;
    let mut i = 0;
    while i + arg.len() <= candidate.len() {
        if candidate[i..i + arg.len()] == *arg {
            res += 1;
            i += arg.len();
        } else {
            i += 1;
        }
    }
    res
}

fn count_overlapping(candidate: &[i64], arg: &[i64]) -> usize {
    if arg.is_empty() {
        return 0;
    }
    candidate.windows(arg.len()).filter(|w| *w == arg).count()
}

/// Two-row DP: `count[i][j] = count[i][j-1] + (arg[i-1] == cand[j-1] ? count[i-1][j-1] : 0)`
fn count_subsequences(candidate: &[i64], arg: &[i64]) -> u128 {
    // prev holds row i-1, starting from the all-ones base row
    let mut prev = vec![1u128; candidate.len() + 1];
    let mut cur = vec![0u128; candidate.len() + 1];
    for &a in arg {
        cur[0] = 0;
        for (j, &c) in candidate.iter().enumerate() {
            cur[j + 1] = if a == c {
                cur[j].saturating_add(prev[j])
            } else {
                cur[j]
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[candidate.len()]
}

fn is_subsequence(arg: &[i64], candidate: &[i64]) -> bool {
    let mut rest = candidate.iter();
    arg.iter().all(|a| rest.any(|c| c == a))
}
