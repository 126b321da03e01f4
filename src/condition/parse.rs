//! Declarative condition descriptions → [`Condition`]
//!
//! A description carries the condition name, a negation flag and
//! type-specific string fields:
//!
//! ```yaml
//! - condition: startsWith
//!   arg: "ab"
//! - condition: count
//!   arg: "a, b"
//!   arg2: "2"
//!   comparison: more
//!   negate: true
//! - condition: increasing
//!   strict: "true"
//! ```
//!
//! Parsing either returns a complete condition or fails; argument problems
//! are reported here, context problems (mode, length) by
//! [`Condition::validate`].

use super::{Aggregate, Comparison, Condition, ConditionKind};
use crate::error::{Error, Result};
use crate::input::{parse_token, tokenize};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Declarative description of one condition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConditionSpec {
    /// Condition name, e.g. `startsWith`
    #[serde(alias = "name")]
    pub condition: String,

    /// Invert the result
    #[serde(default)]
    pub negate: bool,

    /// `"true"` / `"false"` for increasing and decreasing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<String>,

    /// Sub-array, or number / single character
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,

    /// Amount for count-style conditions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg2: Option<String>,

    /// `less`, `equal` or `more`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<String>,
}

impl ConditionSpec {
    pub fn new(condition: &str) -> Self {
        Self {
            condition: condition.to_string(),
            ..Default::default()
        }
    }

    pub fn negated(mut self) -> Self {
        self.negate = !self.negate;
        self
    }

    pub fn with_strict(mut self, strict: &str) -> Self {
        self.strict = Some(strict.to_string());
        self
    }

    pub fn with_arg(mut self, arg: &str) -> Self {
        self.arg = Some(arg.to_string());
        self
    }

    pub fn with_arg2(mut self, arg2: &str) -> Self {
        self.arg2 = Some(arg2.to_string());
        self
    }

    pub fn with_comparison(mut self, comparison: &str) -> Self {
        self.comparison = Some(comparison.to_string());
        self
    }
}

fn missing() -> Error {
    Error::ConditionArgument("Missing condition argument".into())
}

fn required(field: &Option<String>) -> Result<&str> {
    match field.as_deref() {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(missing()),
    }
}

fn strict_arg(spec: &ConditionSpec) -> Result<bool> {
    match spec.strict.as_deref() {
        Some("true") => Ok(true),
        Some("false") => Ok(false),
        Some(other) => Err(Error::ConditionArgument(format!(
            "strict must be \"true\" or \"false\", got '{}'",
            other
        ))),
        None => Err(missing()),
    }
}

fn input_arg(spec: &ConditionSpec) -> Result<Vec<i64>> {
    tokenize(required(&spec.arg)?).map_err(|e| {
        Error::ConditionArgument(format!("Invalid characters in condition argument: {}", e))
    })
}

fn comparison_arg(spec: &ConditionSpec) -> Result<Comparison> {
    required(&spec.comparison)?.parse()
}

/// Number, or the code point of a single character
fn value_arg(raw: &str) -> Result<f64> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<f64>() {
        if n.is_finite() {
            return Ok(n);
        }
    } else if let Some(c) = parse_token(raw) {
        return Ok(c as f64);
    }
    Err(Error::ConditionArgument(format!(
        "'{}' must be a number or single character",
        raw
    )))
}

fn amount_arg(spec: &ConditionSpec) -> Result<f64> {
    let raw = required(&spec.arg2)?.trim();
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(Error::ConditionArgument(format!(
            "Count must be a number, got '{}'",
            raw
        ))),
    }
}

fn aggregate(spec: &ConditionSpec, aggregate: Aggregate) -> Result<ConditionKind> {
    let value = value_arg(required(&spec.arg)?)?;
    Ok(ConditionKind::Aggregate {
        aggregate,
        value,
        comparison: comparison_arg(spec)?,
    })
}

/// Sub-array, amount and comparison, in that order of checking
fn counted(spec: &ConditionSpec) -> Result<(Vec<i64>, f64, Comparison)> {
    let comparison = comparison_arg(spec)?;
    let amount = amount_arg(spec)?;
    let arg = input_arg(spec)?;
    Ok((arg, amount, comparison))
}

/// Build a condition from its declarative description
pub fn parse_condition(spec: &ConditionSpec) -> Result<Condition> {
    let kind = match spec.condition.as_str() {
        "increasing" => ConditionKind::Increasing {
            strict: strict_arg(spec)?,
        },
        "decreasing" => ConditionKind::Decreasing {
            strict: strict_arg(spec)?,
        },
        "subarray" => ConditionKind::Subarray(input_arg(spec)?),
        "subsequence" => ConditionKind::Subsequence(input_arg(spec)?),
        "contains" => ConditionKind::Contains(input_arg(spec)?),
        "excludes" => ConditionKind::Excludes(input_arg(spec)?),
        "startsWith" => ConditionKind::StartsWith(input_arg(spec)?),
        "endsWith" => ConditionKind::EndsWith(input_arg(spec)?),
        "distinct" => ConditionKind::Distinct,
        "palindrome" => ConditionKind::Palindrome,
        "derangement" => ConditionKind::Derangement,
        "sum" => aggregate(spec, Aggregate::Sum)?,
        "average" => aggregate(spec, Aggregate::Average)?,
        "median" => aggregate(spec, Aggregate::Median)?,
        "maximum" => aggregate(spec, Aggregate::Maximum)?,
        "minimum" => aggregate(spec, Aggregate::Minimum)?,
        "countDistinct" => aggregate(spec, Aggregate::CountDistinct)?,
        "maxFrequency" => aggregate(spec, Aggregate::MaxFrequency)?,
        "minFrequency" => aggregate(spec, Aggregate::MinFrequency)?,
        "count" => {
            let (arg, amount, comparison) = counted(spec)?;
            ConditionKind::Count {
                arg,
                amount,
                comparison,
            }
        }
        "countOverlap" => {
            let (arg, amount, comparison) = counted(spec)?;
            ConditionKind::CountOverlap {
                arg,
                amount,
                comparison,
            }
        }
        "subseqCount" => {
            let (arg, amount, comparison) = counted(spec)?;
            ConditionKind::SubseqCount {
                arg,
                amount,
                comparison,
            }
        }
        other => {
            return Err(Error::ConditionArgument(format!(
                "Unrecognised condition '{}'",
                other
            )))
        }
    };
    tracing::debug!(condition = %spec.condition, negate = spec.negate, "parsed condition");
    Ok(Condition::new(kind, spec.negate))
}
