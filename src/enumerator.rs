//! Request orchestration
//!
//! An [`Enumerator`] is one counting session: it turns a [`Request`] into a
//! validated [`Problem`], lets the [`EnSelector`] pick a strategy, runs it
//! and stamps the outcome with a session-unique id.
//!
//! ```rust
//! use enumerator::{ConditionSpec, EngineConfig, Enumerator, Mode, Request};
//!
//! let mut session = Enumerator::new(EngineConfig::default());
//! let request = Request::new("abcd", Mode::Permutation, 4)
//!     .with_condition(ConditionSpec::new("startsWith").with_arg("ab"));
//! let result = session.run(&request).unwrap();
//! assert_eq!(result.count, Some(2));
//! ```

use crate::condition::{parse_condition, render, ConditionSpec, Context, Mode};
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::input::{tokenize, validate_string};
use crate::method::Problem;
use crate::selector::EnSelector;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One counting request, as loaded from a file or built in code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Request {
    /// Input values: `"1, 2, 3"`, `"1 2 3"` or `"abc"`
    pub input: String,

    #[serde(default)]
    pub mode: Mode,

    /// Arrangement length
    pub length: i64,

    /// Allow values to be reused without limit
    #[serde(default)]
    pub repetition: bool,

    /// Conditions every counted arrangement must satisfy
    #[serde(default)]
    pub conditions: Vec<ConditionSpec>,
}

impl Request {
    pub fn new(input: &str, mode: Mode, length: i64) -> Self {
        Self {
            input: input.to_string(),
            mode,
            length,
            repetition: false,
            conditions: Vec::new(),
        }
    }

    pub fn with_repetition(mut self) -> Self {
        self.repetition = true;
        self
    }

    pub fn with_condition(mut self, condition: ConditionSpec) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Parse request from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Parse request from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a request file, choosing the format by extension
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
    }
}

/// Outcome of a run, with its id and a readable echo of the request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EnumResult {
    pub id: u64,
    /// The normalised request
    pub request: String,
    /// Number of satisfying arrangements; absent when too large to estimate
    pub count: Option<u128>,
    /// How the count was obtained
    pub description: String,
    /// Diagnostic detail
    pub detail: String,
    pub is_approximation: bool,
}

impl std::fmt::Display for EnumResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "#{} {}", self.id, self.request)?;
        match self.count {
            Some(count) if self.is_approximation => writeln!(f, "  count: ~{}", count)?,
            Some(count) => writeln!(f, "  count: {}", count)?,
            None => writeln!(f, "  count: too large to estimate")?,
        }
        writeln!(f, "  {}", self.description)?;
        write!(f, "  {}", self.detail)
    }
}

/// A counting session
#[derive(Debug, Clone)]
pub struct Enumerator {
    config: EngineConfig,
    selector: EnSelector,
    next_id: u64,
}

impl Default for Enumerator {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Enumerator {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            selector: EnSelector::new(),
            next_id: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate and normalise a request without running it
    pub fn prepare(&self, request: &Request) -> Result<Problem> {
        validate_string(&request.input)?;
        let input = tokenize(&request.input)?;
        if input.len() > self.config.input_limit {
            return Err(Error::InputTooLarge {
                len: input.len(),
                limit: self.config.input_limit,
            });
        }
        let length = usize::try_from(request.length).map_err(|_| {
            Error::InvalidLength(format!(
                "{} (must be a non-negative integer)",
                request.length
            ))
        })?;
        if length > self.config.length_limit {
            return Err(Error::InvalidLength(format!(
                "{} (must not exceed {})",
                length, self.config.length_limit
            )));
        }

        let conditions = request
            .conditions
            .iter()
            .map(parse_condition)
            .collect::<Result<Vec<_>>>()?;

        let context = Context {
            original: input,
            mode: request.mode,
            length,
            repetition: request.repetition,
        };
        let failures: Vec<String> = conditions
            .iter()
            .filter_map(|c| c.validate(&context).err())
            .map(|e| e.to_string())
            .collect();
        if !failures.is_empty() {
            return Err(Error::Conditions(failures));
        }

        tracing::debug!(
            input = ?context.original,
            mode = %context.mode,
            length,
            repetition = context.repetition,
            conditions = conditions.len(),
            "request normalised"
        );
        Ok(Problem::new(context, conditions, self.config.clone()))
    }

    /// Run one request; the id advances only when the run succeeds
    pub fn run(&mut self, request: &Request) -> Result<EnumResult> {
        let problem = self.prepare(request)?;
        let method = self.selector.select(&problem)?;
        let outcome = method.enumerate(&problem);

        let id = self.next_id;
        self.next_id += 1;
        tracing::info!(
            id,
            strategy = method.name(),
            count = ?outcome.count,
            approximation = outcome.is_approximation,
            "enumeration completed"
        );
        Ok(EnumResult {
            id,
            request: describe(&problem),
            count: outcome.count,
            description: outcome.description,
            detail: outcome.detail,
            is_approximation: outcome.is_approximation,
        })
    }
}

/// Readable echo of a normalised request
pub fn describe(problem: &Problem) -> String {
    let ctx = &problem.context;
    let mut res = format!(
        "{}s of length {} from '{}'",
        ctx.mode,
        ctx.length,
        render(&ctx.original)
    );
    if ctx.repetition {
        res.push_str(" with repetition");
    }
    if !problem.conditions.is_empty() {
        let conditions: Vec<String> = problem.conditions.iter().map(|c| c.to_string()).collect();
        res.push_str(" where ");
        res.push_str(&conditions.join(" and "));
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ids_advance_on_success_only() {
        let mut session = Enumerator::default();
        let ok = Request::new("1, 2, 3", Mode::Permutation, 3);
        assert_eq!(session.run(&ok).unwrap().id, 0);

        let bad = Request::new("1.5", Mode::Permutation, 1);
        assert!(session.run(&bad).is_err());

        assert_eq!(session.run(&ok).unwrap().id, 1);
    }

    #[test]
    fn test_request_echo() {
        let mut session = Enumerator::default();
        let request = Request::new("abcd", Mode::Permutation, 4)
            .with_condition(ConditionSpec::new("startsWith").with_arg("ab"));
        let result = session.run(&request).unwrap();
        assert_eq!(
            result.request,
            "permutations of length 4 from 'abcd' where startsWith 'ab'"
        );
        assert_eq!(result.count, Some(2));
        assert_eq!(result.description, "via brute force evaluation");
    }

    #[test]
    fn test_input_limit() {
        let config = EngineConfig {
            input_limit: 3,
            ..EngineConfig::default()
        };
        let mut session = Enumerator::new(config);
        let err = session
            .run(&Request::new("abcd", Mode::Combination, 2))
            .unwrap_err();
        assert!(matches!(err, Error::InputTooLarge { len: 4, limit: 3 }));
    }

    #[test]
    fn test_invalid_input_and_length() {
        let session = Enumerator::default();
        let err = session
            .prepare(&Request::new("a-b", Mode::Permutation, 1))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = session
            .prepare(&Request::new("ab", Mode::Permutation, -1))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidLength(_)));
    }

    #[test]
    fn test_length_limit() {
        let config = EngineConfig {
            length_limit: 5,
            ..EngineConfig::default()
        };
        let session = Enumerator::new(config);
        assert!(session
            .prepare(&Request::new("ab", Mode::Permutation, 5).with_repetition())
            .is_ok());
        let err = session
            .prepare(&Request::new("ab", Mode::Permutation, 6).with_repetition())
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid length: 6 (must not exceed 5)");
    }

    #[test]
    fn test_condition_errors_are_aggregated() {
        let session = Enumerator::default();
        let request = Request::new("abc", Mode::Combination, 2)
            .with_condition(ConditionSpec::new("palindrome"))
            .with_condition(ConditionSpec::new("distinct"))
            .with_condition(ConditionSpec::new("startsWith").with_arg("a"));
        match session.prepare(&request).unwrap_err() {
            Error::Conditions(messages) => {
                assert_eq!(messages.len(), 2);
                assert!(messages[0].contains("palindrome"));
                assert!(messages[1].contains("startsWith"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_parse_errors_abort_before_validation() {
        let session = Enumerator::default();
        let request = Request::new("abc", Mode::Permutation, 2)
            .with_condition(ConditionSpec::new("sum").with_arg("3"));
        assert!(matches!(
            session.prepare(&request).unwrap_err(),
            Error::ConditionArgument(_)
        ));
    }

    #[test]
    fn test_request_from_yaml() {
        let request = Request::from_yaml(
            r#"
input: "1, 2, 3, 4"
mode: combination
length: 2
conditions:
  - condition: sum
    arg: "5"
    comparison: equal
"#,
        )
        .unwrap();
        assert_eq!(
            request,
            Request::new("1, 2, 3, 4", Mode::Combination, 2).with_condition(
                ConditionSpec::new("sum")
                    .with_arg("5")
                    .with_comparison("equal")
            )
        );
        let result = Enumerator::default().run(&request).unwrap();
        assert_eq!(result.count, Some(2));
    }

    #[test]
    fn test_display() {
        let mut session = Enumerator::default();
        let result = session
            .run(&Request::new("1, 1, 2", Mode::Permutation, 3))
            .unwrap();
        let text = result.to_string();
        assert!(text.starts_with("#0 permutations of length 3 from '1, 1, 2'"));
        assert!(text.contains("count: 3"));
    }
}
