//! Error types for the enumerator

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Enumerator errors
///
/// Everything except [`Error::NoStrategy`] is a user-facing validation
/// failure raised before any arrangement is generated.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Input must not exceed {limit} elements (got {len})")]
    InputTooLarge { len: usize, limit: usize },

    #[error("Invalid length: {0}")]
    InvalidLength(String),

    #[error("Condition argument error: {0}")]
    ConditionArgument(String),

    #[error("{0}")]
    ConditionNotApplicable(String),

    #[error("Condition error: {}", .0.join("; "))]
    Conditions(Vec<String>),

    #[error("Config error: {0}")]
    Config(String),

    #[error("No enumeration method accepts this request: {0}")]
    NoStrategy(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_norway::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conditions_message_joins_all_failures() {
        let err = Error::Conditions(vec![
            "Increasing is order dependent (permutations only)".into(),
            "Missing argument".into(),
        ]);
        assert_eq!(
            err.to_string(),
            "Condition error: Increasing is order dependent (permutations only); Missing argument"
        );
    }

    #[test]
    fn test_input_too_large_message() {
        let err = Error::InputTooLarge { len: 40, limit: 32 };
        assert_eq!(err.to_string(), "Input must not exceed 32 elements (got 40)");
    }
}
